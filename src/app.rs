// App state and main event loop.
// Owns the tabs, schedules workspace refreshes, and handles keyboard input.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::cache::paths;
use crate::config::Config;
use crate::error::Result;
use crate::graphql::{GraphQlClient, LocationOrLoadError, WorkspaceOrError};
use crate::overview::all_repo_addresses;
use crate::state::{Console, ConsoleMessage, JobsTabState, RefreshState, VisibilityState};
use crate::ui;

/// Active tab in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Jobs,
    Console,
}

impl Tab {
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Jobs => "Jobs",
            Tab::Console => "Console",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Tab::Jobs => Tab::Console,
            Tab::Console => Tab::Jobs,
        }
    }
}

/// Outcome of a workspace query, sent back from the fetch task.
#[derive(Debug)]
pub enum FetchEvent {
    Loaded(WorkspaceOrError),
    Failed(String),
}

/// Main application state.
pub struct App {
    /// Currently active tab.
    pub active_tab: Tab,
    /// Jobs overview state.
    pub jobs: JobsTabState,
    /// Known and visible repositories.
    pub visibility: VisibilityState,
    /// Refresh timer.
    pub refresh: RefreshState,
    /// Activity log.
    pub console: Console,
    /// Whether the help overlay is shown.
    pub show_help: bool,
    /// Whether the app should exit.
    pub should_quit: bool,
    client: GraphQlClient,
    fetch_tx: UnboundedSender<FetchEvent>,
    fetch_rx: UnboundedReceiver<FetchEvent>,
}

impl App {
    pub fn new(config: &Config) -> Result<Self> {
        let visibility = VisibilityState::load(paths::hidden_repos_path(&config.endpoint));
        Self::with_visibility(config, visibility)
    }

    /// Build the app around an already loaded visibility state.
    pub fn with_visibility(config: &Config, visibility: VisibilityState) -> Result<Self> {
        let client = GraphQlClient::new(&config.endpoint, config.request_timeout())?;
        let (fetch_tx, fetch_rx) = mpsc::unbounded_channel();

        let mut console = Console::default();
        console.push(ConsoleMessage::info(format!(
            "Watching {} every {}s",
            config.endpoint, config.refresh_interval_secs
        )));

        Ok(Self {
            active_tab: Tab::default(),
            jobs: JobsTabState::new(),
            visibility,
            refresh: RefreshState::new(config.refresh_interval()),
            console,
            show_help: false,
            should_quit: false,
            client,
            fetch_tx,
            fetch_rx,
        })
    }

    pub fn endpoint(&self) -> &str {
        self.client.endpoint()
    }

    /// Main event loop. Must run inside a tokio runtime.
    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> io::Result<()> {
        while !self.should_quit {
            if self.refresh.is_due(Instant::now()) {
                self.start_fetch();
            }
            while let Ok(event) = self.fetch_rx.try_recv() {
                self.apply_fetch_event(event);
            }

            terminal.draw(|frame| ui::draw(frame, self))?;
            self.handle_events()?;
        }
        Ok(())
    }

    /// Issue the workspace query on a background task.
    fn start_fetch(&mut self) {
        self.refresh.start(Instant::now());
        self.jobs.query.set_loading();
        self.recompute();

        let client = self.client.clone();
        let tx = self.fetch_tx.clone();
        tokio::spawn(async move {
            let event = match client.fetch_overview_jobs().await {
                Ok(snapshot) => FetchEvent::Loaded(snapshot),
                Err(e) => FetchEvent::Failed(e.to_string()),
            };
            if tx.send(event).is_err() {
                tracing::warn!("fetch finished after the app closed");
            }
        });
        tracing::debug!("workspace query issued");
    }

    /// Fold a finished query into state.
    pub fn apply_fetch_event(&mut self, event: FetchEvent) {
        self.refresh.finish();
        match event {
            FetchEvent::Loaded(snapshot) => {
                self.report_snapshot(&snapshot);
                self.visibility
                    .set_all_repos(all_repo_addresses(Some(&snapshot)));
                self.jobs.query.set_loaded(snapshot);
            }
            FetchEvent::Failed(error) => {
                tracing::warn!("workspace query failed: {}", error);
                self.console
                    .push(ConsoleMessage::error(format!("Refresh failed: {}", error)));
                self.jobs.query.set_error(error);
            }
        }
        self.recompute();
    }

    /// Log workspace and location load errors. They never stop the overview rendering.
    fn report_snapshot(&mut self, snapshot: &WorkspaceOrError) {
        match snapshot {
            WorkspaceOrError::PythonError(error) => {
                tracing::warn!("workspace failed to load: {}", error.message);
                self.console.push(ConsoleMessage::error(format!(
                    "Workspace failed to load: {}",
                    error.message
                )));
            }
            WorkspaceOrError::Workspace(workspace) => {
                let mut loaded = 0;
                for entry in &workspace.location_entries {
                    match &entry.location_or_load_error {
                        Some(LocationOrLoadError::RepositoryLocation(_)) => loaded += 1,
                        Some(LocationOrLoadError::PythonError(error)) => {
                            tracing::warn!(location = %entry.name, "location failed to load: {}", error.message);
                            self.console.push(ConsoleMessage::warn(format!(
                                "Location {} failed to load: {}",
                                entry.name, error.message
                            )));
                        }
                        None => {}
                    }
                }
                tracing::info!(
                    locations = workspace.location_entries.len(),
                    loaded,
                    "workspace snapshot received"
                );
            }
        }
    }

    fn recompute(&mut self) {
        let visible = self.visibility.visible_repos();
        self.jobs.recompute(&visible);
    }

    /// Poll for terminal events.
    #[allow(clippy::collapsible_if)]
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Dispatch a key press to the focused surface.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.show_help {
            self.show_help = false;
            return;
        }

        if self.visibility.filter_open {
            self.handle_filter_key(key.code);
        } else if self.jobs.search_active {
            self.handle_search_key(key.code);
        } else {
            self.handle_normal_key(key.code);
        }
    }

    fn handle_search_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc | KeyCode::Enter => self.jobs.search_active = false,
            KeyCode::Backspace => {
                self.jobs.pop_search_char();
                self.recompute();
            }
            KeyCode::Char(c) => {
                self.jobs.push_search_char(c);
                self.recompute();
            }
            _ => {}
        }
    }

    fn handle_filter_key(&mut self, code: KeyCode) {
        let result = match code {
            KeyCode::Esc | KeyCode::Char('f') | KeyCode::Char('q') => {
                self.visibility.close_filter();
                Ok(())
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.visibility.select_next();
                Ok(())
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.visibility.select_prev();
                Ok(())
            }
            KeyCode::Char(' ') | KeyCode::Enter => self.visibility.toggle_selected(),
            KeyCode::Char('a') => self.visibility.show_all(),
            _ => Ok(()),
        };

        if let Err(e) = result {
            tracing::error!("failed to save repository filter: {}", e);
            self.console.push(ConsoleMessage::error(format!(
                "Could not save repository filter: {}",
                e
            )));
        }
        self.recompute();
    }

    fn handle_normal_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Tab | KeyCode::BackTab => {
                self.active_tab = self.active_tab.next();
                self.clear_console_badge_if_viewing();
            }
            KeyCode::Char('r') => {
                if !self.refresh.in_flight() {
                    self.start_fetch();
                }
            }
            _ if self.active_tab != Tab::Jobs => {}
            KeyCode::Char('/') => self.jobs.search_active = true,
            KeyCode::Esc => {
                if !self.jobs.search.is_empty() {
                    self.jobs.clear_search();
                    self.recompute();
                }
            }
            KeyCode::Char('f') => {
                if self.visibility.show_filter_control() {
                    self.visibility.open_filter();
                }
            }
            KeyCode::Down | KeyCode::Char('j') => self.jobs.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.jobs.select_prev(),
            KeyCode::Enter => {
                self.jobs.toggle_selected_section();
            }
            _ => {}
        }
    }

    /// Clear console badge when viewing console tab.
    fn clear_console_badge_if_viewing(&mut self) {
        if self.active_tab == Tab::Console {
            self.console.mark_read();
        }
    }
}
