// Jobs tab state.
// Holds the search box, the latest snapshot, and the derived overview rows.

use std::collections::HashSet;

use ratatui::widgets::TableState;

use crate::graphql::WorkspaceOrError;
use crate::overview::{JobSummary, OverviewContent, RepoAddress, RepoBucket, derive_overview};

use super::query::QueryState;

/// One rendered row of the jobs table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableRow {
    /// Repository header with its number of matching jobs.
    Repo {
        address: RepoAddress,
        job_count: usize,
        collapsed: bool,
    },
    /// A job under the preceding repository header.
    Job {
        address: RepoAddress,
        job: JobSummary,
    },
}

/// Complete state for the jobs tab.
#[derive(Debug)]
pub struct JobsTabState {
    /// Raw search box value, echoed back verbatim in messages.
    pub search: String,
    /// Whether keystrokes currently edit the search box.
    pub search_active: bool,
    /// Latest workspace snapshot and fetch status.
    pub query: QueryState<WorkspaceOrError>,
    /// Repository sections collapsed by the user, by address key.
    collapsed: HashSet<String>,
    content: OverviewContent,
    rows: Vec<TableRow>,
    pub table_state: TableState,
}

impl Default for JobsTabState {
    fn default() -> Self {
        Self {
            search: String::new(),
            search_active: false,
            query: QueryState::new(),
            collapsed: HashSet::new(),
            content: OverviewContent::EmptyNoSearch,
            rows: Vec::new(),
            table_state: TableState::default(),
        }
    }
}

impl JobsTabState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> &OverviewContent {
        &self.content
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Re-derive content and rows from the snapshot, search box, and visible set.
    pub fn recompute(&mut self, visible: &[RepoAddress]) {
        let filtered = derive_overview(self.query.data(), visible, &self.search);
        self.content = OverviewContent::select(
            self.query.is_loading(),
            self.query.has_data(),
            filtered,
            &self.search,
        );
        self.rows = build_rows(self.content.buckets(), &self.collapsed);
        self.clamp_selection();
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search.push(c);
    }

    pub fn pop_search_char(&mut self) {
        self.search.pop();
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
    }

    pub fn select_next(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => (i + 1).min(self.rows.len() - 1),
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn select_prev(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let i = self.table_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.table_state.select(Some(i));
    }

    pub fn selected_row(&self) -> Option<&TableRow> {
        self.table_state.selected().and_then(|i| self.rows.get(i))
    }

    /// Collapse or expand the repository section under the cursor.
    /// On a job row this acts on the job's repository. Returns whether anything changed.
    pub fn toggle_selected_section(&mut self) -> bool {
        let address = match self.selected_row() {
            Some(TableRow::Repo { address, .. }) | Some(TableRow::Job { address, .. }) => {
                address.clone()
            }
            None => return false,
        };

        let key = address.as_key();
        if !self.collapsed.remove(&key) {
            self.collapsed.insert(key);
        }
        self.rows = build_rows(self.content.buckets(), &self.collapsed);

        // Keep the cursor on the header of the toggled section.
        let header = self.rows.iter().position(
            |row| matches!(row, TableRow::Repo { address: a, .. } if *a == address),
        );
        self.table_state.select(header);
        true
    }

    fn clamp_selection(&mut self) {
        match self.table_state.selected() {
            _ if self.rows.is_empty() => self.table_state.select(None),
            Some(i) if i >= self.rows.len() => self.table_state.select(Some(self.rows.len() - 1)),
            None => self.table_state.select(Some(0)),
            Some(_) => {}
        }
    }
}

fn build_rows(buckets: &[RepoBucket], collapsed: &HashSet<String>) -> Vec<TableRow> {
    let mut rows = Vec::new();
    for bucket in buckets {
        let is_collapsed = collapsed.contains(&bucket.repo_address.as_key());
        rows.push(TableRow::Repo {
            address: bucket.repo_address.clone(),
            job_count: bucket.jobs.len(),
            collapsed: is_collapsed,
        });
        if !is_collapsed {
            rows.extend(bucket.jobs.iter().map(|job| TableRow::Job {
                address: bucket.repo_address.clone(),
                job: job.clone(),
            }));
        }
    }
    rows
}
