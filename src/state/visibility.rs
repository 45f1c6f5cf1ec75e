// Repository visibility state.
// Tracks which repositories the user has hidden and persists the choice.

use std::collections::BTreeSet;
use std::path::PathBuf;

use ratatui::widgets::ListState;

use crate::cache;
use crate::error::Result;
use crate::overview::RepoAddress;

/// Known repositories and the subset currently hidden.
#[derive(Debug, Default)]
pub struct VisibilityState {
    all_repos: Vec<RepoAddress>,
    hidden: BTreeSet<String>,
    store_path: Option<PathBuf>,
    /// Whether the repository filter modal is open.
    pub filter_open: bool,
    /// Selection inside the repository filter modal.
    pub list_state: ListState,
}

impl VisibilityState {
    /// Create state backed by `store_path`, loading any hidden keys saved there.
    ///
    /// An unreadable store is logged and treated as "nothing hidden".
    pub fn load(store_path: Option<PathBuf>) -> Self {
        let hidden = match store_path.as_deref().map(cache::read_cached::<Vec<String>>) {
            Some(Ok(Some(cached))) => cached
                .data
                .into_iter()
                .filter(|key| {
                    let valid = RepoAddress::from_key(key).is_some();
                    if !valid {
                        tracing::warn!(key = %key, "dropping malformed hidden repository key");
                    }
                    valid
                })
                .collect(),
            Some(Ok(None)) | None => BTreeSet::new(),
            Some(Err(e)) => {
                tracing::warn!("ignoring unreadable hidden repository list: {}", e);
                BTreeSet::new()
            }
        };

        Self {
            hidden,
            store_path,
            ..Self::default()
        }
    }

    /// Replace the known repository list, e.g. after a new snapshot arrives.
    pub fn set_all_repos(&mut self, all_repos: Vec<RepoAddress>) {
        self.all_repos = all_repos;
        let len = self.all_repos.len();
        match self.list_state.selected() {
            Some(_) if len == 0 => self.list_state.select(None),
            Some(i) if i >= len => self.list_state.select(Some(len - 1)),
            _ => {}
        }
    }

    pub fn all_repos(&self) -> &[RepoAddress] {
        &self.all_repos
    }

    /// Repositories currently shown in the overview, in display order.
    pub fn visible_repos(&self) -> Vec<RepoAddress> {
        self.all_repos
            .iter()
            .filter(|address| !self.hidden.contains(&address.as_key()))
            .cloned()
            .collect()
    }

    pub fn is_visible(&self, address: &RepoAddress) -> bool {
        !self.hidden.contains(&address.as_key())
    }

    /// The filter control is only worth showing with more than one repository.
    pub fn show_filter_control(&self) -> bool {
        self.all_repos.len() > 1
    }

    /// Flip visibility of one repository and persist.
    pub fn toggle(&mut self, address: &RepoAddress) -> Result<()> {
        let key = address.as_key();
        if !self.hidden.remove(&key) {
            self.hidden.insert(key);
        }
        self.save()
    }

    /// Flip the repository under the modal cursor.
    pub fn toggle_selected(&mut self) -> Result<()> {
        let Some(address) = self
            .list_state
            .selected()
            .and_then(|i| self.all_repos.get(i))
            .cloned()
        else {
            return Ok(());
        };
        self.toggle(&address)
    }

    /// Unhide everything and persist.
    pub fn show_all(&mut self) -> Result<()> {
        self.hidden.clear();
        self.save()
    }

    pub fn open_filter(&mut self) {
        self.filter_open = true;
        if self.list_state.selected().is_none() && !self.all_repos.is_empty() {
            self.list_state.select(Some(0));
        }
    }

    pub fn close_filter(&mut self) {
        self.filter_open = false;
    }

    pub fn select_next(&mut self) {
        if self.all_repos.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1).min(self.all_repos.len() - 1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_prev(&mut self) {
        if self.all_repos.is_empty() {
            return;
        }
        let i = self.list_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.list_state.select(Some(i));
    }

    /// Persist hidden keys, dropping repositories that left the workspace.
    fn save(&mut self) -> Result<()> {
        if !self.all_repos.is_empty() {
            let known: BTreeSet<String> = self.all_repos.iter().map(RepoAddress::as_key).collect();
            self.hidden.retain(|key| known.contains(key));
        }
        if let Some(path) = &self.store_path {
            let keys: Vec<&String> = self.hidden.iter().collect();
            cache::write_cached(path, &keys)?;
            tracing::debug!(hidden = keys.len(), "saved hidden repositories");
        }
        Ok(())
    }
}
