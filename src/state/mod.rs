// State management module.
// Holds the jobs tab, repository visibility, and refresh scheduling state.

pub mod jobs;
pub mod query;
pub mod refresh;
pub mod visibility;

pub use jobs::{JobsTabState, TableRow};
pub use refresh::{Console, ConsoleLevel, ConsoleMessage, RefreshState, RefreshStatus};
pub use visibility::VisibilityState;
