// GraphQL response types for the workspace query.
// Union types are decoded from `__typename` into tagged enums.

use serde::{Deserialize, Serialize};

/// Python error surfaced by the backend, used by every error union.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PythonError {
    pub message: String,
    #[serde(default)]
    pub stack: Vec<String>,
}

/// Top-level workspace result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "__typename")]
pub enum WorkspaceOrError {
    Workspace(Workspace),
    PythonError(PythonError),
}

/// A successfully resolved workspace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    #[serde(default)]
    pub location_entries: Vec<LocationEntry>,
}

/// One configured code location, loaded or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationEntry {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub location_or_load_error: Option<LocationOrLoadError>,
}

/// Per-location result. A failed location never affects its siblings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "__typename")]
pub enum LocationOrLoadError {
    RepositoryLocation(RepositoryLocation),
    PythonError(PythonError),
}

/// A loaded repository location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryLocation {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub repositories: Vec<Repository>,
}

/// A repository within a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub pipelines: Vec<Pipeline>,
}

/// Job-like entity: a classic pipeline or an asset-backed job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pipeline {
    pub id: String,
    pub name: String,
    pub is_job: bool,
}

/// `data` payload of `OverviewJobsQuery`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewJobsQuery {
    pub workspace_or_error: WorkspaceOrError,
}
