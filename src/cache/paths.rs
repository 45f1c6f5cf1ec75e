// Filesystem locations for jobdeck.
// Config, persisted UI state, and the log file live under the platform project dirs.

use std::path::PathBuf;

use directories::ProjectDirs;

const APP_NAME: &str = "jobdeck";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", APP_NAME)
}

/// Get the base cache directory (~/.cache/jobdeck on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Get the config directory (~/.config/jobdeck on Linux).
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Default config file path.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// Persisted set of repositories hidden from the overview, per endpoint.
pub fn hidden_repos_path(endpoint: &str) -> Option<PathBuf> {
    cache_dir().map(|dir| {
        dir.join("endpoints")
            .join(sanitize_name(endpoint))
            .join("hidden_repos.json")
    })
}

/// Path to the log file.
pub fn log_path() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("jobdeck.log"))
}

/// Sanitize a name for use in filesystem paths.
/// Replaces problematic characters with underscores.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("simple"), "simple");
        assert_eq!(
            sanitize_name("http://localhost:3000/graphql"),
            "http___localhost_3000_graphql"
        );
    }

    #[test]
    fn test_paths() {
        // Path construction only; nothing touches the filesystem.
        let Some(hidden) = hidden_repos_path("http://localhost:3000/graphql") else {
            return;
        };
        assert!(hidden.ends_with("endpoints/http___localhost_3000_graphql/hidden_repos.json"));
        assert!(log_path().unwrap().ends_with("jobdeck.log"));
        assert!(config_path().unwrap().ends_with("config.toml"));
    }
}
