// Error types for jobdeck.
// Covers GraphQL transport failures, config problems, and cache IO.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum JobdeckError {
    #[error("GraphQL request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("GraphQL errors: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("GraphQL endpoint not found: {0}")]
    NotFound(String),

    #[error("Response had no data")]
    EmptyResponse,

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error in {path}: {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, JobdeckError>;
