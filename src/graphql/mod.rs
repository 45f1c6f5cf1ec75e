// GraphQL API module.
// Provides the client and response types for the Dagit workspace query.

pub mod client;
pub mod query;
pub mod types;

pub use client::GraphQlClient;
pub use types::*;
