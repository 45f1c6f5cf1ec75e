// Cache module for local filesystem persistence.
// Stores UI state that should survive restarts, such as hidden repositories.

pub mod paths;
pub mod store;

pub use store::{read_cached, write_cached};
