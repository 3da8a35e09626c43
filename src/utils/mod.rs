pub mod base64;
pub mod host;
pub mod query;
pub mod url;

// Re-export common utilities
pub use host::normalize_host;
pub use query::QueryBuilder;
