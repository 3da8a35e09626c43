pub mod error;
pub mod generator;
pub mod models;
pub mod parser;
pub mod utils;

// Re-export the main types for easier access
pub use error::LinkError;
pub use generator::{build_links, build_links_with, proxy_to_link, DiagnosticSink, LogSink};
pub use models::ProxyRecord;
