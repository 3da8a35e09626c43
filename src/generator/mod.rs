pub mod links;
pub mod subscription;

pub use links::{
    build_links, build_links_from_values, build_links_with, proxy_to_link, DiagnosticSink,
    LogSink,
};
pub use subscription::subscription_body;
