pub mod clash;

pub use clash::{links_from_clash, parse_clash_file, parse_clash_proxies};
