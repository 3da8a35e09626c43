use crate::error::LinkError;
use crate::models::options::non_empty;
use crate::models::Socks5Record;
use crate::utils::host::normalize_host;
use crate::utils::url::{fragment, url_encode};

const PROTOCOL: &str = "socks5";

/// Format: socks5://[username:password@]server:port#name
///
/// Credentials are only written when both halves are present.
pub fn socks5_link(record: &Socks5Record) -> Result<String, LinkError> {
    let server = record.endpoint.server(PROTOCOL)?;
    let port = record.endpoint.port(PROTOCOL)?;

    let user_info = match (non_empty(&record.username), non_empty(&record.password)) {
        (Some(username), Some(password)) => {
            format!("{}:{}@", url_encode(username), url_encode(password))
        }
        _ => String::new(),
    };

    Ok(format!(
        "socks5://{}{}:{}{}",
        user_info,
        normalize_host(server),
        port,
        fragment(record.endpoint.name.as_deref())
    ))
}
