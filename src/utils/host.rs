use std::borrow::Cow;
use std::net::Ipv6Addr;

/// Prepares a server address for the host position of a URI.
///
/// Literal IPv6 addresses are wrapped in brackets; anything else, including
/// hostnames, IPv4 addresses, already-bracketed literals and the empty
/// string, is returned unchanged.
pub fn normalize_host(host: &str) -> Cow<'_, str> {
    if host.parse::<Ipv6Addr>().is_ok() {
        Cow::Owned(format!("[{}]", host))
    } else {
        Cow::Borrowed(host)
    }
}
