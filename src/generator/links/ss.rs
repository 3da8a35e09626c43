use crate::error::LinkError;
use crate::models::proxy::{require, ShadowsocksRecord};
use crate::utils::base64::base64_encode;
use crate::utils::host::normalize_host;
use crate::utils::url::fragment;

const PROTOCOL: &str = "ss";

/// Format: ss://BASE64(cipher:password)@server:port#name
pub fn ss_link(record: &ShadowsocksRecord) -> Result<String, LinkError> {
    let server = record.endpoint.server(PROTOCOL)?;
    let port = record.endpoint.port(PROTOCOL)?;
    let cipher = require(&record.cipher, PROTOCOL, "cipher")?;
    let password = require(&record.password, PROTOCOL, "password")?;

    let user_info = base64_encode(&format!("{}:{}", cipher, password));

    Ok(format!(
        "ss://{}@{}:{}{}",
        user_info,
        normalize_host(server),
        port,
        fragment(record.endpoint.name.as_deref())
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Endpoint;

    fn record(server: &str) -> ShadowsocksRecord {
        ShadowsocksRecord {
            endpoint: Endpoint::new("A", server, 8388),
            cipher: Some("aes-256-gcm".to_string()),
            password: Some("pw".to_string()),
        }
    }

    #[test]
    fn test_ss_link() {
        assert_eq!(
            ss_link(&record("1.2.3.4")).unwrap(),
            format!("ss://{}@1.2.3.4:8388#A", base64_encode("aes-256-gcm:pw"))
        );
    }

    #[test]
    fn test_ss_ipv6_host() {
        let link = ss_link(&record("2001:db8::1")).unwrap();
        assert!(link.contains("@[2001:db8::1]:8388#A"));
    }

    #[test]
    fn test_ss_missing_password() {
        let mut ss = record("1.2.3.4");
        ss.password = None;
        assert!(matches!(
            ss_link(&ss),
            Err(LinkError::MissingField { field: "password", .. })
        ));
    }
}
