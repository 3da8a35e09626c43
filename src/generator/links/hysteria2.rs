use crate::error::LinkError;
use crate::models::options::non_empty;
use crate::models::proxy::require;
use crate::models::Hysteria2Record;
use crate::utils::host::normalize_host;
use crate::utils::query::QueryBuilder;
use crate::utils::url::{fragment, url_encode};

const PROTOCOL: &str = "hysteria2";

/// Clash writes hop ranges as `a-b/c`; share links expect `a-b,c`.
fn port_hopping(ports: &str) -> String {
    ports
        .replace('/', ",")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Format: hysteria2://password@server:port?query#name
pub fn hysteria2_link(record: &Hysteria2Record) -> Result<String, LinkError> {
    let server = record.endpoint.server(PROTOCOL)?;
    let port = record.endpoint.port(PROTOCOL)?;
    let password = require(&record.password, PROTOCOL, "password")?;
    let tls = &record.tls;

    let mut query = QueryBuilder::new();
    query.set_opt("sni", tls.sni());
    if let Some(ports) = non_empty(&record.ports) {
        query.set("mport", port_hopping(ports));
    }
    query.set_if("insecure", tls.skip_cert_verify(), "1");
    if let Some(obfs) = non_empty(&record.obfs) {
        query
            .set("obfs", obfs)
            .set_opt("obfs-password", record.obfs_password.as_deref());
    }
    query
        .set_opt("up", record.up.as_deref())
        .set_opt("down", record.down.as_deref());

    Ok(format!(
        "hysteria2://{}@{}:{}{}{}",
        url_encode(password),
        normalize_host(server),
        port,
        query.to_suffix(),
        fragment(record.endpoint.name.as_deref())
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Endpoint;

    fn base() -> Hysteria2Record {
        Hysteria2Record {
            endpoint: Endpoint::new("HY", "hy.example.com", 8443),
            password: Some("secret".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_port_hopping() {
        assert_eq!(port_hopping("20000-30000/ 40000"), "20000-30000,40000");
        assert_eq!(port_hopping(" 443 "), "443");
    }

    #[test]
    fn test_hysteria2_minimal() {
        assert_eq!(
            hysteria2_link(&base()).unwrap(),
            "hysteria2://secret@hy.example.com:8443#HY"
        );
    }

    #[test]
    fn test_hysteria2_full() {
        let mut record = base();
        record.tls.sni = Some("sni.example.com".to_string());
        record.tls.skip_cert_verify = Some(true);
        record.ports = Some("20000-30000/40000".to_string());
        record.obfs = Some("salamander".to_string());
        record.obfs_password = Some("ob fs".to_string());
        record.up = Some("50".to_string());
        record.down = Some("100".to_string());
        assert_eq!(
            hysteria2_link(&record).unwrap(),
            "hysteria2://secret@hy.example.com:8443?sni=sni.example.com\
             &mport=20000-30000%2C40000&insecure=1&obfs=salamander\
             &obfs-password=ob%20fs&up=50&down=100#HY"
        );
    }

    #[test]
    fn test_hysteria2_obfs_password_needs_obfs() {
        let mut record = base();
        record.obfs_password = Some("orphan".to_string());
        assert!(!hysteria2_link(&record).unwrap().contains("obfs"));
    }
}
