use crate::error::LinkError;
use crate::models::options::non_empty;
use crate::models::proxy::require;
use crate::models::VlessRecord;
use crate::utils::host::normalize_host;
use crate::utils::query::QueryBuilder;
use crate::utils::url::fragment;

const PROTOCOL: &str = "vless";

/// Format: vless://uuid@server:port?query#name
pub fn vless_link(record: &VlessRecord) -> Result<String, LinkError> {
    let server = record.endpoint.server(PROTOCOL)?;
    let port = record.endpoint.port(PROTOCOL)?;
    let uuid = require(&record.uuid, PROTOCOL, "uuid")?;
    let tls = &record.tls;
    let transport = &record.transport;

    let mut query = QueryBuilder::new();
    query
        .set("encryption", non_empty(&record.encryption).unwrap_or("none"))
        .set_opt("flow", record.flow.as_deref())
        .set("type", transport.network_or_tcp());

    if tls.enabled() {
        let reality = tls.reality_opts.as_ref();
        query
            .set("security", if tls.is_reality() { "reality" } else { "tls" })
            .set_opt("sni", tls.servername())
            .set_opt("fp", tls.fingerprint())
            .set_if("allowInsecure", tls.skip_cert_verify(), "1")
            .set_opt("pbk", reality.and_then(|r| r.public_key.as_deref()))
            .set_opt("sid", reality.and_then(|r| r.short_id.as_deref()));
    } else {
        query.set("security", "none");
    }

    if transport.network() == Some("ws") {
        query
            .set_opt("host", transport.ws_host())
            .set_opt("path", transport.ws_path());
    }

    Ok(format!(
        "vless://{}@{}:{}{}{}",
        uuid,
        normalize_host(server),
        port,
        query.to_suffix(),
        fragment(record.endpoint.name.as_deref())
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Endpoint, RealityOptions, TlsOptions, TransportOptions, WsOptions};
    use std::collections::HashMap;

    const UUID: &str = "11111111-2222-3333-4444-555555555555";

    fn base() -> VlessRecord {
        VlessRecord {
            endpoint: Endpoint::new("VL", "example.com", 443),
            uuid: Some(UUID.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_vless_plain() {
        assert_eq!(
            vless_link(&base()).unwrap(),
            format!("vless://{}@example.com:443?encryption=none&type=tcp&security=none#VL", UUID)
        );
    }

    #[test]
    fn test_vless_reality() {
        let mut record = base();
        record.flow = Some("xtls-rprx-vision".to_string());
        record.tls = TlsOptions {
            tls: Some(true),
            servername: Some("www.microsoft.com".to_string()),
            client_fingerprint: Some("chrome".to_string()),
            reality_opts: Some(RealityOptions {
                public_key: Some("PBK".to_string()),
                short_id: Some("ab12".to_string()),
            }),
            ..Default::default()
        };
        assert_eq!(
            vless_link(&record).unwrap(),
            format!(
                "vless://{}@example.com:443?encryption=none&flow=xtls-rprx-vision&type=tcp\
                 &security=reality&sni=www.microsoft.com&fp=chrome&pbk=PBK&sid=ab12#VL",
                UUID
            )
        );
    }

    #[test]
    fn test_vless_ws_tls() {
        let mut headers = HashMap::new();
        headers.insert("Host".to_string(), "cdn.example.com".to_string());
        let mut record = base();
        record.endpoint.server = Some("2001:db8::1".to_string());
        record.tls = TlsOptions {
            tls: Some(true),
            skip_cert_verify: Some(true),
            ..Default::default()
        };
        record.transport = TransportOptions {
            network: Some("ws".to_string()),
            ws_opts: Some(WsOptions {
                path: Some("/vl".to_string()),
                headers: Some(headers),
            }),
            grpc_opts: None,
        };
        assert_eq!(
            vless_link(&record).unwrap(),
            format!(
                "vless://{}@[2001:db8::1]:443?encryption=none&type=ws&security=tls\
                 &allowInsecure=1&host=cdn.example.com&path=%2Fvl#VL",
                UUID
            )
        );
    }
}
