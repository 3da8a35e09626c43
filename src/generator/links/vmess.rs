use serde::Serialize;

use crate::error::LinkError;
use crate::models::options::non_empty;
use crate::models::proxy::require;
use crate::models::VMessRecord;
use crate::utils::base64::base64_encode;

const PROTOCOL: &str = "vmess";

/// The v2rayN share JSON. Field order here is the serialized key order.
#[derive(Debug, Serialize)]
struct VMessShare<'a> {
    v: &'static str,
    ps: &'a str,
    add: &'a str,
    port: u16,
    id: &'a str,
    aid: u32,
    scy: &'a str,
    net: &'a str,
    #[serde(rename = "type")]
    header_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    host: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sni: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tls: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    insecure: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    alpn: Option<String>,
}

/// Format: vmess://BASE64(JSON)
///
/// `add` carries the server exactly as configured; IPv6 literals are not
/// bracketed inside the JSON payload.
pub fn vmess_link(record: &VMessRecord) -> Result<String, LinkError> {
    let server = record.endpoint.server(PROTOCOL)?;
    let port = record.endpoint.port(PROTOCOL)?;
    let uuid = require(&record.uuid, PROTOCOL, "uuid")?;

    let share = VMessShare {
        v: "2",
        ps: non_empty(&record.endpoint.name).unwrap_or_default(),
        add: server,
        port,
        id: uuid,
        aid: record.alter_id.unwrap_or(0),
        scy: non_empty(&record.cipher).unwrap_or("auto"),
        net: record.transport.network_or_tcp(),
        header_type: "none",
        host: record.transport.ws_host(),
        path: record.transport.ws_path(),
        sni: record.tls.servername(),
        tls: record.tls.enabled().then_some("tls"),
        insecure: record.tls.skip_cert_verify().then_some(1),
        alpn: record.tls.alpn_joined(),
    };

    let json = serde_json::to_string(&share)?;
    Ok(format!("vmess://{}", base64_encode(&json)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Endpoint, TlsOptions, TransportOptions, WsOptions};
    use crate::utils::base64::base64_decode;
    use std::collections::HashMap;

    fn decode(link: &str) -> String {
        base64_decode(link.strip_prefix("vmess://").unwrap())
    }

    fn minimal() -> VMessRecord {
        VMessRecord {
            endpoint: Endpoint::new("V", "2001:db8::1", 443),
            uuid: Some("b831381d-6324-4d53-ad4f-8cda48b30811".to_string()),
            alter_id: Some(0),
            cipher: Some("auto".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_vmess_minimal_payload() {
        let json = decode(&vmess_link(&minimal()).unwrap());
        assert_eq!(
            json,
            r#"{"v":"2","ps":"V","add":"2001:db8::1","port":443,"id":"b831381d-6324-4d53-ad4f-8cda48b30811","aid":0,"scy":"auto","net":"tcp","type":"none"}"#
        );
    }

    #[test]
    fn test_vmess_full_payload_order() {
        let mut headers = HashMap::new();
        headers.insert("Host".to_string(), "cdn.example.com".to_string());
        let mut record = minimal();
        record.endpoint.server = Some("example.com".to_string());
        record.tls = TlsOptions {
            tls: Some(true),
            servername: Some("sni.example.com".to_string()),
            skip_cert_verify: Some(true),
            alpn: Some(vec!["h2".to_string(), "http/1.1".to_string()]),
            ..Default::default()
        };
        record.transport = TransportOptions {
            network: Some("ws".to_string()),
            ws_opts: Some(WsOptions {
                path: Some("/ray".to_string()),
                headers: Some(headers),
            }),
            grpc_opts: None,
        };

        let json = decode(&vmess_link(&record).unwrap());
        assert_eq!(
            json,
            r#"{"v":"2","ps":"V","add":"example.com","port":443,"id":"b831381d-6324-4d53-ad4f-8cda48b30811","aid":0,"scy":"auto","net":"ws","type":"none","host":"cdn.example.com","path":"/ray","sni":"sni.example.com","tls":"tls","insecure":1,"alpn":"h2,http/1.1"}"#
        );
    }

    #[test]
    fn test_vmess_empty_alpn_omitted() {
        let mut record = minimal();
        record.tls.alpn = Some(vec![]);
        record.tls.tls = Some(false);
        let json = decode(&vmess_link(&record).unwrap());
        assert!(!json.contains("alpn"));
        assert!(!json.contains("\"tls\""));
    }

    #[test]
    fn test_vmess_missing_uuid() {
        let mut record = minimal();
        record.uuid = None;
        assert!(matches!(
            vmess_link(&record),
            Err(LinkError::MissingField { field: "uuid", .. })
        ));
    }
}
