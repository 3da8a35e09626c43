//! Proxy record definitions
//!
//! A [`ProxyRecord`] is one entry of a Clash `proxies` list, keyed by its
//! `type` field. Each variant owns its own field set; values shared between
//! variants only by name (such as `password`) are never merged.

use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use std::fmt;

use super::options::{non_empty, TlsOptions, TransportOptions};
use crate::error::LinkError;

/// Accepts a string or a number and keeps it as a string.
fn deserialize_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct StringOrNumberVisitor;

    impl<'de> Visitor<'de> for StringOrNumberVisitor {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("string or number")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(StringOrNumberVisitor)
}

/// Accepts a port as a number or a numeric string.
fn deserialize_port<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    match deserialize_string_or_number(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<u16>()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid port: {}", raw))),
    }
}

/// Accepts `alterId` as a number or a numeric string.
fn deserialize_alter_id<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match deserialize_string_or_number(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<u32>()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid alterId: {}", raw))),
    }
}

/// Name, server and port, carried by every variant.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Endpoint {
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    pub name: Option<String>,
    #[serde(default)]
    pub server: Option<String>,
    #[serde(default, deserialize_with = "deserialize_port")]
    pub port: Option<u16>,
}

impl Endpoint {
    pub fn new(name: &str, server: &str, port: u16) -> Self {
        Endpoint {
            name: Some(name.to_string()),
            server: Some(server.to_string()),
            port: Some(port),
        }
    }

    pub fn server(&self, protocol: &'static str) -> Result<&str, LinkError> {
        require(&self.server, protocol, "server")
    }

    pub fn port(&self, protocol: &'static str) -> Result<u16, LinkError> {
        self.port.ok_or(LinkError::MissingField {
            protocol,
            field: "port",
        })
    }
}

/// Returns the field value or a `MissingField` error when absent or empty.
pub fn require<'a>(
    value: &'a Option<String>,
    protocol: &'static str,
    field: &'static str,
) -> Result<&'a str, LinkError> {
    non_empty(value).ok_or(LinkError::MissingField { protocol, field })
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ShadowsocksRecord {
    #[serde(flatten)]
    pub endpoint: Endpoint,
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    pub cipher: Option<String>,
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Socks5Record {
    #[serde(flatten)]
    pub endpoint: Endpoint,
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VMessRecord {
    #[serde(flatten)]
    pub endpoint: Endpoint,
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    pub uuid: Option<String>,
    #[serde(rename = "alterId", default, deserialize_with = "deserialize_alter_id")]
    pub alter_id: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    pub cipher: Option<String>,
    #[serde(flatten)]
    pub tls: TlsOptions,
    #[serde(flatten)]
    pub transport: TransportOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VlessRecord {
    #[serde(flatten)]
    pub endpoint: Endpoint,
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    pub uuid: Option<String>,
    #[serde(default)]
    pub flow: Option<String>,
    #[serde(default)]
    pub encryption: Option<String>,
    #[serde(flatten)]
    pub tls: TlsOptions,
    #[serde(flatten)]
    pub transport: TransportOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TrojanRecord {
    #[serde(flatten)]
    pub endpoint: Endpoint,
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    pub password: Option<String>,
    #[serde(flatten)]
    pub tls: TlsOptions,
    #[serde(flatten)]
    pub transport: TransportOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Hysteria2Record {
    #[serde(flatten)]
    pub endpoint: Endpoint,
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    pub password: Option<String>,
    /// Port-hopping range, e.g. `20000-30000/40000`.
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    pub ports: Option<String>,
    #[serde(default)]
    pub obfs: Option<String>,
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    pub obfs_password: Option<String>,
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    pub up: Option<String>,
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    pub down: Option<String>,
    #[serde(flatten)]
    pub tls: TlsOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TuicRecord {
    #[serde(flatten)]
    pub endpoint: Endpoint,
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    pub uuid: Option<String>,
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    pub password: Option<String>,
    #[serde(default, alias = "congestion-control")]
    pub congestion_controller: Option<String>,
    #[serde(default)]
    pub udp_relay_mode: Option<String>,
    #[serde(default)]
    pub disable_sni: Option<bool>,
    #[serde(flatten)]
    pub tls: TlsOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AnyTlsRecord {
    #[serde(flatten)]
    pub endpoint: Endpoint,
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    pub password: Option<String>,
    #[serde(flatten)]
    pub tls: TlsOptions,
}

/// One Clash proxy entry, discriminated by `type`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum ProxyRecord {
    #[serde(rename = "ss")]
    Shadowsocks(ShadowsocksRecord),
    #[serde(rename = "socks5")]
    Socks5(Socks5Record),
    #[serde(rename = "vmess")]
    VMess(VMessRecord),
    #[serde(rename = "vless")]
    Vless(VlessRecord),
    #[serde(rename = "trojan")]
    Trojan(TrojanRecord),
    #[serde(rename = "hysteria2")]
    Hysteria2(Hysteria2Record),
    #[serde(rename = "tuic")]
    Tuic(TuicRecord),
    #[serde(rename = "anytls")]
    AnyTls(AnyTlsRecord),
    // Any other proxy type is carried through and ignored
    #[serde(other)]
    Unknown,
}

/// `type` values that map to a share-link scheme.
pub const SUPPORTED_TYPES: [&str; 8] = [
    "ss",
    "socks5",
    "vmess",
    "vless",
    "trojan",
    "hysteria2",
    "tuic",
    "anytls",
];

impl ProxyRecord {
    pub fn is_supported_type(tag: &str) -> bool {
        SUPPORTED_TYPES.contains(&tag)
    }

    pub fn endpoint(&self) -> Option<&Endpoint> {
        match self {
            ProxyRecord::Shadowsocks(r) => Some(&r.endpoint),
            ProxyRecord::Socks5(r) => Some(&r.endpoint),
            ProxyRecord::VMess(r) => Some(&r.endpoint),
            ProxyRecord::Vless(r) => Some(&r.endpoint),
            ProxyRecord::Trojan(r) => Some(&r.endpoint),
            ProxyRecord::Hysteria2(r) => Some(&r.endpoint),
            ProxyRecord::Tuic(r) => Some(&r.endpoint),
            ProxyRecord::AnyTls(r) => Some(&r.endpoint),
            ProxyRecord::Unknown => None,
        }
    }

    /// Display name of the record, if it has a non-empty one.
    pub fn name(&self) -> Option<&str> {
        self.endpoint().and_then(|e| non_empty(&e.name))
    }

    /// URI scheme produced for this record; `None` for unsupported types.
    pub fn scheme(&self) -> Option<&'static str> {
        match self {
            ProxyRecord::Shadowsocks(_) => Some("ss"),
            ProxyRecord::Socks5(_) => Some("socks5"),
            ProxyRecord::VMess(_) => Some("vmess"),
            ProxyRecord::Vless(_) => Some("vless"),
            ProxyRecord::Trojan(_) => Some("trojan"),
            ProxyRecord::Hysteria2(_) => Some("hysteria2"),
            ProxyRecord::Tuic(_) => Some("tuic"),
            ProxyRecord::AnyTls(_) => Some("anytls"),
            ProxyRecord::Unknown => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> ProxyRecord {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_deserialize_vless_reality() {
        let record = parse(
            r#"
name: "VL"
type: vless
server: example.com
port: "443"
uuid: 11111111-2222-3333-4444-555555555555
flow: xtls-rprx-vision
tls: true
servername: www.microsoft.com
client-fingerprint: chrome
reality-opts:
  public-key: PUBKEY
  short-id: "0123"
network: tcp
"#,
        );

        let ProxyRecord::Vless(vless) = record else {
            panic!("expected vless record");
        };
        assert_eq!(vless.endpoint.port, Some(443));
        assert_eq!(vless.tls.servername(), Some("www.microsoft.com"));
        assert_eq!(vless.tls.fingerprint(), Some("chrome"));
        let reality = vless.tls.reality_opts.unwrap();
        assert_eq!(reality.public_key.as_deref(), Some("PUBKEY"));
        assert_eq!(reality.short_id.as_deref(), Some("0123"));
    }

    #[test]
    fn test_deserialize_numeric_fields_as_strings() {
        let record = parse(
            r#"
name: 42
type: hysteria2
server: 1.2.3.4
port: 443
password: pw
ports: 20000
up: 100
down: "200 Mbps"
sni: hy.example.com
"#,
        );

        let ProxyRecord::Hysteria2(hy) = record else {
            panic!("expected hysteria2 record");
        };
        assert_eq!(hy.endpoint.name.as_deref(), Some("42"));
        assert_eq!(hy.ports.as_deref(), Some("20000"));
        assert_eq!(hy.up.as_deref(), Some("100"));
        assert_eq!(hy.down.as_deref(), Some("200 Mbps"));
        assert_eq!(hy.tls.sni(), Some("hy.example.com"));
    }

    #[test]
    fn test_unknown_type() {
        let record = parse("name: W\ntype: wireguard\nserver: 1.1.1.1\nport: 51820\n");
        assert_eq!(record, ProxyRecord::Unknown);
        assert_eq!(record.name(), None);
        assert_eq!(record.scheme(), None);
    }

    #[test]
    fn test_missing_port_still_decodes() {
        let record = parse("name: A\ntype: ss\nserver: 1.2.3.4\ncipher: aes-128-gcm\npassword: x\n");
        let endpoint = record.endpoint().unwrap();
        assert_eq!(endpoint.port, None);
        assert!(matches!(
            endpoint.port("ss"),
            Err(LinkError::MissingField { field: "port", .. })
        ));
    }

    #[test]
    fn test_invalid_port_rejected() {
        let result: Result<ProxyRecord, _> =
            serde_yaml::from_str("name: A\ntype: ss\nserver: h\nport: abc\n");
        assert!(result.is_err());
    }
}
