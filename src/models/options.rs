//! Option blocks shared by several proxy variants.
//!
//! Clash keeps TLS settings flat on the proxy entry while transport extras
//! live in nested `*-opts` maps; both shapes are mirrored here so they can be
//! flattened into each variant that supports them.

use serde::Deserialize;
use std::collections::HashMap;

/// TLS settings as they appear on a Clash proxy entry.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TlsOptions {
    #[serde(default)]
    pub tls: Option<bool>,
    #[serde(default)]
    pub servername: Option<String>,
    #[serde(default)]
    pub sni: Option<String>,
    #[serde(default)]
    pub skip_cert_verify: Option<bool>,
    #[serde(default)]
    pub alpn: Option<Vec<String>>,
    #[serde(default)]
    pub client_fingerprint: Option<String>,
    #[serde(default)]
    pub reality_opts: Option<RealityOptions>,
}

impl TlsOptions {
    /// `true` only when `tls` is explicitly enabled.
    pub fn enabled(&self) -> bool {
        self.tls == Some(true)
    }

    /// `true` unless `tls` is explicitly disabled.
    pub fn enabled_by_default(&self) -> bool {
        self.tls != Some(false)
    }

    /// The `servername` key, used by vmess and vless.
    pub fn servername(&self) -> Option<&str> {
        non_empty(&self.servername)
    }

    /// The `sni` key, falling back to `servername`.
    pub fn sni(&self) -> Option<&str> {
        non_empty(&self.sni).or_else(|| self.servername())
    }

    pub fn skip_cert_verify(&self) -> bool {
        self.skip_cert_verify == Some(true)
    }

    pub fn fingerprint(&self) -> Option<&str> {
        non_empty(&self.client_fingerprint)
    }

    pub fn is_reality(&self) -> bool {
        self.reality_opts.is_some()
    }

    /// ALPN list joined with commas, `None` when the list is missing or empty.
    pub fn alpn_joined(&self) -> Option<String> {
        match &self.alpn {
            Some(list) if !list.is_empty() => Some(list.join(",")),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RealityOptions {
    #[serde(default)]
    pub public_key: Option<String>,
    #[serde(default)]
    pub short_id: Option<String>,
}

/// Transport selection plus the per-network extras.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TransportOptions {
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default)]
    pub ws_opts: Option<WsOptions>,
    #[serde(default)]
    pub grpc_opts: Option<GrpcOptions>,
}

impl TransportOptions {
    pub fn network(&self) -> Option<&str> {
        non_empty(&self.network)
    }

    /// Network name, falling back to `tcp`.
    pub fn network_or_tcp(&self) -> &str {
        self.network().unwrap_or("tcp")
    }

    pub fn ws_host(&self) -> Option<&str> {
        self.ws_opts.as_ref().and_then(WsOptions::host)
    }

    pub fn ws_path(&self) -> Option<&str> {
        self.ws_opts.as_ref().and_then(|ws| non_empty(&ws.path))
    }

    pub fn grpc_service_name(&self) -> Option<&str> {
        self.grpc_opts
            .as_ref()
            .and_then(|grpc| non_empty(&grpc.grpc_service_name))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WsOptions {
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub headers: Option<HashMap<String, String>>,
}

impl WsOptions {
    /// The `Host` header, matched case-insensitively.
    pub fn host(&self) -> Option<&str> {
        self.headers.as_ref().and_then(|headers| {
            headers
                .iter()
                .find(|(key, value)| key.eq_ignore_ascii_case("host") && !value.is_empty())
                .map(|(_, value)| value.as_str())
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GrpcOptions {
    #[serde(default)]
    pub grpc_service_name: Option<String>,
}

/// Treat `Some("")` the same as `None`.
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
