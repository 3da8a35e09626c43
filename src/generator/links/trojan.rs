use crate::error::LinkError;
use crate::models::proxy::require;
use crate::models::TrojanRecord;
use crate::utils::host::normalize_host;
use crate::utils::query::QueryBuilder;
use crate::utils::url::{fragment, url_encode};

const PROTOCOL: &str = "trojan";

/// Format: trojan://password@server:port?query#name
///
/// TLS is assumed unless the record sets `tls: false`.
pub fn trojan_link(record: &TrojanRecord) -> Result<String, LinkError> {
    let server = record.endpoint.server(PROTOCOL)?;
    let port = record.endpoint.port(PROTOCOL)?;
    let password = require(&record.password, PROTOCOL, "password")?;
    let tls = &record.tls;
    let transport = &record.transport;

    let mut query = QueryBuilder::new();
    if tls.enabled_by_default() {
        query
            .set("security", if tls.is_reality() { "reality" } else { "tls" })
            .set_opt("sni", tls.sni())
            .set_if("allowInsecure", tls.skip_cert_verify(), "1");
    } else {
        query.set("security", "none");
    }

    match transport.network() {
        Some("tcp") | None => {}
        Some(network) => {
            query.set("type", network);
            match network {
                "ws" => {
                    query
                        .set_opt("host", transport.ws_host())
                        .set_opt("path", transport.ws_path());
                }
                "grpc" => {
                    query.set_opt("serviceName", transport.grpc_service_name());
                }
                _ => {}
            }
        }
    }

    Ok(format!(
        "trojan://{}@{}:{}{}{}",
        url_encode(password),
        normalize_host(server),
        port,
        query.to_suffix(),
        fragment(record.endpoint.name.as_deref())
    ))
}
