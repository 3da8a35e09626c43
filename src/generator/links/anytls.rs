use crate::error::LinkError;
use crate::models::proxy::require;
use crate::models::AnyTlsRecord;
use crate::utils::host::normalize_host;
use crate::utils::query::QueryBuilder;
use crate::utils::url::{fragment, url_encode};

const PROTOCOL: &str = "anytls";

/// Format: anytls://password@server:port?query#name
pub fn anytls_link(record: &AnyTlsRecord) -> Result<String, LinkError> {
    let server = record.endpoint.server(PROTOCOL)?;
    let port = record.endpoint.port(PROTOCOL)?;
    let password = require(&record.password, PROTOCOL, "password")?;
    let tls = &record.tls;

    let mut query = QueryBuilder::new();
    query
        .set_opt("sni", tls.sni())
        .set_if("insecure", tls.skip_cert_verify(), "1");
    if let Some(alpn) = tls.alpn_joined() {
        query.set("alpn", alpn);
    }

    Ok(format!(
        "anytls://{}@{}:{}{}{}",
        url_encode(password),
        normalize_host(server),
        port,
        query.to_suffix(),
        fragment(record.endpoint.name.as_deref())
    ))
}
