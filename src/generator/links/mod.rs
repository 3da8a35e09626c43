//! Share-link generation for Clash proxy records.
//!
//! [`build_links`] walks a proxy list in order and turns each supported
//! record into one URI. A record that cannot be encoded is reported to a
//! [`DiagnosticSink`] and skipped; unsupported proxy types are skipped
//! silently.

mod anytls;
mod hysteria2;
mod socks5;
mod ss;
mod trojan;
mod tuic;
mod vless;
mod vmess;

pub use anytls::anytls_link;
pub use hysteria2::hysteria2_link;
pub use socks5::socks5_link;
pub use ss::ss_link;
pub use trojan::trojan_link;
pub use tuic::tuic_link;
pub use vless::vless_link;
pub use vmess::vmess_link;

use log::{debug, warn};
use serde_yaml::Value as YamlValue;

use crate::error::LinkError;
use crate::models::ProxyRecord;

/// Name used in diagnostics for records without one.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Receives `(record name, failure reason)` for every skipped record.
pub trait DiagnosticSink {
    fn report(&mut self, name: &str, reason: &str);
}

/// Sends diagnostics to the `log` facade at warn level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&mut self, name: &str, reason: &str) {
        warn!("Skipping proxy '{}': {}", name, reason);
    }
}

/// Collects diagnostics in order.
impl DiagnosticSink for Vec<(String, String)> {
    fn report(&mut self, name: &str, reason: &str) {
        self.push((name.to_string(), reason.to_string()));
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn report(&mut self, name: &str, reason: &str) {
        (**self).report(name, reason);
    }
}

/// Convert one record to its share link
///
/// # Returns
/// * `Ok(Some(link))` for a supported record
/// * `Ok(None)` when the proxy type has no link format
/// * `Err(_)` when the record lacks a field the link requires
pub fn proxy_to_link(record: &ProxyRecord) -> Result<Option<String>, LinkError> {
    let link = match record {
        ProxyRecord::Shadowsocks(ss) => ss_link(ss)?,
        ProxyRecord::Socks5(socks) => socks5_link(socks)?,
        ProxyRecord::VMess(vmess) => vmess_link(vmess)?,
        ProxyRecord::Vless(vless) => vless_link(vless)?,
        ProxyRecord::Trojan(trojan) => trojan_link(trojan)?,
        ProxyRecord::Hysteria2(hy2) => hysteria2_link(hy2)?,
        ProxyRecord::Tuic(tuic) => tuic_link(tuic)?,
        ProxyRecord::AnyTls(anytls) => anytls_link(anytls)?,
        ProxyRecord::Unknown => return Ok(None),
    };
    Ok(Some(link))
}

/// Convert records to share links, logging skipped records
pub fn build_links(records: &[ProxyRecord]) -> Vec<String> {
    build_links_with(records, LogSink)
}

/// Convert records to share links, reporting skipped records to `sink`
///
/// Output keeps input order. Never fails: bad records are dropped.
pub fn build_links_with<S: DiagnosticSink>(records: &[ProxyRecord], mut sink: S) -> Vec<String> {
    let mut links = Vec::with_capacity(records.len());

    for record in records {
        collect_link(record, &mut links, &mut sink);
    }

    debug!("Built {} links from {} records", links.len(), records.len());
    links
}

/// Convert raw (undecoded) records to share links
///
/// Each entry is decoded on its own, so a record whose fields have the
/// wrong shape is reported and skipped like any other failing record.
pub fn build_links_from_values<S: DiagnosticSink>(values: &[YamlValue], mut sink: S) -> Vec<String> {
    let mut links = Vec::with_capacity(values.len());

    for value in values {
        // Missing, non-string and unknown discriminators are all unsupported
        match value.get("type").and_then(YamlValue::as_str) {
            Some(tag) if ProxyRecord::is_supported_type(tag) => {}
            _ => {
                debug!("Ignoring unsupported proxy type");
                continue;
            }
        }

        match serde_yaml::from_value::<ProxyRecord>(value.clone()) {
            Ok(record) => collect_link(&record, &mut links, &mut sink),
            Err(e) => sink.report(
                &value_name(value),
                &LinkError::Decode(e.to_string()).to_string(),
            ),
        }
    }

    debug!("Built {} links from {} values", links.len(), values.len());
    links
}

fn collect_link<S: DiagnosticSink>(record: &ProxyRecord, links: &mut Vec<String>, sink: &mut S) {
    match proxy_to_link(record) {
        Ok(Some(link)) => links.push(link),
        Ok(None) => debug!("Ignoring unsupported proxy type"),
        Err(e) => sink.report(record.name().unwrap_or(UNKNOWN_NAME), &e.to_string()),
    }
}

fn value_name(value: &YamlValue) -> String {
    match value.get("name") {
        Some(YamlValue::String(name)) if !name.is_empty() => name.clone(),
        Some(YamlValue::Number(number)) => number.to_string(),
        _ => UNKNOWN_NAME.to_string(),
    }
}
