//! Extraction of the `proxies` list from a Clash document.

use log::debug;
use serde_yaml::Value as YamlValue;
use std::path::Path;

use crate::error::LinkError;
use crate::generator::links::{build_links_from_values, DiagnosticSink};

/// Parse a Clash configuration and return its raw proxy entries
///
/// Accepts a full document with a `proxies` key or a bare sequence of
/// proxies. Both YAML and JSON input work, JSON being a subset of YAML.
///
/// # Errors
/// `InvalidInput` if the content is not YAML, or the proxy list is missing
/// or not a sequence.
pub fn parse_clash_proxies(content: &str) -> Result<Vec<YamlValue>, LinkError> {
    let document: YamlValue = serde_yaml::from_str(content)
        .map_err(|e| LinkError::InvalidInput(format!("Failed to parse Clash YAML: {}", e)))?;

    let proxies = match document {
        YamlValue::Sequence(proxies) => proxies,
        YamlValue::Mapping(mut map) => match map.remove("proxies") {
            Some(YamlValue::Sequence(proxies)) => proxies,
            Some(YamlValue::Null) => Vec::new(),
            Some(_) => {
                return Err(LinkError::InvalidInput(
                    "`proxies` is not a sequence".to_string(),
                ))
            }
            None => {
                return Err(LinkError::InvalidInput(
                    "document has no `proxies` section".to_string(),
                ))
            }
        },
        _ => {
            return Err(LinkError::InvalidInput(
                "expected a mapping or a sequence of proxies".to_string(),
            ))
        }
    };

    debug!("Found {} proxies in Clash document", proxies.len());
    Ok(proxies)
}

/// Read a Clash configuration file and return its raw proxy entries
pub fn parse_clash_file(path: impl AsRef<Path>) -> Result<Vec<YamlValue>, LinkError> {
    let content = std::fs::read_to_string(path)?;
    parse_clash_proxies(&content)
}

/// Parse a Clash document and convert every proxy to a share link
pub fn links_from_clash<S: DiagnosticSink>(content: &str, sink: S) -> Result<Vec<String>, LinkError> {
    let proxies = parse_clash_proxies(content)?;
    Ok(build_links_from_values(&proxies, sink))
}
