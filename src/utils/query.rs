//! Ordered query-string assembly for share links.

use linked_hash_map::LinkedHashMap;

use super::url::url_encode;

/// Collects `key=value` pairs in insertion order.
///
/// Values are percent-encoded on output, keys are written verbatim. Setting
/// an existing key replaces its value but keeps its original position.
#[derive(Debug, Default, Clone)]
pub struct QueryBuilder {
    params: LinkedHashMap<&'static str, String>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &'static str, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        match self.params.get_mut(key) {
            Some(existing) => *existing = value,
            None => {
                self.params.insert(key, value);
            }
        }
        self
    }

    /// Sets the key only when a non-empty value is present.
    pub fn set_opt(&mut self, key: &'static str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.set(key, value);
        }
        self
    }

    /// Sets the key only when `condition` holds.
    pub fn set_if(&mut self, key: &'static str, condition: bool, value: &str) -> &mut Self {
        if condition {
            self.set(key, value);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// `key=value` pairs joined with `&`, without a leading `?`.
    pub fn to_query_string(&self) -> String {
        self.params
            .iter()
            .map(|(key, value)| format!("{}={}", key, url_encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// The query with a leading `?`, or an empty string when nothing was set.
    pub fn to_suffix(&self) -> String {
        if self.is_empty() {
            String::new()
        } else {
            format!("?{}", self.to_query_string())
        }
    }
}
