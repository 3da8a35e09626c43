//! URL encoding utilities

/// Percent-encodes a string for use as a single URI component
///
/// Everything except ASCII alphanumerics and `-._~` is escaped, so the
/// result is safe in user-info, query values and fragments alike.
///
/// # Examples
/// ```
/// use clash_links::utils::url::url_encode;
///
/// assert_eq!(url_encode("p@ss word"), "p%40ss%20word");
/// ```
pub fn url_encode(input: &str) -> String {
    // Also escapes `!*'()`, unlike JavaScript's encodeURIComponent
    urlencoding::encode(input).into_owned()
}

/// Formats the `#name` fragment, or nothing when the name is empty.
pub fn fragment(name: Option<&str>) -> String {
    match name {
        Some(name) if !name.is_empty() => format!("#{}", url_encode(name)),
        _ => String::new(),
    }
}
