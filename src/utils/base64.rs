use base64::{engine::general_purpose, Engine as _};

/// Encodes a string to standard Base64, padded, without line wrapping.
pub fn base64_encode(input: &str) -> String {
    general_purpose::STANDARD.encode(input)
}

/// Decodes a standard Base64 string.
///
/// # Returns
/// The decoded string, or an empty string if the input is invalid.
pub fn base64_decode(input: &str) -> String {
    match general_purpose::STANDARD.decode(input.trim()) {
        Ok(decoded) => String::from_utf8_lossy(&decoded).to_string(),
        Err(_) => String::new(),
    }
}
