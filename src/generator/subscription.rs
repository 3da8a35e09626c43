use crate::utils::base64::base64_encode;

/// Join links into a subscription body, one link per line
///
/// # Arguments
/// * `links` - Share links in output order
/// * `base64` - Wrap the whole body in standard Base64, as most clients expect
pub fn subscription_body(links: &[String], base64: bool) -> String {
    let mut body = String::new();
    for link in links {
        body.push_str(link);
        body.push('\n');
    }

    if base64 {
        base64_encode(&body)
    } else {
        body
    }
}
