pub const API_KEY_HEADER: &str = "X-API-KEY";

/// Compares a caller-supplied key with the configured secret. No configured
/// secret means every caller is accepted.
pub fn verify_api_key(expected: Option<&str>, provided: Option<&str>) -> bool {
    match expected {
        None => true,
        Some(expected) => provided == Some(expected),
    }
}
