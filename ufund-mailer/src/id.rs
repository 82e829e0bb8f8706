//! Prefixed identifier generation for log entries and message ids.
//!
//! Ids are URL-safe and carry at least 96 bits of entropy, with a short
//! prefix naming the record type (e.g. `eml_` for delivery log entries).

use base64::{Engine, prelude::BASE64_URL_SAFE_NO_PAD};
use rand::{TryRngCore, rngs::OsRng};

/// Generate a prefixed ID with 96 bits of entropy.
///
/// The ID format is `{prefix}_{random}` where the random part is base64
/// URL-safe encoded without padding.
pub fn generate_prefixed_id(prefix: &str) -> String {
    let mut bytes = [0u8; 12];
    OsRng.try_fill_bytes(&mut bytes).unwrap();

    let encoded = BASE64_URL_SAFE_NO_PAD.encode(bytes);

    format!("{prefix}_{encoded}")
}

/// Validate that a prefixed ID has the expected format.
pub fn validate_prefixed_id(id: &str, expected_prefix: &str) -> bool {
    if !id.starts_with(&format!("{expected_prefix}_")) {
        return false;
    }

    let random_part = &id[expected_prefix.len() + 1..];

    match BASE64_URL_SAFE_NO_PAD.decode(random_part) {
        Ok(decoded) => decoded.len() >= 12,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_prefixed_id() {
        let id = generate_prefixed_id("eml");
        assert!(id.starts_with("eml_"));
        assert!(id.len() > 4);

        // Ensure uniqueness
        let id2 = generate_prefixed_id("eml");
        assert_ne!(id, id2);
    }

    #[test]
    fn test_validate_prefixed_id() {
        let id = generate_prefixed_id("msg");
        assert!(validate_prefixed_id(&id, "msg"));
        assert!(!validate_prefixed_id(&id, "eml"));
        assert!(!validate_prefixed_id("msg_!!!", "msg"));
        assert!(!validate_prefixed_id("msg_c2hvcnQ", "msg"));
    }
}
