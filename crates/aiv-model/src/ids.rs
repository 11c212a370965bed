//! Identifier conventions of the annotation platform.

/// Length of platform-issued ids (feature schemas, data rows).
pub const PLATFORM_ID_LEN: usize = 25;

/// Data-row reference filled into nested classifications.
///
/// Nested classifications are validated against their parent's context, so
/// the reference only has to be well-formed, never resolvable.
pub const NESTED_DATA_ROW_ID: &str = "__________child__________";

/// Returns true when `value` has the shape of a platform id.
pub fn is_platform_id(value: &str) -> bool {
    value.len() == PLATFORM_ID_LEN && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_is_a_platform_id() {
        assert_eq!(NESTED_DATA_ROW_ID.len(), PLATFORM_ID_LEN);
        assert!(is_platform_id(NESTED_DATA_ROW_ID));
    }

    #[test]
    fn short_ids_are_rejected() {
        assert!(!is_platform_id("R1"));
        assert!(is_platform_id("ckappz7d700gn0zbocmqkwd9i"));
        assert!(!is_platform_id("ckappz7d700gn0zbocmqkwd9-"));
    }
}
