//! Canonical schema constants for structured logging and events
//!
//! These constants keep field keys consistent between the logging macros,
//! the test capture layer and assertions in tests.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Golden file identity
pub const FIELD_PATH: &str = "path";
pub const FIELD_ENCODER: &str = "encoder";
pub const FIELD_PACKED: &str = "packed";

// Comparison configuration
pub const FIELD_IGNORE_PATH: &str = "ignore_path";

// Payload and comparison sizes
pub const FIELD_ITEMS: &str = "items";
pub const FIELD_DIFF_LEN: &str = "diff_len";
pub const FIELD_DIFFERING: &str = "differing";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical operation names
pub const OP_UPDATE: &str = "golden_update";
pub const OP_UPDATE_VALUES: &str = "golden_update_values";
pub const OP_COMPARE: &str = "golden_compare";
pub const OP_COMPARE_VALUES: &str = "golden_compare_values";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_accessibility() {
        assert!(!FIELD_COMPONENT.is_empty());
        assert!(!FIELD_OP.is_empty());
        assert!(!FIELD_PATH.is_empty());
        assert!(!EVENT_START.is_empty());
        assert!(!EVENT_END.is_empty());
        assert!(!EVENT_END_ERROR.is_empty());
    }

    #[test]
    fn test_event_names_are_distinct() {
        assert_ne!(EVENT_START, EVENT_END);
        assert_ne!(EVENT_START, EVENT_END_ERROR);
        assert_ne!(EVENT_END, EVENT_END_ERROR);
    }

    #[test]
    fn test_op_names_are_distinct() {
        let ops = [OP_UPDATE, OP_UPDATE_VALUES, OP_COMPARE, OP_COMPARE_VALUES];
        for (i, a) in ops.iter().enumerate() {
            for b in &ops[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
