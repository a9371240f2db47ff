//! Embedded object extraction: find the marker, cut out the first balanced
//! `{...}` after it, parse it.
//!
//! All offsets are byte offsets into the decoded text.

pub mod balance;
pub mod error;
pub mod excerpt;
pub mod locate;

pub use balance::{BalancedObject, ScanMode, extract_balanced_object};
pub use error::ExtractError;
pub use excerpt::{excerpt, sanitize_controls, window};
pub use locate::locate;

use serde_json::Value;

/// Parse an extracted candidate into a generic JSON tree.
pub fn parse(json: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn extraction_preserves_parsed_value() {
        let object = r#"{"meta":{"body":{"error":{"type":"x","list":[1,{"k":null}]}}}}"#;
        let text = format!("}} {{ stray FULL ERROR DETAILS:\r\n  {object} tail }}");

        let at = locate(&text, "FULL ERROR DETAILS:").unwrap();
        let found = extract_balanced_object(&text, at, ScanMode::StringAware).unwrap();

        assert_eq!(found.json, object);
        assert_eq!(parse(found.json).unwrap(), parse(object).unwrap());
    }

    #[test]
    fn parse_error_is_returned_not_panicked() {
        let text = r#"FULL ERROR DETAILS: {"a": }"#;
        let found = extract_balanced_object(text, 0, ScanMode::StringAware).unwrap();
        assert_eq!(found.json, r#"{"a": }"#);
        assert!(parse(found.json).is_err());
    }
}
