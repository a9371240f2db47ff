use crate::extract::ExtractError;

/// How braces are counted while looking for the end of the object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanMode {
    /// Braces inside JSON string literals (with `\"` escapes) are ignored.
    #[default]
    StringAware,
    /// Every `{` and `}` counts, even inside strings.
    Naive,
}

/// A balanced `{...}` span cut out of the surrounding text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalancedObject<'a> {
    pub json: &'a str,
    /// Offset of the opening brace.
    pub start: usize,
    /// Offset just past the matching closing brace.
    pub end: usize,
}

/// Cut out the first balanced object that opens at or after `from`.
///
/// Depth goes +1 on `{` and -1 on `}`; the span ends on the brace that brings
/// it back to zero. Only the brace count is checked here, the content is left
/// for the JSON parser.
pub fn extract_balanced_object(
    text: &str,
    from: usize,
    mode: ScanMode,
) -> Result<BalancedObject<'_>, ExtractError> {
    let rest = text.get(from..).ok_or(ExtractError::NoObjectStart { from })?;
    let start = from
        + rest
            .find('{')
            .ok_or(ExtractError::NoObjectStart { from })?;

    // All delimiters are ASCII, so scanning bytes never lands inside a
    // multi-byte character.
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (i, b) in text.as_bytes()[start..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if *b == b'\\' {
                escaped = true;
            } else if *b == b'"' {
                in_string = false;
            }
            continue;
        }

        match b {
            b'"' if mode == ScanMode::StringAware => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    let end = start + i + 1;
                    return Ok(BalancedObject {
                        json: &text[start..end],
                        start,
                        end,
                    });
                }
            }
            _ => {}
        }
    }

    Err(ExtractError::Incomplete { start })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn stops_at_matching_brace() {
        let text = r#"FULL ERROR DETAILS: garbage {"a":{"b":{}}} trailer {"x":1}"#;
        let found = extract_balanced_object(text, 0, ScanMode::StringAware).unwrap();
        assert_eq!(found.json, r#"{"a":{"b":{}}}"#);
        assert_eq!(&text[found.start..found.end], found.json);
    }

    #[test]
    fn ignores_braces_before_start() {
        let text = r#"{ } } { MARK {"ok":true}"#;
        let from = text.find("MARK").unwrap();
        let found = extract_balanced_object(text, from, ScanMode::StringAware).unwrap();
        assert_eq!(found.json, r#"{"ok":true}"#);
    }

    #[test]
    fn unterminated_object_is_incomplete() {
        let text = r#"MARK {"a":{"b":1}"#;
        let err = extract_balanced_object(text, 0, ScanMode::StringAware).unwrap_err();
        assert_eq!(err, ExtractError::Incomplete { start: 5 });
    }

    #[test]
    fn no_opening_brace() {
        let err = extract_balanced_object("MARK nothing here", 4, ScanMode::Naive).unwrap_err();
        assert_eq!(err, ExtractError::NoObjectStart { from: 4 });
    }

    #[test]
    fn string_aware_skips_braces_in_strings() {
        let text = r#"{"reason":"bad token '}' near {","q":"say \"}\""} tail"#;
        let found = extract_balanced_object(text, 0, ScanMode::StringAware).unwrap();
        assert_eq!(found.json, r#"{"reason":"bad token '}' near {","q":"say \"}\""}"#);
    }

    #[test]
    fn naive_counts_braces_in_strings() {
        let text = r#"{"reason":"a}b"} tail"#;
        let found = extract_balanced_object(text, 0, ScanMode::Naive).unwrap();
        assert_eq!(found.json, r#"{"reason":"a}"#);
    }

    #[test]
    fn multibyte_text_around_object() {
        let text = "héllo → {\"k\":\"ü\"} ✓";
        let found = extract_balanced_object(text, 0, ScanMode::StringAware).unwrap();
        assert_eq!(found.json, "{\"k\":\"ü\"}");
    }
}
