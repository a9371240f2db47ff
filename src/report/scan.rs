//! Regex-only extraction for records too mangled to parse as JSON.

use crate::Result;

use regex::Regex;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanHits {
    pub error_type: Option<String>,
    pub reason: Option<String>,
}

impl ScanHits {
    pub fn is_empty(&self) -> bool {
        self.error_type.is_none() && self.reason.is_none()
    }
}

/// Look for the first `"type": "..."` and `"reason": "..."` pairs in `window`.
///
/// Line breaks are flattened first so a value split across log lines still
/// matches on the key side.
pub fn scan_window(window: &str) -> Result<ScanHits> {
    let flat = window.replace(['\r', '\n'], " ");

    let type_re = Regex::new(r#""type"\s*:\s*"([^"]+)""#)?;
    let reason_re = Regex::new(r#""reason"\s*:\s*"([^"]+)""#)?;

    let first = |re: &Regex| {
        re.captures(&flat)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    };

    Ok(ScanHits {
        error_type: first(&type_re),
        reason: first(&reason_re),
    })
}
