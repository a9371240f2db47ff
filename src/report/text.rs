//! Plain-text rendering for each command. Everything returns a `String` that
//! `main` prints as-is.

use crate::config::{DUMP_CHARS, EXCERPT_CHARS};
use crate::diag::{DIAGNOSTIC_FIELDS, DiagnosticReport, FieldPath, object_keys, resolve};
use crate::extract::{ExtractError, excerpt, sanitize_controls, window};
use crate::report::ScanHits;

use serde::Serialize;
use serde_json::Value;

fn label(field: &str) -> &str {
    match field {
        "type" => "Error Type",
        "reason" => "Error Reason",
        "root_cause" => "Root Cause",
        "error" => "Error",
        "failures" => "Failures",
        other => other,
    }
}

/// Strings print bare, everything else as compact JSON.
fn show(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn keys_json(keys: &[String]) -> String {
    serde_json::to_string(keys).unwrap_or_else(|_| format!("{keys:?}"))
}

fn keys_list(value: &Value) -> String {
    keys_json(&object_keys(value))
}

fn pretty_capped(value: &Value, limit: usize) -> String {
    let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    window(&pretty, 0, limit).to_string()
}

pub fn render_fields(report: &DiagnosticReport) -> String {
    match report {
        DiagnosticReport::Found { path, fields } => {
            let mut out = format!("--- PARSED ERROR DETAILS ---\nPath: {path}\n");
            for name in DIAGNOSTIC_FIELDS {
                if let Some(v) = fields.get(name) {
                    out.push_str(&format!("{}: {}\n", label(name), show(v)));
                }
            }
            // Fields from a custom path that are not one of the usual names.
            for (name, v) in fields {
                if !DIAGNOSTIC_FIELDS.contains(&name.as_str()) {
                    out.push_str(&format!("{}: {}\n", label(name), show(v)));
                }
            }
            out
        }
        DiagnosticReport::Absent { reached_path, keys } => format!(
            "--- NO DIAGNOSTIC FIELDS FOUND ---\nReached: {reached_path}\nKeys: {}\n",
            keys_json(keys)
        ),
    }
}

pub fn render_fields_json(report: &DiagnosticReport) -> crate::Result<String> {
    let mut json = serde_json::to_string_pretty(report)?;
    json.push('\n');
    Ok(json)
}

/// Key listing along the `meta` chain, for working out where the error sits.
pub fn render_keys(root: &Value) -> String {
    let at = |p: &str| {
        p.parse::<FieldPath>()
            .ok()
            .and_then(|path| resolve(root, &path).found())
    };

    let meta_keys = at("meta").map(keys_list).unwrap_or_else(|| "[]".to_string());
    let mut out = format!("Meta Keys: {meta_keys}\n");

    if let Some(inner) = at("meta.meta") {
        out.push_str(&format!("Meta2 Keys: {}\n", keys_list(inner)));
        if let Some(body) = at("meta.meta.body") {
            out.push_str(&format!("Meta2 Body Keys: {}\n", keys_list(body)));
            if let Some(err) = at("meta.meta.body.error") {
                out.push_str(&format!(
                    "Meta2 Body Error: {}\n",
                    pretty_capped(err, EXCERPT_CHARS)
                ));
            }
        }
    }

    if let Some(body) = at("meta.body") {
        out.push_str(&format!("Body Keys: {}\n", keys_list(body)));
        if let Some(err) = at("meta.body.error") {
            out.push_str(&format!("Body Error: {}\n", pretty_capped(err, EXCERPT_CHARS)));
        } else if let Some(failures) = at("meta.body.failures") {
            out.push_str(&format!(
                "Body Failures: {}\n",
                pretty_capped(failures, EXCERPT_CHARS)
            ));
        }
    }
    out
}

pub fn render_dump(root: &Value) -> String {
    let mut out = format!("Top Level Keys: {}\n", keys_list(root));
    if let Some(meta) = root.get("meta") {
        out.push_str(&format!("Meta Dump:\n{}\n", pretty_capped(meta, DUMP_CHARS)));
    }
    out
}

pub fn render_scan(hits: &ScanHits, window: &str) -> String {
    let mut out = String::from("--- EXTRACTED ERROR ---\n");
    if let Some(t) = &hits.error_type {
        out.push_str(&format!("Type: {t}\n"));
    }
    if let Some(r) = &hits.reason {
        out.push_str(&format!("Reason: {r}\n"));
    }
    if hits.is_empty() {
        out.push_str(&format!(
            "RAW CHUNK (cleaned):\n{}\n",
            excerpt(window, EXCERPT_CHARS)
        ));
    }
    out
}

pub fn render_raw(region: &str, safe: bool) -> String {
    if safe {
        format!("{}\n", sanitize_controls(region))
    } else {
        format!("{region}\n")
    }
}

fn extract_excerpt(err: &ExtractError, text: &str, chunk_chars: usize) -> Option<String> {
    err.excerpt_from()
        .map(|from| excerpt(window(text, from, chunk_chars), EXCERPT_CHARS))
}

/// Report an extraction failure, with a raw excerpt when there is text to show.
pub fn render_extract_failure(err: &ExtractError, text: &str, chunk_chars: usize) -> String {
    match extract_excerpt(err, text, chunk_chars) {
        None => format!("{err}\n"),
        Some(chunk) => format!("{err}\nRAW CHUNK (partial): {chunk}\n"),
    }
}

pub fn render_parse_failure(err: &serde_json::Error, candidate: &str) -> String {
    format!(
        "JSON Parse Error: {err}\nRaw JSON string (partial): {}\n",
        excerpt(candidate, EXCERPT_CHARS)
    )
}

/// Failure shape for `fields --json`, tagged like [`DiagnosticReport`].
#[derive(Debug, Serialize)]
struct FailureView<'a> {
    status: &'a str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    excerpt: Option<String>,
}

fn failure_json(view: &FailureView<'_>) -> crate::Result<String> {
    let mut json = serde_json::to_string_pretty(view)?;
    json.push('\n');
    Ok(json)
}

pub fn render_extract_failure_json(
    err: &ExtractError,
    text: &str,
    chunk_chars: usize,
) -> crate::Result<String> {
    failure_json(&FailureView {
        status: err.kind(),
        message: err.to_string(),
        excerpt: extract_excerpt(err, text, chunk_chars),
    })
}

pub fn render_parse_failure_json(
    err: &serde_json::Error,
    candidate: &str,
) -> crate::Result<String> {
    failure_json(&FailureView {
        status: "parse_error",
        message: err.to_string(),
        excerpt: Some(excerpt(candidate, EXCERPT_CHARS)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn fields_found() {
        let report = DiagnosticReport::Found {
            path: "meta.body.error".to_string(),
            fields: serde_json::from_value(json!({
                "type": "x",
                "reason": "y",
                "root_cause": [{"type": "z"}]
            }))
            .unwrap(),
        };
        assert_eq!(
            render_fields(&report),
            "--- PARSED ERROR DETAILS ---\n\
             Path: meta.body.error\n\
             Error Type: x\n\
             Error Reason: y\n\
             Root Cause: [{\"type\":\"z\"}]\n"
        );
    }

    #[test]
    fn fields_absent_lists_keys() {
        let report = DiagnosticReport::Absent {
            reached_path: "(root)".to_string(),
            keys: vec!["foo".to_string()],
        };
        assert_eq!(
            render_fields(&report),
            "--- NO DIAGNOSTIC FIELDS FOUND ---\nReached: (root)\nKeys: [\"foo\"]\n"
        );
    }

    #[test]
    fn fields_json_is_tagged() {
        let report = DiagnosticReport::Absent {
            reached_path: "meta".to_string(),
            keys: vec![],
        };
        let v: Value = serde_json::from_str(&render_fields_json(&report).unwrap()).unwrap();
        assert_eq!(v, json!({"status": "absent", "reached_path": "meta", "keys": []}));
    }

    #[test]
    fn keys_walks_meta_chain() {
        let root = json!({"meta": {
            "statusCode": 400,
            "body": {"failures": [{"shard": 0}]}
        }});
        let out = render_keys(&root);
        assert!(out.starts_with("Meta Keys: [\"body\",\"statusCode\"]\n"), "{out}");
        assert!(out.contains("Body Keys: [\"failures\"]\n"), "{out}");
        assert!(out.contains("Body Failures: [\n"), "{out}");
        assert!(!out.contains("Meta2"), "{out}");
    }

    #[test]
    fn keys_without_meta() {
        assert_eq!(render_keys(&json!({"foo": 1})), "Meta Keys: []\n");
    }

    #[test]
    fn dump_caps_meta() {
        let big: Vec<u32> = (0..2000).collect();
        let out = render_dump(&json!({"meta": big, "name": "ResponseError"}));
        assert!(out.starts_with("Top Level Keys: [\"meta\",\"name\"]\nMeta Dump:\n"), "{out}");
        let dumped = out.lines().skip(2).collect::<Vec<_>>().join("\n");
        assert_eq!(dumped.chars().count(), DUMP_CHARS);
    }

    #[test]
    fn scan_falls_back_to_raw_chunk() {
        let out = render_scan(&ScanHits::default(), "line one\nline two");
        assert_eq!(out, "--- EXTRACTED ERROR ---\nRAW CHUNK (cleaned):\nline one line two\n");
    }

    #[test]
    fn incomplete_includes_excerpt() {
        let text = "FULL ERROR DETAILS: {\"a\": {\n\"b\": 1}";
        let err = ExtractError::Incomplete { start: 20 };
        assert_eq!(
            render_extract_failure(&err, text, 2000),
            "JSON end not found or malformed (object opened at offset 20)\n\
             RAW CHUNK (partial): {\"a\": { \"b\": 1}\n"
        );
    }

    #[test]
    fn marker_missing_has_no_excerpt() {
        let err = ExtractError::MarkerNotFound {
            marker: "FULL ERROR DETAILS:".to_string(),
        };
        assert_eq!(
            render_extract_failure(&err, "whatever", 2000),
            "Marker not found: \"FULL ERROR DETAILS:\"\n"
        );
    }

    #[test]
    fn failures_as_json() {
        let text = "FULL ERROR DETAILS: {\"a\": 1";
        let err = ExtractError::Incomplete { start: 20 };
        let v: Value =
            serde_json::from_str(&render_extract_failure_json(&err, text, 2000).unwrap()).unwrap();
        assert_eq!(
            v,
            json!({
                "status": "incomplete",
                "message": "JSON end not found or malformed (object opened at offset 20)",
                "excerpt": "{\"a\": 1"
            })
        );

        let err = ExtractError::MarkerNotFound {
            marker: "X".to_string(),
        };
        let v: Value =
            serde_json::from_str(&render_extract_failure_json(&err, text, 2000).unwrap()).unwrap();
        assert_eq!(
            v,
            json!({"status": "marker_not_found", "message": "Marker not found: \"X\""})
        );

        let parse_err = serde_json::from_str::<Value>("{\"a\": }").unwrap_err();
        let v: Value =
            serde_json::from_str(&render_parse_failure_json(&parse_err, "{\"a\": }").unwrap())
                .unwrap();
        assert_eq!(v["status"], "parse_error");
        assert_eq!(v["excerpt"], "{\"a\": }");
    }

    #[test]
    fn raw_safe_blanks_controls() {
        assert_eq!(render_raw("a\nb\u{7}", true), "a b \n");
        assert_eq!(render_raw("a\nb", false), "a\nb\n");
    }
}
