use crate::diag::{FieldPath, Lookup, resolve};

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Conventional names of the fields that carry the human-readable error.
pub const DIAGNOSTIC_FIELDS: [&str; 5] = ["type", "reason", "root_cause", "error", "failures"];

/// Where the error usually lives, most common shape first.
pub const DEFAULT_PATHS: [&str; 4] = [
    "meta.body.error",
    "meta.meta.body.error",
    "body.error",
    "meta.body.failures",
];

pub fn default_paths() -> Vec<FieldPath> {
    DEFAULT_PATHS
        .iter()
        .map(|p| FieldPath::new(p.split('.').map(str::to_string).collect()))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DiagnosticReport {
    Found {
        path: String,
        fields: BTreeMap<String, Value>,
    },
    /// No path resolved. `keys` belong to the deepest object any path reached.
    Absent {
        reached_path: String,
        keys: Vec<String>,
    },
}

/// Try each path in order and report the first one that resolves.
///
/// Never fails: when nothing resolves, the keys of the deepest object reached
/// are returned so a human can see what the record does contain.
pub fn find_diagnostic_fields(root: &Value, paths: &[FieldPath]) -> DiagnosticReport {
    // (depth, path to reached object, reached object)
    let mut deepest: (usize, FieldPath, &Value) = (0, FieldPath::new(vec![]), root);

    for path in paths {
        match resolve(root, path) {
            Lookup::Found(value) if !is_empty_object(value) => {
                debug!(%path, "diagnostic path resolved");
                return DiagnosticReport::Found {
                    path: path.to_string(),
                    fields: collect_fields(path, value),
                };
            }
            Lookup::Found(value) => {
                let depth = path.segments().len();
                if depth > deepest.0 {
                    deepest = (depth, path.clone(), value);
                }
            }
            Lookup::Missing {
                reached,
                depth,
                missing,
            } => {
                debug!(%path, %missing, depth, "diagnostic path missing");
                let (depth, object) = last_object(root, path, depth, reached);
                if depth > deepest.0 {
                    deepest = (depth, path.prefix(depth), object);
                }
            }
        }
    }

    DiagnosticReport::Absent {
        reached_path: deepest.1.to_string(),
        keys: object_keys(deepest.2),
    }
}

/// Deepest object on the walk along `path`, at or above `depth`.
///
/// A walk can stop on a scalar (`"meta": "Request failed"`); the key report
/// then falls back to the object that held it.
fn last_object<'a>(
    root: &'a Value,
    path: &FieldPath,
    depth: usize,
    reached: &'a Value,
) -> (usize, &'a Value) {
    if reached.is_object() {
        return (depth, reached);
    }
    (0..depth)
        .rev()
        .find_map(|d| {
            resolve(root, &path.prefix(d))
                .found()
                .filter(|v| v.is_object())
                .map(|v| (d, v))
        })
        .unwrap_or((0, root))
}

/// Keys of `value` if it is an object, in map order.
pub fn object_keys(value: &Value) -> Vec<String> {
    value
        .as_object()
        .map(|m| m.keys().cloned().collect())
        .unwrap_or_default()
}

fn is_empty_object(value: &Value) -> bool {
    value.as_object().is_some_and(|m| m.is_empty())
}

fn collect_fields(path: &FieldPath, value: &Value) -> BTreeMap<String, Value> {
    let mut fields = BTreeMap::new();

    if let Value::Object(map) = value {
        for name in DIAGNOSTIC_FIELDS {
            if let Some(v) = map.get(name).filter(|v| !v.is_null()) {
                fields.insert(name.to_string(), v.clone());
            }
        }
    }

    if fields.is_empty() {
        let name = path.last().unwrap_or("error");
        fields.insert(name.to_string(), value.clone());
    }
    fields
}
