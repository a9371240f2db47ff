//! Dotted key paths into a parsed JSON tree.
//!
//! Example: `meta.body.error` walks `{"meta":{"body":{"error":...}}}`. A purely
//! numeric segment indexes into an array, so `error.root_cause.0` reaches the
//! first root cause.

use serde_json::Value;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    pub fn new(segments: Vec<String>) -> Self {
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// The first `depth` segments, as a path of their own.
    pub fn prefix(&self, depth: usize) -> FieldPath {
        FieldPath(self.0[..depth.min(self.0.len())].to_vec())
    }
}

impl FromStr for FieldPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(FieldPath(
            s.split('.')
                .map(str::trim)
                .filter(|seg| !seg.is_empty())
                .map(str::to_string)
                .collect(),
        ))
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("(root)");
        }
        f.write_str(&self.0.join("."))
    }
}

/// Result of walking a [`FieldPath`].
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<'a> {
    Found(&'a Value),
    /// Stopped at the first absent key.
    Missing {
        /// Last value reached before the walk stopped.
        reached: &'a Value,
        /// Number of segments successfully walked.
        depth: usize,
        missing: String,
    },
}

impl<'a> Lookup<'a> {
    pub fn found(&self) -> Option<&'a Value> {
        match self {
            Lookup::Found(v) => Some(*v),
            Lookup::Missing { .. } => None,
        }
    }
}

/// Walk `path` from `root`. A JSON `null` counts as absent.
pub fn resolve<'a>(root: &'a Value, path: &FieldPath) -> Lookup<'a> {
    let mut cur = root;
    for (depth, seg) in path.segments().iter().enumerate() {
        let next = match cur {
            Value::Object(map) => map.get(seg),
            Value::Array(items) => seg.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        };

        match next.filter(|v| !v.is_null()) {
            Some(v) => cur = v,
            None => {
                return Lookup::Missing {
                    reached: cur,
                    depth,
                    missing: seg.clone(),
                };
            }
        }
    }
    Lookup::Found(cur)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn path(s: &str) -> FieldPath {
        s.parse().unwrap()
    }

    #[test]
    fn walks_nested_objects() {
        let v = json!({"meta": {"body": {"error": {"type": "x"}}}});
        assert_eq!(
            resolve(&v, &path("meta.body.error.type")).found(),
            Some(&json!("x"))
        );
    }

    #[test]
    fn stops_at_first_missing_key() {
        let v = json!({"meta": {"headers": {}}});
        match resolve(&v, &path("meta.body.error")) {
            Lookup::Missing {
                reached,
                depth,
                missing,
            } => {
                assert_eq!(reached, &json!({"headers": {}}));
                assert_eq!(depth, 1);
                assert_eq!(missing, "body");
            }
            other => panic!("unexpected lookup: {other:?}"),
        }
    }

    #[test]
    fn null_counts_as_missing() {
        let v = json!({"meta": {"body": {"error": null}}});
        assert!(resolve(&v, &path("meta.body.error")).found().is_none());
    }

    #[test]
    fn numeric_segment_indexes_arrays() {
        let v = json!({"root_cause": [{"type": "a"}, {"type": "b"}]});
        assert_eq!(
            resolve(&v, &path("root_cause.1.type")).found(),
            Some(&json!("b"))
        );
        assert!(resolve(&v, &path("root_cause.x")).found().is_none());
    }

    #[test]
    fn scalar_in_the_middle_is_missing() {
        let v = json!({"meta": "oops"});
        assert!(resolve(&v, &path("meta.body")).found().is_none());
    }

    #[test]
    fn display_and_parse() {
        assert_eq!(path(" meta . body ").to_string(), "meta.body");
        assert_eq!(path("").to_string(), "(root)");
        assert_eq!(path("a.b.c").prefix(2).to_string(), "a.b");
    }
}
