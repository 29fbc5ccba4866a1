//! Dotted-path access into JSON documents.
//!
//! Bucket keys such as `2024.3.15.u` double as paths into nested documents:
//! `{"2024": {"3": {"15": {"u": 1}}}}`. This module resolves such paths.
//!
//! - [`get`] walks existing structure and yields `None` as soon as a segment
//!   is missing or the current node is not a container.
//! - [`set`] only writes when the parent already exists; it never creates
//!   intermediate objects.
//! - [`increment_at`] behaves like a store-side atomic increment and does
//!   create intermediate objects.
//!
//! Arrays are indexed by numeric segments (`items.0.name`).

use std::fmt;

use serde_json::{Map, Number, Value};

use crate::error::{Result, RollupError};

/// A path into a document, as an ordered list of segments.
///
/// Built from a dotted string, a list of segments, or a number (which is
/// converted to its decimal form first, so `1.5` becomes `["1", "5"]`).
/// An empty segment list addresses the document root. The empty string is
/// a single empty segment, not the root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// The root path.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The dotted form of the first `depth` segments.
    fn prefix(&self, depth: usize) -> String {
        self.segments[..depth.min(self.segments.len())].join(".")
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl From<&str> for FieldPath {
    fn from(s: &str) -> Self {
        FieldPath {
            segments: s.split('.').map(str::to_string).collect(),
        }
    }
}

impl From<String> for FieldPath {
    fn from(s: String) -> Self {
        FieldPath::from(s.as_str())
    }
}

impl From<&String> for FieldPath {
    fn from(s: &String) -> Self {
        FieldPath::from(s.as_str())
    }
}

impl From<Vec<String>> for FieldPath {
    fn from(segments: Vec<String>) -> Self {
        FieldPath { segments }
    }
}

impl From<&[&str]> for FieldPath {
    fn from(segments: &[&str]) -> Self {
        FieldPath {
            segments: segments.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl<const N: usize> From<[&str; N]> for FieldPath {
    fn from(segments: [&str; N]) -> Self {
        FieldPath::from(&segments[..])
    }
}

impl From<i64> for FieldPath {
    fn from(n: i64) -> Self {
        FieldPath::from(n.to_string())
    }
}

impl From<u64> for FieldPath {
    fn from(n: u64) -> Self {
        FieldPath::from(n.to_string())
    }
}

impl From<f64> for FieldPath {
    fn from(n: f64) -> Self {
        FieldPath::from(n.to_string())
    }
}

fn child<'a>(node: &'a Value, segment: &str) -> Option<&'a Value> {
    match node {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

fn child_mut<'a>(node: &'a mut Value, segment: &str) -> Option<&'a mut Value> {
    match node {
        Value::Object(map) => map.get_mut(segment),
        Value::Array(items) => segment
            .parse::<usize>()
            .ok()
            .and_then(|i| items.get_mut(i)),
        _ => None,
    }
}

/// Resolve `path` in `document`.
///
/// Returns `None` if any segment is missing or traverses a scalar. The root
/// path returns the document itself.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use tzrollup_core::path::get;
///
/// let doc = json!({"2024": {"3": {"u": 7}}});
/// assert_eq!(get(&doc, "2024.3.u"), Some(&json!(7)));
/// assert_eq!(get(&doc, "2024.4.u"), None);
/// ```
pub fn get(document: &Value, path: impl Into<FieldPath>) -> Option<&Value> {
    let path = path.into();
    let mut node = document;
    for segment in path.segments() {
        node = child(node, segment)?;
    }
    Some(node)
}

/// Write `value` at `path` and return a reference to the stored value.
///
/// The parent of the last segment must already exist as an object (or as
/// an array holding the indexed slot); otherwise nothing is written and
/// `None` is returned. The root path writes nothing and returns the
/// document unchanged.
pub fn set(document: &mut Value, path: impl Into<FieldPath>, value: Value) -> Option<&Value> {
    let path = path.into();
    let Some((last, parents)) = path.segments().split_last() else {
        return Some(&*document);
    };

    let mut node = document;
    for segment in parents {
        node = child_mut(node, segment)?;
    }

    match node {
        Value::Object(map) => {
            map.insert(last.clone(), value);
            map.get(last.as_str())
        }
        Value::Array(items) => {
            let slot = last.parse::<usize>().ok().and_then(|i| items.get_mut(i))?;
            *slot = value;
            Some(&*slot)
        }
        _ => None,
    }
}

/// Add `amount` to the number at `path`, creating missing objects.
///
/// A missing leaf is initialized to `amount`. Fails with
/// [`RollupError::PathConflict`] when an existing intermediate value is not
/// an object, and with [`RollupError::NonNumericField`] when the leaf holds
/// something other than a number.
pub fn increment_at(document: &mut Value, path: impl Into<FieldPath>, amount: i64) -> Result<()> {
    let path = path.into();
    let Some((last, parents)) = path.segments().split_last() else {
        return Err(RollupError::PathConflict(String::new()));
    };

    let mut node = document;
    for (depth, segment) in parents.iter().enumerate() {
        let Value::Object(map) = node else {
            return Err(RollupError::PathConflict(path.prefix(depth)));
        };
        node = map
            .entry(segment.clone())
            .or_insert_with(|| Value::Object(Map::new()));
    }

    let Value::Object(map) = node else {
        return Err(RollupError::PathConflict(path.prefix(parents.len())));
    };

    match map.get_mut(last.as_str()) {
        None => {
            map.insert(last.clone(), Value::from(amount));
            Ok(())
        }
        Some(Value::Number(current)) => {
            let updated = add(current, amount)
                .ok_or_else(|| RollupError::NonNumericField(path.to_string()))?;
            *current = updated;
            Ok(())
        }
        Some(_) => Err(RollupError::NonNumericField(path.to_string())),
    }
}

fn add(current: &Number, amount: i64) -> Option<Number> {
    current
        .as_i64()
        .and_then(|n| n.checked_add(amount))
        .map(Number::from)
        .or_else(|| current.as_f64().and_then(|f| Number::from_f64(f + amount as f64)))
}
