//! Path resolution and id handling over the working copy.
//!
//! # Lookup order for a segment applied to a value
//! - Object: the segment is a key
//! - Array whose elements expose an `id` field: linear search by id
//!   (first element whose id equals the segment, see [`id_matches`])
//! - Array without any `id` field: the segment is a 1-based position
//! - Anything else: resolution fails
//!
//! Positional lookup is never a fallback for a failed id search, so once an
//! element is deleted its id stays unreachable even if another element now
//! sits at that position.

use serde_json::{Number, Value};

/// Where a segment leads inside the current value.
enum Step<'s> {
    Key(&'s str),
    Index(usize),
}

/// Decide how `segment` applies to `current`.
fn locate<'s>(current: &Value, segment: &'s str) -> Option<Step<'s>> {
    match current {
        Value::Object(map) => map.contains_key(segment).then_some(Step::Key(segment)),
        Value::Array(items) => {
            if items.iter().any(has_id) {
                return find_by_id(items, segment).map(Step::Index);
            }
            let ordinal: usize = segment.parse().ok()?;
            (1..=items.len()).contains(&ordinal).then(|| Step::Index(ordinal - 1))
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => None,
    }
}

/// Follow `segments` from `root`. `None` when any segment fails.
pub fn resolve<'v>(root: &'v Value, segments: &[&str]) -> Option<&'v Value> {
    let mut current = root;
    for segment in segments {
        current = match locate(current, segment)? {
            Step::Key(key) => current.get(key)?,
            Step::Index(index) => current.get(index)?,
        };
    }
    Some(current)
}

/// Mutable twin of [`resolve`].
pub fn resolve_mut<'v>(root: &'v mut Value, segments: &[&str]) -> Option<&'v mut Value> {
    let mut current = root;
    for segment in segments {
        current = match locate(current, segment)? {
            Step::Key(key) => current.get_mut(key)?,
            Step::Index(index) => current.get_mut(index)?,
        };
    }
    Some(current)
}

fn has_id(item: &Value) -> bool {
    item.get("id").is_some()
}

/// Id equality, in two explicit steps:
/// 1. exact string equality when the stored id is a string;
/// 2. exact numeric equality when the stored id is a number and the segment
///    parses as one.
///
/// Elements without an `id` field never match.
pub fn id_matches(item: &Value, segment: &str) -> bool {
    match item.get("id") {
        Some(Value::String(id)) => id == segment,
        Some(Value::Number(id)) => match (id.as_f64(), segment.parse::<f64>()) {
            (Some(stored), Ok(wanted)) => stored == wanted,
            _ => false,
        },
        _ => false,
    }
}

/// Position of the first element whose id equals `segment` (see [`id_matches`]).
pub fn find_by_id(items: &[Value], segment: &str) -> Option<usize> {
    items.iter().position(|item| id_matches(item, segment))
}

/// `1 + max(numeric ids, 0)`; `1` for an empty collection.
pub fn next_id(items: &[Value]) -> Value {
    let max = items
        .iter()
        .filter_map(|item| item.get("id").and_then(Value::as_f64))
        .fold(0.0_f64, f64::max);
    number_value(max + 1.0)
}

/// The id a path segment stands for: a number when it parses as one,
/// otherwise the string itself.
pub fn coerce_id(segment: &str) -> Value {
    if let Ok(n) = segment.parse::<i64>() {
        return Value::from(n);
    }
    match segment.parse::<f64>() {
        Ok(n) if n.is_finite() => number_value(n),
        _ => Value::String(segment.to_string()),
    }
}

fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        Value::from(n as i64)
    } else {
        Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
    }
}
