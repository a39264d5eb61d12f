//! Per-method request handlers.
//!
//! Every handler receives the request path segments. Literal template
//! segments equal the path by construction of the match, so substituting the
//! bound parameters back into the template yields exactly these segments.

use serde_json::{json, Map, Value};

use crate::routing::PathParams;
use crate::simulator::error::{SimulatorError, SimulatorResult};
use crate::simulator::resolve::{coerce_id, find_by_id, next_id, resolve, resolve_mut};
use crate::simulator::SimResponse;

pub(crate) fn handle_get(data: &Value, path: &[&str]) -> SimulatorResult<SimResponse> {
    let found = resolve(data, path).ok_or(SimulatorError::ResourceNotFound)?;
    Ok(SimResponse::new(200, found.clone()))
}

pub(crate) fn handle_post(
    data: &mut Value,
    path: &[&str],
    body: Option<&Value>,
) -> SimulatorResult<SimResponse> {
    let body = require_body(body)?;

    let Some(Value::Array(collection)) = resolve_mut(data, path) else {
        return Err(SimulatorError::NotACollection);
    };

    let id = next_id(collection);
    collection.push(with_id(body, id.clone()));
    tracing::debug!(id = %id, size = collection.len(), "Item created");

    Ok(SimResponse::new(201, json!({ "success": true, "id": id })))
}

pub(crate) fn handle_put(
    data: &mut Value,
    path: &[&str],
    params: &PathParams,
    body: Option<&Value>,
) -> SimulatorResult<SimResponse> {
    let body = require_body(body)?;
    let id = params.get("id").ok_or(SimulatorError::MissingId)?;

    let collection = parent_collection(data, path)?;
    let index = find_by_id(collection, id).ok_or(SimulatorError::ItemNotFound)?;

    // The path id always wins over any id carried by the body. A string id
    // matched by string equality is stored back verbatim.
    let stored_id = match collection[index].get("id") {
        Some(Value::String(_)) => Value::String(id.to_string()),
        _ => coerce_id(id),
    };
    collection[index] = with_id(body, stored_id);
    tracing::debug!(id = %id, "Item replaced");

    Ok(SimResponse::new(200, json!({ "success": true })))
}

pub(crate) fn handle_delete(
    data: &mut Value,
    path: &[&str],
    params: &PathParams,
) -> SimulatorResult<SimResponse> {
    let id = params.get("id").ok_or(SimulatorError::MissingId)?;

    let collection = parent_collection(data, path)?;
    let index = find_by_id(collection, id).ok_or(SimulatorError::ItemNotFound)?;

    collection.remove(index);
    tracing::debug!(id = %id, size = collection.len(), "Item deleted");

    Ok(SimResponse::new(200, json!({ "success": true })))
}

/// Absent bodies and JSON `null` both count as missing.
fn require_body(body: Option<&Value>) -> SimulatorResult<&Value> {
    match body {
        None | Some(Value::Null) => Err(SimulatorError::MissingBody),
        Some(body) => Ok(body),
    }
}

/// The array holding the element addressed by `path`.
fn parent_collection<'v>(data: &'v mut Value, path: &[&str]) -> SimulatorResult<&'v mut Vec<Value>> {
    let parent = path.split_last().map(|(_, rest)| rest).unwrap_or_default();
    match resolve_mut(data, parent) {
        Some(Value::Array(collection)) => Ok(collection),
        _ => Err(SimulatorError::NotACollection),
    }
}

/// `{...body, id}`: object bodies keep their fields (and field order), the
/// `id` field is set last. Non-object bodies contribute no fields.
fn with_id(body: &Value, id: Value) -> Value {
    let mut item = match body {
        Value::Object(fields) => fields.clone(),
        _ => Map::new(),
    };
    item.insert("id".to_string(), id);
    Value::Object(item)
}
