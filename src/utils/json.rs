use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use serde_json::Value;

use super::error::AppError;

/// Converts a client JSON body into a BSON document. Only objects are accepted.
pub fn body_to_document(body: Value) -> Result<Document, AppError> {
    match body {
        Value::Object(map) => Ok(mongodb::bson::to_document(&map)?),
        other => Err(AppError::InvalidRequest(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

/// Builds a `$set` merge of the supplied fields. `_id` is immutable and dropped.
pub fn merge_update(body: Value) -> Result<Document, AppError> {
    let mut fields = body_to_document(body)?;
    fields.remove("_id");

    if fields.is_empty() {
        return Err(AppError::InvalidRequest("no fields to update".to_string()));
    }

    Ok(doc! { "$set": fields })
}

pub fn parse_object_id(raw: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw).map_err(|_| AppError::InvalidId(raw.to_string()))
}

/// Client-facing JSON for a stored value: ObjectIds as hex strings,
/// datetimes as RFC 3339, everything else as relaxed extended JSON.
pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => match dt.try_to_rfc3339_string() {
            Ok(s) => Value::String(s),
            Err(_) => Bson::DateTime(dt).into_relaxed_extjson(),
        },
        Bson::Document(doc) => document_to_json(doc),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

pub fn document_to_json(doc: Document) -> Value {
    Value::Object(doc.into_iter().map(|(k, v)| (k, bson_to_json(v))).collect())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
