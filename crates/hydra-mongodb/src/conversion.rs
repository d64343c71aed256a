//! BSON -> script value conversion
//!
//! Results handed back to a script should look like ordinary script objects:
//! ObjectIds become their hex strings, dates become RFC 3339 strings, and
//! numbers stay numbers. Anything without a natural JSON form falls back to
//! relaxed extended JSON.

use bson::{Bson, Document as BsonDocument};
use chrono::{DateTime, SecondsFormat};
use serde_json::{Map, Number, Value};

use crate::identifier::object_id_to_string;

/// Convert a single BSON value
pub fn bson_to_json(value: &Bson) -> Value {
    match value {
        Bson::Null | Bson::Undefined => Value::Null,
        Bson::Boolean(b) => Value::Bool(*b),
        Bson::Int32(i) => Value::from(*i),
        Bson::Int64(i) => Value::from(*i),
        // NaN and infinities have no JSON number form
        Bson::Double(f) => Number::from_f64(*f).map(Value::Number).unwrap_or(Value::Null),
        Bson::String(s) => Value::String(s.clone()),
        Bson::ObjectId(oid) => Value::String(object_id_to_string(oid)),
        Bson::DateTime(dt) => match DateTime::from_timestamp_millis(dt.timestamp_millis()) {
            Some(utc) => Value::String(utc.to_rfc3339_opts(SecondsFormat::Millis, true)),
            None => value.clone().into_relaxed_extjson(),
        },
        Bson::Decimal128(d) => Value::String(d.to_string()),
        Bson::Array(items) => Value::Array(items.iter().map(bson_to_json).collect()),
        Bson::Document(doc) => document_to_json(doc),
        other => other.clone().into_relaxed_extjson(),
    }
}

/// Convert a document into a JSON object, keeping field order
pub fn document_to_json(doc: &BsonDocument) -> Value {
    let map: Map<String, Value> = doc
        .iter()
        .map(|(key, value)| (key.clone(), bson_to_json(value)))
        .collect();
    Value::Object(map)
}

/// Convert a full result set
pub fn documents_to_json(docs: &[BsonDocument]) -> Vec<Value> {
    docs.iter().map(document_to_json).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::{doc, oid::ObjectId, spec::BinarySubtype, Binary};
    use serde_json::json;

    #[test]
    fn test_scalars() {
        assert_eq!(bson_to_json(&Bson::Null), json!(null));
        assert_eq!(bson_to_json(&Bson::Boolean(true)), json!(true));
        assert_eq!(bson_to_json(&Bson::Int32(7)), json!(7));
        assert_eq!(bson_to_json(&Bson::Int64(-7)), json!(-7));
        assert_eq!(bson_to_json(&Bson::Double(1.5)), json!(1.5));
        assert_eq!(bson_to_json(&Bson::String("x".into())), json!("x"));
    }

    #[test]
    fn test_non_finite_double_is_null() {
        assert_eq!(bson_to_json(&Bson::Double(f64::NAN)), json!(null));
        assert_eq!(bson_to_json(&Bson::Double(f64::INFINITY)), json!(null));
    }

    #[test]
    fn test_object_id_to_hex() {
        let id = ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap();
        assert_eq!(
            bson_to_json(&Bson::ObjectId(id)),
            json!("507f1f77bcf86cd799439011")
        );
    }

    #[test]
    fn test_datetime_to_rfc3339() {
        let dt = bson::DateTime::from_millis(0);
        assert_eq!(
            bson_to_json(&Bson::DateTime(dt)),
            json!("1970-01-01T00:00:00.000Z")
        );
    }

    #[test]
    fn test_binary_falls_back_to_extjson() {
        let bin = Bson::Binary(Binary {
            subtype: BinarySubtype::Generic,
            bytes: vec![1, 2, 3],
        });
        let value = bson_to_json(&bin);
        assert!(value.get("$binary").is_some());
    }

    #[test]
    fn test_nested_document_keeps_order() {
        let id = ObjectId::new();
        let doc = doc! {
            "_id": id,
            "z": 1,
            "a": { "tags": ["x", 2] },
        };
        let value = document_to_json(&doc);
        let obj = value.as_object().unwrap();

        let keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["_id", "z", "a"]);
        assert_eq!(obj["_id"], json!(id.to_hex()));
        assert_eq!(obj["a"], json!({ "tags": ["x", 2] }));
    }

    #[test]
    fn test_documents_to_json() {
        let docs = vec![doc! { "a": 1 }, doc! { "a": 2 }];
        assert_eq!(documents_to_json(&docs), vec![json!({ "a": 1 }), json!({ "a": 2 })]);
    }
}
