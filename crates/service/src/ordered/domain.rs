use chrono::{DateTime, Utc};
use models::collection::merge_payload;
use models::Collection;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::errors::ServiceError;

/// A record of an ordered collection as the API sees it.
/// Payload fields are flattened next to the envelope fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderedRecord {
    pub id: Uuid,
    pub collection: Collection,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl OrderedRecord {
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.payload.get(name)
    }

    pub fn flag(&self, name: &str) -> bool {
        self.payload.get(name).and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.payload.get(name).and_then(Value::as_str)
    }
}

impl TryFrom<models::ordered_record::Model> for OrderedRecord {
    type Error = ServiceError;

    fn try_from(m: models::ordered_record::Model) -> Result<Self, Self::Error> {
        let collection: Collection = m.collection.parse()?;
        let payload = match m.payload {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            _ => return Err(ServiceError::Db(format!("record {} has a non-object payload", m.id))),
        };
        Ok(Self {
            id: m.id,
            collection,
            display_order: m.display_order,
            created_at: m.created_at.with_timezone(&Utc),
            updated_at: m.updated_at.with_timezone(&Utc),
            payload,
        })
    }
}

/// Partial update: payload fields to merge plus an optional explicit position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordPatch {
    pub fields: Map<String, Value>,
    pub display_order: Option<i32>,
}

impl RecordPatch {
    /// Split a request body into payload fields and `display_order`.
    pub fn from_json(body: Value) -> Result<Self, ServiceError> {
        let Value::Object(mut fields) = body else {
            return Err(ServiceError::Validation("request body must be a JSON object".into()));
        };
        let display_order = match fields.remove("display_order") {
            None | Some(Value::Null) => None,
            Some(v) => {
                let n = v
                    .as_i64()
                    .and_then(|n| i32::try_from(n).ok())
                    .ok_or_else(|| ServiceError::Validation("display_order must be an integer".into()))?;
                Some(n)
            }
        };
        Ok(Self { fields, display_order })
    }
}

/// Validate and normalize a complete payload for a new record.
pub fn prepare_payload(collection: Collection, payload: Value) -> Result<Map<String, Value>, ServiceError> {
    let Value::Object(mut map) = payload else {
        return Err(ServiceError::Validation("payload must be a JSON object".into()));
    };
    collection.normalize(&mut map);
    collection.validate_payload(&map)?;
    Ok(map)
}

/// Merge `patch` into `current` and validate the result.
pub fn apply_patch(
    collection: Collection,
    current: &Map<String, Value>,
    patch: Map<String, Value>,
) -> Result<Map<String, Value>, ServiceError> {
    collection.validate_patch(&patch)?;
    let mut merged = current.clone();
    merge_payload(&mut merged, patch);
    collection.normalize(&mut merged);
    collection.validate_payload(&merged)?;
    Ok(merged)
}
