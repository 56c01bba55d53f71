//! Typed-value JSON model for Firestore REST documents.
//!
//! The Firestore REST API encodes every field as a single-key object naming
//! its value kind (`{"stringValue": "Pasta"}`). The same representation
//! appears inside document trigger payloads, so [`Document`] is shared by
//! the [`FirestoreClient`](crate::FirestoreClient) and the trigger parser.
//! All value kinds deserialize, but only the kinds the service actually
//! reads get typed accessors; everything else reads as absent.

use std::collections::HashMap;

use serde::Deserialize;

use miam_core::types::Timestamp;

/// A Firestore document as returned by the REST API and carried in
/// document trigger payloads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
    /// Full resource name,
    /// `projects/{project}/databases/{db}/documents/{path}`.
    pub name: String,
    /// Field map. Absent on empty documents.
    pub fields: HashMap<String, Value>,
    /// Server-assigned creation time.
    pub create_time: Option<Timestamp>,
    /// Server-assigned last-update time.
    pub update_time: Option<Timestamp>,
}

impl Document {
    /// The final segment of the document's resource name, i.e. its id.
    pub fn id(&self) -> Option<&str> {
        self.name.rsplit('/').next().filter(|id| !id.is_empty())
    }

    /// Read a string field, or `None` when absent or of another kind.
    pub fn string_field(&self, name: &str) -> Option<&str> {
        match self.fields.get(name)? {
            Value::String(value) => Some(value),
            _ => None,
        }
    }

    /// Read a boolean field, or `None` when absent or of another kind.
    pub fn bool_field(&self, name: &str) -> Option<bool> {
        match self.fields.get(name)? {
            Value::Boolean(value) => Some(*value),
            _ => None,
        }
    }
}

/// A single Firestore field value.
///
/// Covers every value kind the REST API can emit, so documents with fields
/// this service never reads still deserialize.
#[derive(Debug, Clone, Deserialize)]
pub enum Value {
    /// UTF-8 string.
    #[serde(rename = "stringValue")]
    String(String),
    /// Boolean.
    #[serde(rename = "booleanValue")]
    Boolean(bool),
    /// 64-bit integer, transported as a decimal string.
    #[serde(rename = "integerValue")]
    Integer(String),
    /// Double-precision float.
    #[serde(rename = "doubleValue")]
    Double(f64),
    /// RFC 3339 timestamp.
    #[serde(rename = "timestampValue")]
    Timestamp(String),
    /// Explicit null.
    #[serde(rename = "nullValue")]
    Null(()),
    /// Base64-encoded bytes.
    #[serde(rename = "bytesValue")]
    Bytes(String),
    /// Reference to another document by resource name.
    #[serde(rename = "referenceValue")]
    Reference(String),
    /// Geographic point.
    #[serde(rename = "geoPointValue")]
    GeoPoint(LatLng),
    /// Nested field map.
    #[serde(rename = "mapValue")]
    Map(MapValue),
    /// Ordered list of values.
    #[serde(rename = "arrayValue")]
    Array(ArrayValue),
}

/// Payload of a [`Value::GeoPoint`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

/// Payload of a [`Value::Map`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MapValue {
    pub fields: HashMap<String, Value>,
}

/// Payload of a [`Value::Array`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ArrayValue {
    pub values: Vec<Value>,
}
