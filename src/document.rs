//! Semi-structured JSON documents
//!
//! The gateway's request and response shapes are mostly bags of optional
//! fields. [`Document`] keeps them as a JSON object and offers typed getters;
//! [`Document::to_typed`] converts into one of the structs in
//! [`crate::models`] when a stronger view is wanted.

use crate::error::{SdkError, SdkResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A JSON object with string keys
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Map<String, Value>);

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from any value that serializes to a JSON object
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::Serialization`] if `value` fails to serialize or
    /// serializes to something other than an object.
    pub fn from_typed<T: Serialize + ?Sized>(value: &T) -> SdkResult<Self> {
        let value = serde_json::to_value(value)
            .map_err(|e| SdkError::serialization("Failed to convert value to a document", e))?;
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(SdkError::serialization(
                "Documents must be JSON objects",
                <serde_json::Error as serde::ser::Error>::custom(format!(
                    "expected an object, got {}",
                    json_kind(&other)
                )),
            )),
        }
    }

    /// Convert into a strongly typed view
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::Decode`] if the document does not fit `T`.
    pub fn to_typed<T: DeserializeOwned>(&self) -> SdkResult<T> {
        serde_json::from_value(Value::Object(self.0.clone())).map_err(|e| {
            SdkError::decode(
                format!("Document does not fit {}", std::any::type_name::<T>()),
                e,
            )
        })
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    pub fn f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    pub fn bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    pub fn array(&self, key: &str) -> Option<&Vec<Value>> {
        self.get(key).and_then(Value::as_array)
    }

    pub fn object(&self, key: &str) -> Option<&Map<String, Value>> {
        self.get(key).and_then(Value::as_object)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Insert a field, returning the previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Document {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Document> for Value {
    fn from(document: Document) -> Self {
        Value::Object(document.0)
    }
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
