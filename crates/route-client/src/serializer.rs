//! Body serializer seam.

use crate::error::BoxError;

/// Encodes request bodies and decodes response bodies.
///
/// Values cross the seam as [`serde_json::Value`], so the typed step
/// (`Value` → declared return type) stays with the response mapper and any
/// wire format that can represent a JSON value can be plugged in.
///
/// A body that decodes to `null` is returned as `Ok(Value::Null)`; only
/// malformed input is an error.
pub trait Serializer: Send + Sync {
    /// Content type attached to encoded bodies.
    fn content_type(&self) -> &str;

    /// Encode a body value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be represented in the wire format.
    fn encode(&self, value: &serde_json::Value) -> Result<Vec<u8>, BoxError>;

    /// Decode a response body.
    ///
    /// # Errors
    ///
    /// Returns an error if `body` is not valid in the wire format.
    fn decode(&self, body: &[u8]) -> Result<serde_json::Value, BoxError>;
}

/// JSON serializer backed by `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

impl Serializer for JsonSerializer {
    fn content_type(&self) -> &str {
        "application/json"
    }

    fn encode(&self, value: &serde_json::Value) -> Result<Vec<u8>, BoxError> {
        Ok(serde_json::to_vec(value)?)
    }

    fn decode(&self, body: &[u8]) -> Result<serde_json::Value, BoxError> {
        Ok(serde_json::from_slice(body)?)
    }
}
