//! Canonical JSON for opaque messages.
//!
//! Every message is rendered as one compact JSON object in the JSON Canonicalization
//! Scheme (RFC 8785): keys sorted at every depth, arrays in order, no whitespace. The
//! type discriminator is embedded under [`TYPE_KEY`].
//!
//! Default-valued fields are kept as the message emits them, so two implementations
//! that agree on the message JSON agree on the canonical string.

use eip712_multi_types::SignableMsg;
use serde_json::Value;

use crate::errors::SerializationError;

pub const TYPE_KEY: &str = "@type";

/// Serialize a message to its canonical JSON string.
pub fn canonical_json(msg: &dyn SignableMsg) -> Result<String, SerializationError> {
    let mut fields = match msg.to_json_value()? {
        Value::Object(fields) => fields,
        other => return Err(SerializationError::NotAnObject(json_kind(&other))),
    };
    if fields.contains_key(TYPE_KEY) {
        return Err(SerializationError::ReservedKey(TYPE_KEY));
    }
    fields.insert(TYPE_KEY.to_string(), Value::String(msg.type_url().to_string()));

    Ok(serde_jcs::to_string(&Value::Object(fields))?)
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
