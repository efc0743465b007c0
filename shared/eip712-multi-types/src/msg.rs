use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A transaction message that can be signed without the signer knowing its schema.
///
/// Implementations must produce the same JSON for logically equal messages and must use
/// the message's declared field names. Fields at their default value are still emitted.
pub trait SignableMsg: fmt::Debug + Send + Sync {
    /// Type discriminator, e.g. `/cosmos.bank.v1beta1.MsgSend`.
    fn type_url(&self) -> &str;

    /// JSON form of the message fields (without the type discriminator).
    fn to_json_value(&self) -> Result<Value, serde_json::Error>;
}

/// Dynamically typed message, as it appears in JSON-encoded transactions.
///
/// ```json
/// { "@type": "/cosmos.bank.v1beta1.MsgSend", "from_address": "...", "amount": [] }
/// ```
///
/// Integers outside the `i64`/`u64` range must be JSON strings, as [`crate::Coin`]
/// amounts are. A wider integer literal is parsed as `f64` and re-emitted in
/// exponent form, so its canonical encoding no longer matches the input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnyMsg {
    #[serde(rename = "@type")]
    pub type_url: String,
    #[serde(flatten)]
    pub value: Map<String, Value>,
}

impl AnyMsg {
    pub fn new(type_url: impl Into<String>, value: Map<String, Value>) -> Self {
        Self {
            type_url: type_url.into(),
            value,
        }
    }
}

impl SignableMsg for AnyMsg {
    fn type_url(&self) -> &str {
        &self.type_url
    }

    fn to_json_value(&self) -> Result<Value, serde_json::Error> {
        Ok(Value::Object(self.value.clone()))
    }
}
