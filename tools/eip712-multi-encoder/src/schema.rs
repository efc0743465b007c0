use std::collections::BTreeMap;

use serde::Serialize;

pub const DOMAIN_TYPE: &str = "EIP712Domain";
pub const PRIMARY_TYPE: &str = "Tx";

/// Slot kinds used by the generated schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum FieldType {
    #[serde(rename = "string")]
    String,
    #[serde(rename = "uint256")]
    Uint256,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TypeField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl TypeField {
    fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

/// Typed-data `types` section: type name to ordered field list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TypeSchema(BTreeMap<String, Vec<TypeField>>);

impl TypeSchema {
    /// Schema for a transaction with `count` messages.
    ///
    /// `Tx` gets one opaque `string` field per message, so the schema never depends on
    /// which message types are present.
    pub fn for_message_count(count: usize) -> Self {
        let mut types = BTreeMap::new();
        types.insert(
            DOMAIN_TYPE.to_string(),
            vec![
                TypeField::new("name", FieldType::String),
                TypeField::new("version", FieldType::String),
                TypeField::new("chainId", FieldType::Uint256),
                TypeField::new("verifyingContract", FieldType::String),
                TypeField::new("salt", FieldType::String),
            ],
        );
        types.insert(
            PRIMARY_TYPE.to_string(),
            (0..count)
                .map(|i| TypeField::new(msg_field_name(i), FieldType::String))
                .collect(),
        );
        Self(types)
    }

    pub fn get(&self, type_name: &str) -> Option<&[TypeField]> {
        self.0.get(type_name).map(Vec::as_slice)
    }

    pub fn tx_fields(&self) -> &[TypeField] {
        self.get(PRIMARY_TYPE).unwrap_or_default()
    }
}

/// Field name for the message at zero-based `index` (`msg-1` for the first message).
pub fn msg_field_name(index: usize) -> String {
    format!("msg-{}", index + 1)
}
