//! EIP-712 hashing over JSON typed data.
//!
//! Digest: `keccak256("\x19\x01" || hashStruct("EIP712Domain", domain) || hashStruct(primaryType, message))`.
//! See https://eips.ethereum.org/EIPS/eip-712.

use std::collections::{BTreeMap, BTreeSet};

use alloy_primitives::{keccak256, B256, U256};
use serde::Deserialize;
use serde_json::Value;

use crate::{errors::HashError, schema::DOMAIN_TYPE, typed_data::TypedDataDocument};

/// Computes the digest of a typed-data document.
pub trait TypedDataHasher: Send + Sync {
    fn hash_typed_data(&self, typed_data: &TypedDataDocument) -> Result<B256, HashError>;
}

/// Standard EIP-712 hasher. Hashes the document's JSON wire form, so the digest is
/// reproducible by any verifier holding the same JSON.
#[derive(Clone, Copy, Debug, Default)]
pub struct Eip712Hasher;

impl TypedDataHasher for Eip712Hasher {
    fn hash_typed_data(&self, typed_data: &TypedDataDocument) -> Result<B256, HashError> {
        let value = serde_json::to_value(typed_data)?;
        hash_typed_data_value(&value)
    }
}

/// Digest of a typed-data JSON document (`types`, `primaryType`, `domain`, `message`).
pub fn hash_typed_data_json(json: &str) -> Result<B256, HashError> {
    let value: Value = serde_json::from_str(json)?;
    hash_typed_data_value(&value)
}

type Types = BTreeMap<String, Vec<RawField>>;

#[derive(Deserialize)]
struct RawTypedData {
    types: Types,
    #[serde(rename = "primaryType")]
    primary_type: String,
    domain: Value,
    message: Value,
}

#[derive(Deserialize)]
struct RawField {
    name: String,
    #[serde(rename = "type")]
    type_: String,
}

fn hash_typed_data_value(value: &Value) -> Result<B256, HashError> {
    let data = RawTypedData::deserialize(value)?;

    let domain_separator = hash_struct(&data.types, DOMAIN_TYPE, &data.domain)?;
    let message_hash = hash_struct(&data.types, &data.primary_type, &data.message)?;

    let mut buf = Vec::with_capacity(2 + 32 + 32);
    buf.extend_from_slice(b"\x19\x01");
    buf.extend_from_slice(domain_separator.as_slice());
    buf.extend_from_slice(message_hash.as_slice());
    Ok(keccak256(&buf))
}

/// `hashStruct(s) = keccak256(typeHash || encodeData(s))`.
fn hash_struct(types: &Types, type_name: &str, value: &Value) -> Result<B256, HashError> {
    let fields = types
        .get(type_name)
        .ok_or_else(|| HashError::UnknownType(type_name.to_string()))?;
    let object = value
        .as_object()
        .ok_or_else(|| HashError::invalid(type_name, "expected a JSON object"))?;

    // Values not declared by the type are rejected.
    if let Some(extra) = object
        .keys()
        .find(|key| !fields.iter().any(|f| &f.name == *key))
    {
        return Err(HashError::UnexpectedField {
            type_name: type_name.to_string(),
            field: extra.clone(),
        });
    }

    let mut buf = Vec::with_capacity((1 + fields.len()) * 32);
    buf.extend_from_slice(type_hash(types, type_name)?.as_slice());
    for field in fields {
        let field_value = object.get(&field.name).ok_or_else(|| HashError::MissingField {
            type_name: type_name.to_string(),
            field: field.name.clone(),
        })?;
        buf.extend_from_slice(encode_field(types, &field.type_, field_value)?.as_slice());
    }
    Ok(keccak256(&buf))
}

/// `keccak256(encodeType(type_name))`: the primary type followed by every referenced
/// struct type in alphabetical order.
fn type_hash(types: &Types, type_name: &str) -> Result<B256, HashError> {
    let mut referenced = BTreeSet::new();
    collect_referenced_types(types, type_name, &mut referenced);
    referenced.remove(type_name);

    let mut encoded = encode_type(types, type_name)?;
    for dep in &referenced {
        encoded.push_str(&encode_type(types, dep)?);
    }
    Ok(keccak256(encoded.as_bytes()))
}

fn encode_type(types: &Types, type_name: &str) -> Result<String, HashError> {
    let fields = types
        .get(type_name)
        .ok_or_else(|| HashError::UnknownType(type_name.to_string()))?;
    let members: Vec<String> = fields
        .iter()
        .map(|f| format!("{} {}", f.type_, f.name))
        .collect();
    Ok(format!("{type_name}({})", members.join(",")))
}

fn collect_referenced_types(types: &Types, type_name: &str, referenced: &mut BTreeSet<String>) {
    if !referenced.insert(type_name.to_string()) {
        return;
    }
    if let Some(fields) = types.get(type_name) {
        for field in fields {
            let base = strip_array_suffix(&field.type_);
            if types.contains_key(base) {
                collect_referenced_types(types, base, referenced);
            }
        }
    }
}

fn strip_array_suffix(type_name: &str) -> &str {
    match type_name.rfind('[') {
        Some(pos) if type_name.ends_with(']') => &type_name[..pos],
        _ => type_name,
    }
}

fn encode_field(types: &Types, type_name: &str, value: &Value) -> Result<B256, HashError> {
    if let Some(pos) = type_name.rfind('[').filter(|_| type_name.ends_with(']')) {
        let element_type = &type_name[..pos];
        let items = value
            .as_array()
            .ok_or_else(|| HashError::invalid(type_name, "expected a JSON array"))?;
        let fixed_len = &type_name[pos + 1..type_name.len() - 1];
        if !fixed_len.is_empty() && fixed_len.parse::<usize>().ok() != Some(items.len()) {
            return Err(HashError::invalid(
                type_name,
                format!("expected {fixed_len} elements, got {}", items.len()),
            ));
        }
        let mut buf = Vec::with_capacity(items.len() * 32);
        for item in items {
            buf.extend_from_slice(encode_field(types, element_type, item)?.as_slice());
        }
        return Ok(keccak256(&buf));
    }

    if types.contains_key(type_name) {
        return hash_struct(types, type_name, value);
    }

    encode_atomic(type_name, value)
}

/// Encode an atomic value into its 32-byte word.
fn encode_atomic(type_name: &str, value: &Value) -> Result<B256, HashError> {
    match type_name {
        "string" => {
            let s = value
                .as_str()
                .ok_or_else(|| HashError::invalid(type_name, "expected a string"))?;
            Ok(keccak256(s.as_bytes()))
        }
        "bytes" => Ok(keccak256(&hex_value(type_name, value)?)),
        "bool" => {
            let b = value
                .as_bool()
                .ok_or_else(|| HashError::invalid(type_name, "expected a boolean"))?;
            Ok(word_of(U256::from(b as u8)))
        }
        "address" => {
            let bytes = hex_value(type_name, value)?;
            if bytes.len() != 20 {
                return Err(HashError::invalid(type_name, "address must be 20 bytes"));
            }
            let mut word = [0u8; 32];
            word[12..].copy_from_slice(&bytes);
            Ok(B256::from(word))
        }
        _ => {
            if let Some(bits) = sized_suffix(type_name, "uint") {
                return Ok(word_of(uint_value(type_name, bits, value)?));
            }
            if let Some(bits) = sized_suffix(type_name, "int") {
                return Ok(word_of(int_value(type_name, bits, value)?));
            }
            if let Some(len) = type_name
                .strip_prefix("bytes")
                .and_then(|n| n.parse::<usize>().ok())
                .filter(|n| (1..=32).contains(n))
            {
                let bytes = hex_value(type_name, value)?;
                if bytes.len() != len {
                    return Err(HashError::invalid(
                        type_name,
                        format!("expected {len} bytes, got {}", bytes.len()),
                    ));
                }
                let mut word = [0u8; 32];
                word[..len].copy_from_slice(&bytes);
                return Ok(B256::from(word));
            }
            Err(HashError::UnknownType(type_name.to_string()))
        }
    }
}

fn word_of(n: U256) -> B256 {
    B256::from(n.to_be_bytes::<32>())
}

/// Bit width of `uintN`/`intN` (plain `uint`/`int` is 256).
fn sized_suffix(type_name: &str, prefix: &str) -> Option<usize> {
    let rest = type_name.strip_prefix(prefix)?;
    if rest.is_empty() {
        return Some(256);
    }
    rest.parse::<usize>()
        .ok()
        .filter(|bits| *bits >= 8 && *bits <= 256 && bits % 8 == 0)
}

fn hex_value(type_name: &str, value: &Value) -> Result<Vec<u8>, HashError> {
    let s = value
        .as_str()
        .ok_or_else(|| HashError::invalid(type_name, "expected a hex string"))?;
    let s = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(s).map_err(|e| HashError::invalid(type_name, e.to_string()))
}

/// Accepts a JSON number, a decimal string, or a `0x` hex string.
fn magnitude(type_name: &str, text: &str) -> Result<U256, HashError> {
    let parsed = match text.strip_prefix("0x") {
        Some(hex_digits) => U256::from_str_radix(hex_digits, 16),
        None => U256::from_str_radix(text, 10),
    };
    parsed.map_err(|e| HashError::invalid(type_name, e.to_string()))
}

fn uint_value(type_name: &str, bits: usize, value: &Value) -> Result<U256, HashError> {
    let n = match value {
        Value::Number(n) => n
            .as_u64()
            .map(U256::from)
            .ok_or_else(|| HashError::invalid(type_name, "expected a non-negative integer"))?,
        Value::String(s) => magnitude(type_name, s)?,
        _ => return Err(HashError::invalid(type_name, "expected a number or string")),
    };
    if n.bit_len() > bits {
        return Err(HashError::invalid(type_name, format!("{n} overflows {bits} bits")));
    }
    Ok(n)
}

/// Two's-complement word for `intN`.
fn int_value(type_name: &str, bits: usize, value: &Value) -> Result<U256, HashError> {
    let (negative, mag) = match value {
        Value::Number(n) => {
            let i = n
                .as_i64()
                .ok_or_else(|| HashError::invalid(type_name, "expected an integer"))?;
            (i < 0, U256::from(i.unsigned_abs()))
        }
        Value::String(s) => match s.strip_prefix('-') {
            Some(rest) => (true, magnitude(type_name, rest)?),
            None => (false, magnitude(type_name, s)?),
        },
        _ => return Err(HashError::invalid(type_name, "expected a number or string")),
    };

    // Positive values need a spare sign bit; negatives may reach -2^(bits-1).
    let limit = U256::from(1u8) << (bits - 1);
    if (!negative && mag >= limit) || (negative && mag > limit) {
        return Err(HashError::invalid(type_name, format!("value overflows {bits} bits")));
    }
    if negative {
        Ok((!mag).wrapping_add(U256::from(1u8)))
    } else {
        Ok(mag)
    }
}
