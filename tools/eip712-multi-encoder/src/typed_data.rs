//! Typed-data assembly for multi-message transactions.

use std::collections::BTreeMap;

use alloy_primitives::B256;
use eip712_multi_types::{SignerContext, TransactionView};
use serde::Serialize;
use tracing::trace;

use crate::{
    canonical::canonical_json,
    chain_id::parse_chain_id,
    domain::{DomainDescriptor, DomainTemplate},
    errors::{HashError, SignModeError},
    hasher::TypedDataHasher,
    schema::{msg_field_name, TypeSchema, PRIMARY_TYPE},
    sign_doc::SignDocument,
};

/// EIP-712 typed-data document, serialized as `{types, primaryType, domain, message}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TypedDataDocument {
    pub types: TypeSchema,
    #[serde(rename = "primaryType")]
    pub primary_type: String,
    pub domain: DomainDescriptor,
    /// Field name (`msg-<i>`) to the canonical JSON of the i-th message.
    pub message: BTreeMap<String, String>,
}

/// Pack a sign document into typed data.
///
/// Message i is stored under the i-th `Tx` field of `schema`.
pub fn wrap_multi_tx_to_typed_data(
    domain: &DomainTemplate,
    chain_id: u64,
    sign_doc: &SignDocument<'_>,
    schema: TypeSchema,
) -> Result<TypedDataDocument, SignModeError> {
    let fields = schema.tx_fields();
    let mut message = BTreeMap::new();
    for (index, msg) in sign_doc.msgs.iter().enumerate() {
        let field = fields.get(index).ok_or_else(|| HashError::UnexpectedField {
            type_name: PRIMARY_TYPE.to_string(),
            field: msg_field_name(index),
        })?;
        let canonical = canonical_json(*msg).map_err(|source| SignModeError::Serialization {
            index,
            type_url: msg.type_url().to_string(),
            source,
        })?;
        trace!(field = %field.name, canonical = %canonical, "canonicalized message");
        message.insert(field.name.clone(), canonical);
    }

    Ok(TypedDataDocument {
        types: schema,
        primary_type: PRIMARY_TYPE.to_string(),
        domain: domain.descriptor(chain_id),
        message,
    })
}

/// Run the generic path up to the typed-data document: chain id, sign document,
/// schema, assembly.
pub fn build_typed_data(
    domain: &DomainTemplate,
    signer: &SignerContext,
    tx: &dyn TransactionView,
) -> Result<TypedDataDocument, SignModeError> {
    let chain_id = parse_chain_id(&signer.chain_label)?;
    let sign_doc = SignDocument::build(tx, signer, chain_id)?;
    let schema = TypeSchema::for_message_count(sign_doc.msgs.len());
    wrap_multi_tx_to_typed_data(domain, chain_id, &sign_doc, schema)
}

/// Generic path end to end: typed data, then its digest.
pub fn encode_typed_data<H>(
    domain: &DomainTemplate,
    hasher: &H,
    signer: &SignerContext,
    tx: &dyn TransactionView,
) -> Result<B256, SignModeError>
where
    H: TypedDataHasher + ?Sized,
{
    let typed_data = build_typed_data(domain, signer, tx)?;
    Ok(hasher.hash_typed_data(&typed_data)?)
}
