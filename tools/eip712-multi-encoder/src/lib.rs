//! Deterministic EIP-712 sign bytes for transactions carrying one or more opaque messages.
//!
//! The entry point is [`SignModeEip712MultiHandler::get_sign_bytes`]. A transaction with
//! `n` messages becomes a `Tx` struct with fields `msg-1..msg-n`, each holding the
//! canonical JSON of one message, under a fixed `EIP712Domain`.

pub mod canonical;
pub mod chain_id;
pub mod domain;
pub mod errors;
pub mod handler;
pub mod hasher;
pub mod schema;
pub mod sign_doc;
pub mod signer;
pub mod typed_data;


pub use canonical::canonical_json;
pub use chain_id::parse_chain_id;
pub use domain::{DomainDescriptor, DomainTemplate, GREENFIELD_DOMAIN};
pub use errors::{ChainIdError, HashError, SerializationError, SignModeError};
pub use handler::{FlatSingleMessageEncoder, SignModeEip712MultiHandler, SingleMessageEncoder};
pub use hasher::{hash_typed_data_json, Eip712Hasher, TypedDataHasher};
pub use schema::{msg_field_name, FieldType, TypeField, TypeSchema};
pub use sign_doc::SignDocument;
pub use signer::{address_of, recover_signer, sign_digest};
pub use typed_data::{build_typed_data, encode_typed_data, TypedDataDocument};
