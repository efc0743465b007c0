//! `SIGN_MODE_EIP_712` handler for transactions with any number of messages.
//!
//! Single-message transactions go to a [`SingleMessageEncoder`]; everything else is
//! packed into a flat `Tx` struct with one opaque string field per message.

use alloy_primitives::B256;
use eip712_multi_types::{SignMode, SignerContext, TransactionView};
use tracing::debug;

use crate::{
    domain::{DomainTemplate, GREENFIELD_DOMAIN},
    errors::SignModeError,
    hasher::{Eip712Hasher, TypedDataHasher},
    typed_data::{build_typed_data, encode_typed_data, TypedDataDocument},
};

const HANDLED_MODES: &[SignMode] = &[SignMode::Eip712];

/// Sign bytes for transactions carrying exactly one message.
pub trait SingleMessageEncoder: Send + Sync {
    fn encode_single(
        &self,
        mode: SignMode,
        signer: &SignerContext,
        tx: &dyn TransactionView,
    ) -> Result<B256, SignModeError>;
}

/// Single-message encoder that runs the generic path with one `msg-1` field, so a
/// one-message transaction hashes the same whichever path it takes.
#[derive(Clone, Debug, Default)]
pub struct FlatSingleMessageEncoder<H = Eip712Hasher> {
    domain: DomainTemplate,
    hasher: H,
}

impl FlatSingleMessageEncoder {
    pub fn new(domain: DomainTemplate) -> Self {
        Self {
            domain,
            hasher: Eip712Hasher,
        }
    }
}

impl<H: TypedDataHasher> SingleMessageEncoder for FlatSingleMessageEncoder<H> {
    fn encode_single(
        &self,
        mode: SignMode,
        signer: &SignerContext,
        tx: &dyn TransactionView,
    ) -> Result<B256, SignModeError> {
        ensure_mode(mode)?;
        encode_typed_data(&self.domain, &self.hasher, signer, tx)
    }
}

/// Mode handler producing EIP-712 digests.
#[derive(Clone, Debug)]
pub struct SignModeEip712MultiHandler<S = FlatSingleMessageEncoder, H = Eip712Hasher> {
    domain: DomainTemplate,
    single: S,
    hasher: H,
}

impl SignModeEip712MultiHandler {
    pub fn new() -> Self {
        Self::with_domain(GREENFIELD_DOMAIN)
    }

    /// Handler whose generic and single-message paths both use `domain`.
    pub fn with_domain(domain: DomainTemplate) -> Self {
        Self {
            single: FlatSingleMessageEncoder::new(domain.clone()),
            domain,
            hasher: Eip712Hasher,
        }
    }
}

impl Default for SignModeEip712MultiHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SingleMessageEncoder, H: TypedDataHasher> SignModeEip712MultiHandler<S, H> {
    pub fn from_parts(domain: DomainTemplate, single: S, hasher: H) -> Self {
        Self {
            domain,
            single,
            hasher,
        }
    }

    pub fn default_mode(&self) -> SignMode {
        SignMode::Eip712
    }

    pub fn modes(&self) -> &'static [SignMode] {
        HANDLED_MODES
    }

    pub fn domain(&self) -> &DomainTemplate {
        &self.domain
    }

    /// Digest the signer must sign for `tx`.
    pub fn get_sign_bytes(
        &self,
        mode: SignMode,
        signer: &SignerContext,
        tx: &dyn TransactionView,
    ) -> Result<B256, SignModeError> {
        ensure_mode(mode)?;

        let msg_count = tx.msgs().len();
        if msg_count == 1 {
            debug!(chain = %signer.chain_label, "encoding single-message tx");
            return self.single.encode_single(mode, signer, tx);
        }

        debug!(chain = %signer.chain_label, msg_count, "encoding multi-message tx");
        encode_typed_data(&self.domain, &self.hasher, signer, tx)
    }

    /// Typed-data document of the generic path, for export or independent verification.
    ///
    /// This is what `get_sign_bytes` hashes unless a custom single-message encoder
    /// handles the transaction.
    pub fn typed_data(
        &self,
        mode: SignMode,
        signer: &SignerContext,
        tx: &dyn TransactionView,
    ) -> Result<TypedDataDocument, SignModeError> {
        ensure_mode(mode)?;
        build_typed_data(&self.domain, signer, tx)
    }
}

fn ensure_mode(mode: SignMode) -> Result<(), SignModeError> {
    if mode != SignMode::Eip712 {
        return Err(SignModeError::UnsupportedMode {
            expected: SignMode::Eip712,
            got: mode,
        });
    }
    Ok(())
}
