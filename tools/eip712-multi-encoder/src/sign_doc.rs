use eip712_multi_types::{Fee, SignableMsg, SignerContext, Tip, TransactionView};

use crate::errors::SignModeError;

/// Everything a signer commits to for one transaction.
///
/// Built per encode call and borrowed from the transaction; never cached.
#[derive(Debug)]
pub struct SignDocument<'a> {
    pub account_number: u64,
    pub sequence: u64,
    pub chain_id: u64,
    pub timeout_height: u64,
    pub fee: &'a Fee,
    pub memo: &'a str,
    pub tip: Option<&'a Tip>,
    pub msgs: Vec<&'a dyn SignableMsg>,
}

impl<'a> SignDocument<'a> {
    pub fn build(
        tx: &'a dyn TransactionView,
        signer: &SignerContext,
        chain_id: u64,
    ) -> Result<Self, SignModeError> {
        let msgs = tx.msgs();
        if msgs.is_empty() {
            return Err(SignModeError::EmptyTransaction);
        }

        Ok(Self {
            account_number: signer.account_number,
            sequence: signer.sequence,
            chain_id,
            timeout_height: tx.timeout_height(),
            fee: tx.fee(),
            memo: tx.memo(),
            tip: tx.tip(),
            msgs,
        })
    }
}
