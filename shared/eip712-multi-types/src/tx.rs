use serde::{Deserialize, Serialize};

use crate::msg::SignableMsg;

/// A token amount. `amount` is a decimal string so large integers survive JSON.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: String,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: u128) -> Self {
        Self {
            denom: denom.into(),
            amount: amount.to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fee {
    #[serde(default)]
    pub amount: Vec<Coin>,
    #[serde(default)]
    pub gas_limit: u64,
    /// Empty when the first signer pays.
    #[serde(default)]
    pub payer: String,
    #[serde(default)]
    pub granter: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tip {
    #[serde(default)]
    pub amount: Vec<Coin>,
    #[serde(default)]
    pub tipper: String,
}

/// Read-only view of a finalized transaction, as seen by sign-mode handlers.
///
/// Signatures are deliberately absent: sign bytes must not depend on them.
pub trait TransactionView {
    /// Messages in transaction order.
    fn msgs(&self) -> Vec<&dyn SignableMsg>;

    fn fee(&self) -> &Fee;

    fn memo(&self) -> &str;

    fn timeout_height(&self) -> u64;

    fn tip(&self) -> Option<&Tip>;
}

#[derive(Debug, Default)]
pub struct TxBody {
    pub messages: Vec<Box<dyn SignableMsg>>,
    pub memo: String,
    pub timeout_height: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthInfo {
    pub fee: Fee,
    pub tip: Option<Tip>,
}

/// A signed (or to-be-signed) transaction.
#[derive(Debug, Default)]
pub struct Tx {
    pub body: TxBody,
    pub auth_info: AuthInfo,
    pub signatures: Vec<Vec<u8>>,
}

impl Tx {
    pub fn new(messages: Vec<Box<dyn SignableMsg>>) -> Self {
        Self {
            body: TxBody {
                messages,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.body.memo = memo.into();
        self
    }

    pub fn with_timeout_height(mut self, timeout_height: u64) -> Self {
        self.body.timeout_height = timeout_height;
        self
    }

    pub fn with_fee(mut self, fee: Fee) -> Self {
        self.auth_info.fee = fee;
        self
    }

    pub fn with_tip(mut self, tip: Option<Tip>) -> Self {
        self.auth_info.tip = tip;
        self
    }

    /// Replace all attached signatures.
    pub fn set_signatures(&mut self, signatures: Vec<Vec<u8>>) {
        self.signatures = signatures;
    }
}

impl TransactionView for Tx {
    fn msgs(&self) -> Vec<&dyn SignableMsg> {
        self.body.messages.iter().map(|m| m.as_ref()).collect()
    }

    fn fee(&self) -> &Fee {
        &self.auth_info.fee
    }

    fn memo(&self) -> &str {
        &self.body.memo
    }

    fn timeout_height(&self) -> u64 {
        self.body.timeout_height
    }

    fn tip(&self) -> Option<&Tip> {
        self.auth_info.tip.as_ref()
    }
}
