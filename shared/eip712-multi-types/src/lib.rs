//! Shared types for EIP-712 multi-message signing.
//!
//! Used by the encoder and by off-chain tooling that builds or inspects transactions.

pub mod mode;
pub mod msg;
pub mod tx;

pub use mode::{SignMode, SignerContext, UnknownSignMode};
pub use msg::{AnyMsg, SignableMsg};
pub use tx::{AuthInfo, Coin, Fee, Tip, TransactionView, Tx, TxBody};
