use eip712_multi_types::SignMode;

/// Errors returned while producing EIP-712 sign bytes.
#[derive(Debug, thiserror::Error)]
pub enum SignModeError {
    #[error("failed to parse chainID: {label}")]
    InvalidChainId {
        label: String,
        #[source]
        reason: ChainIdError,
    },
    #[error("transaction has no messages to sign")]
    EmptyTransaction,
    #[error("expected {expected}, got {got}")]
    UnsupportedMode { expected: SignMode, got: SignMode },
    #[error("failed to serialize message {index} ({type_url})")]
    Serialization {
        index: usize,
        type_url: String,
        #[source]
        source: SerializationError,
    },
    #[error("failed to hash typed data")]
    Hashing(#[from] HashError),
}

impl SignModeError {
    /// True when the caller supplied bad input; false when the encoder itself (or a
    /// message implementation) misbehaved, which should be treated as a defect.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            SignModeError::InvalidChainId { .. }
                | SignModeError::EmptyTransaction
                | SignModeError::UnsupportedMode { .. }
        )
    }
}

/// Why a chain label did not yield an EIP-155 chain id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainIdError {
    #[error("missing `-<number>` suffix")]
    MissingSeparator,
    #[error("empty chain name")]
    EmptyName,
    #[error("suffix `{0}` is not a decimal number")]
    NotDecimal(String),
    #[error("suffix `{0}` does not fit in 64 bits")]
    Overflow(String),
}

/// Failures turning a message into its canonical JSON string.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    #[error("message JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("message must encode to a JSON object, got {0}")]
    NotAnObject(&'static str),
    #[error("message declares reserved key `{0}`")]
    ReservedKey(&'static str),
}

/// Failures in the typed-data hash primitive.
#[derive(Debug, thiserror::Error)]
pub enum HashError {
    #[error("typed data JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("type `{0}` is not defined")]
    UnknownType(String),
    #[error("`{type_name}` is missing field `{field}`")]
    MissingField { type_name: String, field: String },
    #[error("`{type_name}` has undeclared field `{field}`")]
    UnexpectedField { type_name: String, field: String },
    #[error("invalid `{type_name}` value: {reason}")]
    InvalidValue { type_name: String, reason: String },
}

impl HashError {
    pub(crate) fn invalid(type_name: &str, reason: impl Into<String>) -> Self {
        HashError::InvalidValue {
            type_name: type_name.to_string(),
            reason: reason.into(),
        }
    }
}
