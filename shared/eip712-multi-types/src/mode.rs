use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Signing modes a transaction may be signed under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignMode {
    Unspecified,
    Direct,
    Textual,
    LegacyAminoJson,
    Eip712,
}

impl SignMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignMode::Unspecified => "SIGN_MODE_UNSPECIFIED",
            SignMode::Direct => "SIGN_MODE_DIRECT",
            SignMode::Textual => "SIGN_MODE_TEXTUAL",
            SignMode::LegacyAminoJson => "SIGN_MODE_LEGACY_AMINO_JSON",
            SignMode::Eip712 => "SIGN_MODE_EIP_712",
        }
    }
}

impl fmt::Display for SignMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownSignMode(pub String);

impl fmt::Display for UnknownSignMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown sign mode `{}`", self.0)
    }
}

impl std::error::Error for UnknownSignMode {}

impl FromStr for SignMode {
    type Err = UnknownSignMode;

    /// Accepts both the short CLI spelling (`eip712`) and the canonical name (`SIGN_MODE_EIP_712`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mode = match s.to_ascii_lowercase().as_str() {
            "unspecified" | "sign_mode_unspecified" => SignMode::Unspecified,
            "direct" | "sign_mode_direct" => SignMode::Direct,
            "textual" | "sign_mode_textual" => SignMode::Textual,
            "amino-json" | "legacy_amino_json" | "sign_mode_legacy_amino_json" => {
                SignMode::LegacyAminoJson
            }
            "eip712" | "eip-712" | "sign_mode_eip_712" => SignMode::Eip712,
            _ => return Err(UnknownSignMode(s.to_string())),
        };
        Ok(mode)
    }
}

/// Per-signer data needed to produce sign bytes.
///
/// `chain_label` has the form `<name>-<decimal>`, e.g. `greenfield_9000-1`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerContext {
    pub chain_label: String,
    pub account_number: u64,
    pub sequence: u64,
}

impl SignerContext {
    pub fn new(chain_label: impl Into<String>, account_number: u64, sequence: u64) -> Self {
        Self {
            chain_label: chain_label.into(),
            account_number,
            sequence,
        }
    }
}
