use crate::errors::{ChainIdError, SignModeError};

/// Parse the EIP-155 chain id out of a chain label such as `greenfield_9000-1`.
///
/// The id is the decimal suffix after the final `-`.
pub fn parse_chain_id(label: &str) -> Result<u64, SignModeError> {
    parse_suffix(label).map_err(|reason| SignModeError::InvalidChainId {
        label: label.to_string(),
        reason,
    })
}

fn parse_suffix(label: &str) -> Result<u64, ChainIdError> {
    let (name, suffix) = label
        .rsplit_once('-')
        .ok_or(ChainIdError::MissingSeparator)?;
    if name.is_empty() {
        return Err(ChainIdError::EmptyName);
    }
    // `u64::from_str` tolerates a leading `+`.
    if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ChainIdError::NotDecimal(suffix.to_string()));
    }
    suffix
        .parse::<u64>()
        .map_err(|_| ChainIdError::Overflow(suffix.to_string()))
}
