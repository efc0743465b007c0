//! secp256k1 signing over sign bytes.

use alloy_primitives::{keccak256, Address, B256};
use k256::ecdsa::{Error, RecoveryId, Signature, SigningKey, VerifyingKey};

/// Sign a 32-byte digest, returning `r || s || v` with `v` in {27, 28}.
///
/// The digest is signed as-is (prehash); it is not hashed again.
pub fn sign_digest(digest: &B256, signing_key: &SigningKey) -> Result<[u8; 65], Error> {
    let (signature, recovery_id) = signing_key.sign_prehash_recoverable(digest.as_slice())?;

    let mut sig_bytes = [0u8; 65];
    sig_bytes[..64].copy_from_slice(&signature.to_bytes());
    sig_bytes[64] = recovery_id.to_byte() + 27;
    Ok(sig_bytes)
}

/// Recover the signer address from a digest and an `r || s || v` signature.
///
/// Accepts v in {0, 1, 27, 28}.
pub fn recover_signer(digest: &B256, sig: &[u8; 65]) -> Result<Address, Error> {
    let v = match sig[64] {
        27 | 28 => sig[64] - 27,
        0 | 1 => sig[64],
        _ => return Err(Error::new()),
    };
    let recovery_id = RecoveryId::from_byte(v).ok_or_else(Error::new)?;
    let signature = Signature::from_slice(&sig[..64])?;
    let key = VerifyingKey::recover_from_prehash(digest.as_slice(), &signature, recovery_id)?;
    Ok(address_of(&key))
}

/// Ethereum-style address: last 20 bytes of keccak256 of the uncompressed public key.
pub fn address_of(key: &VerifyingKey) -> Address {
    let point = key.to_encoded_point(false);
    let hash = keccak256(&point.as_bytes()[1..]);
    Address::from_slice(&hash[12..])
}
