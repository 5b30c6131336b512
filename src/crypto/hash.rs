//! Hashing utilities for ledger address derivation
//!
//! Fresh ledger addresses are the truncated SHA-256 digest of the
//! deployer, symbol, and registry nonce.

use alloy_primitives::Address;
use sha2::{Digest, Sha256};

/// Computes the SHA-256 digest of the input data
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Derive a ledger address from the deployer, symbol, and deployment nonce
///
/// The first 20 bytes of the digest become the address. The nonce makes
/// repeated deployments of the same symbol by the same deployer distinct.
pub fn ledger_address(deployer: &Address, symbol: &str, nonce: u64) -> Address {
    let mut preimage = Vec::with_capacity(Address::len_bytes() + symbol.len() + 8);
    preimage.extend_from_slice(deployer.as_slice());
    preimage.extend_from_slice(symbol.as_bytes());
    preimage.extend_from_slice(&nonce.to_be_bytes());

    let digest = sha256(&preimage);
    Address::from_slice(&digest[..Address::len_bytes()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256() {
        let digest = sha256(b"hello world");
        let hex: String = digest.iter().map(|b| format!("{:02x}", b)).collect();
        assert_eq!(
            hex,
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_ledger_address_deterministic() {
        let deployer = Address::repeat_byte(0xAA);

        let first = ledger_address(&deployer, "MTK", 0);
        let second = ledger_address(&deployer, "MTK", 0);

        assert_eq!(first, second);
        assert_ne!(first, Address::ZERO);
    }

    #[test]
    fn test_ledger_address_varies_with_inputs() {
        let deployer = Address::repeat_byte(0xAA);

        let base = ledger_address(&deployer, "MTK", 0);
        assert_ne!(base, ledger_address(&deployer, "MTK", 1));
        assert_ne!(base, ledger_address(&deployer, "OTHER", 0));
        assert_ne!(base, ledger_address(&Address::repeat_byte(0xBB), "MTK", 0));
    }
}
