// wallet-core/src/crypto/key_deriver.rs
//
// secp256k1 Key Derivation - BIP-32
//
// Algorithm: HMAC-SHA512 hierarchical deterministic derivation
// Reference: https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki

use crate::error::{CryptoError, WalletError, WalletResult};
use bip32::{ChildNumber, DerivationPath, XPrv};
use std::str::FromStr;
use zeroize::Zeroizing;

/// secp256k1 Key Deriver - BIP-32 Standard
///
/// # Security
/// - Private keys wrap trong `Zeroizing<[u8; 32]>` (auto-zeroize khi drop)
/// - Không lưu intermediate keys
///
/// # Performance
/// - Batch derivation: derive tới base path 1 lần, rồi fan-out
pub struct Secp256k1Deriver;

impl Secp256k1Deriver {
    /// Batch derive: derive tới base_path 1 lần, rồi derive từng index
    ///
    /// # Arguments
    /// * `base_path` - Path tới trước index cuối (e.g. "m/84'/0'/0'/0")
    /// * `indices` - Range of non-hardened address indices (e.g. 0..10)
    pub fn derive_batch(
        seed: &[u8],
        base_path: &str,
        indices: std::ops::Range<u32>,
    ) -> WalletResult<Vec<Zeroizing<[u8; 32]>>> {
        let base_xprv = Self::derive_xprv(seed, base_path)?;

        // Fan-out từ base
        let mut keys = Vec::with_capacity(indices.len());
        for index in indices {
            let child_num = ChildNumber::new(index, false).map_err(|e| {
                WalletError::Crypto(CryptoError::DerivationFailed(format!(
                    "Invalid index {}: {}",
                    index, e
                )))
            })?;

            let child_xprv = base_xprv
                .derive_child(child_num)
                .map_err(|e| WalletError::Crypto(CryptoError::DerivationFailed(e.to_string())))?;

            let key_bytes: [u8; 32] = child_xprv.private_key().to_bytes().into();
            keys.push(Zeroizing::new(key_bytes));
        }

        Ok(keys)
    }

    fn derive_xprv(seed: &[u8], path: &str) -> WalletResult<XPrv> {
        let root_xprv = XPrv::new(seed).map_err(|e| {
            WalletError::Crypto(CryptoError::DerivationFailed(format!(
                "Failed to create master key: {}",
                e
            )))
        })?;

        let derivation_path = DerivationPath::from_str(path).map_err(|e| {
            WalletError::Crypto(CryptoError::DerivationFailed(format!(
                "Invalid path '{}': {}",
                path, e
            )))
        })?;

        let mut child = root_xprv;
        for child_num in derivation_path.iter() {
            child = child.derive_child(child_num).map_err(|e| {
                WalletError::Crypto(CryptoError::DerivationFailed(format!(
                    "Child derivation failed: {}",
                    e
                )))
            })?;
        }
        Ok(child)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chains::bitcoin::{BitcoinAddress, ScriptType};
    use crate::crypto::mnemonic::WalletMnemonic;
    use crate::crypto::paths::DerivationPaths;
    use bitcoin::Network;

    const TEST_SEED: &str = "16270f7b026afe7a3746efbfcf43e083500951db9e2699d1e4f372515dabcc80459b9181c3937b5faa4b8f7602f886553d2c32c5f12f3331cef40153aead4de6";
    const ABANDON_ABOUT: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    fn first_receive(account: &str, script: ScriptType, network: Network) -> String {
        let mnemonic = WalletMnemonic::from_phrase(ABANDON_ABOUT).unwrap();
        let seed = mnemonic.to_seed_bytes(None).unwrap();
        let keys =
            Secp256k1Deriver::derive_batch(&*seed, &DerivationPaths::chain_base(account, 0), 0..1)
                .unwrap();
        BitcoinAddress::derive_from_slice(&*keys[0], script, network).unwrap()
    }

    #[test]
    fn test_bip84_vector() {
        // BIP-84 test vector: first receive address of account 0
        assert_eq!(
            first_receive("m/84'/0'/0'", ScriptType::P2wpkh, Network::Bitcoin),
            "bc1qcr8te4kr609gcawutmrza0j4xv80jy8z306fyu"
        );
    }

    #[test]
    fn test_bip44_vector() {
        assert_eq!(
            first_receive("m/44'/0'/0'", ScriptType::P2pkh, Network::Bitcoin),
            "1LqBGSKuX5yYUonjxT5qGfpUsXKYYWeabA"
        );
    }

    #[test]
    fn test_bip84_testnet_vector() {
        assert_eq!(
            first_receive("m/84'/1'/0'", ScriptType::P2wpkh, Network::Testnet),
            "tb1q6rz28mcfaxtmd6v789l9rrlrusdprr9pqcpvkl"
        );
    }

    #[test]
    fn test_batch_derivation() {
        let seed = hex::decode(TEST_SEED).unwrap();
        let keys = Secp256k1Deriver::derive_batch(&seed, "m/84'/0'/0'/0", 0..5).unwrap();

        assert_eq!(keys.len(), 5);
        // Tất cả phải khác nhau
        for i in 0..keys.len() {
            for j in (i + 1)..keys.len() {
                assert_ne!(&*keys[i], &*keys[j], "Key {} and {} should differ", i, j);
            }
        }
    }

    #[test]
    fn test_batch_ranges_agree() {
        let seed = hex::decode(TEST_SEED).unwrap();
        let all = Secp256k1Deriver::derive_batch(&seed, "m/49'/0'/0'/1", 0..3).unwrap();
        let tail = Secp256k1Deriver::derive_batch(&seed, "m/49'/0'/0'/1", 1..3).unwrap();

        assert_eq!(&*all[1], &*tail[0]);
        assert_eq!(&*all[2], &*tail[1]);
    }

    #[test]
    fn test_different_paths_different_keys() {
        let seed = hex::decode(TEST_SEED).unwrap();
        let legacy = Secp256k1Deriver::derive_batch(&seed, "m/44'/0'/0'/0", 0..1).unwrap();
        let segwit = Secp256k1Deriver::derive_batch(&seed, "m/84'/0'/0'/0", 0..1).unwrap();
        assert_ne!(&*legacy[0], &*segwit[0]);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(Secp256k1Deriver::derive_batch(&[0u8; 8], "m/84'/0'/0'/0", 0..1).is_err());

        let seed = hex::decode(TEST_SEED).unwrap();
        assert!(Secp256k1Deriver::derive_batch(&seed, "invalid", 0..1).is_err());
        // Index hardened không hợp lệ cho address level
        assert!(Secp256k1Deriver::derive_batch(&seed, "m/84'/0'/0'/0", 0x8000_0000..0x8000_0001).is_err());
    }
}
