// wallet-core/src/chains/bitcoin/address.rs
//
// Bitcoin Address Module - Single-sig address derivation
// P2PKH (1...), P2SH-P2WPKH (3...), P2WPKH (bc1q...)

use crate::error::{CryptoError, WalletError, WalletResult};
use bitcoin::secp256k1::{Secp256k1, SecretKey};
use bitcoin::{Address, CompressedPublicKey, Network, NetworkKind, PrivateKey, PublicKey};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Script type of a single-sig output, as named in the recognition plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScriptType {
    /// Legacy pay-to-pubkey-hash (BIP-44)
    #[serde(rename = "p2pkh")]
    P2pkh,
    /// Native SegWit wrapped in P2SH (BIP-49)
    #[serde(rename = "p2wpkh-p2sh")]
    P2wpkhP2sh,
    /// Native SegWit v0 (BIP-84)
    #[serde(rename = "p2wpkh")]
    P2wpkh,
}

impl ScriptType {
    pub const fn as_str(self) -> &'static str {
        match self {
            ScriptType::P2pkh => "p2pkh",
            ScriptType::P2wpkhP2sh => "p2wpkh-p2sh",
            ScriptType::P2wpkh => "p2wpkh",
        }
    }
}

impl fmt::Display for ScriptType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bitcoin Address Generator
///
/// # Flow:  Private Key (32B) → Public Key (33B / 65B) → HASH160 → Script → Address
///
/// Không lưu private key: mọi hàm nhận key theo reference và trả về chuỗi address.
pub struct BitcoinAddress;

impl BitcoinAddress {
    /// Derive an address from raw 32-byte key material.
    ///
    /// The key is treated as compressed, which is how every BIP-32 child key is
    /// serialized.
    pub fn derive_from_slice(
        priv_key: &[u8],
        script: ScriptType,
        network: Network,
    ) -> WalletResult<String> {
        let secret_key = SecretKey::from_slice(priv_key).map_err(|e| {
            WalletError::Crypto(CryptoError::InvalidKeyFormat(format!(
                "Invalid secp256k1 private key: {}",
                e
            )))
        })?;
        let private_key = PrivateKey::new(secret_key, NetworkKind::from(network));
        Self::derive(&private_key, script, network)
    }

    /// Derive an address for `script` from a parsed private key.
    ///
    /// Returns [`CryptoError::InvalidKeyFormat`] when a SegWit script is
    /// requested for an uncompressed key.
    pub fn derive(
        private_key: &PrivateKey,
        script: ScriptType,
        network: Network,
    ) -> WalletResult<String> {
        let secp = Secp256k1::signing_only();

        let address = match script {
            ScriptType::P2pkh => {
                let public_key = PublicKey::from_private_key(&secp, private_key);
                Address::p2pkh(public_key.pubkey_hash(), network)
            }
            ScriptType::P2wpkhP2sh => {
                let compressed = Self::compressed_key(&secp, private_key)?;
                Address::p2shwpkh(&compressed, network)
            }
            ScriptType::P2wpkh => {
                let compressed = Self::compressed_key(&secp, private_key)?;
                Address::p2wpkh(&compressed, network)
            }
        };

        Ok(address.to_string())
    }

    fn compressed_key(
        secp: &Secp256k1<bitcoin::secp256k1::SignOnly>,
        private_key: &PrivateKey,
    ) -> WalletResult<CompressedPublicKey> {
        CompressedPublicKey::from_private_key(secp, private_key).map_err(|_| {
            WalletError::Crypto(CryptoError::InvalidKeyFormat(
                "SegWit requires a compressed public key".to_string(),
            ))
        })
    }

    // =========================================================================
    // UTILITIES
    // =========================================================================

    /// Kiểm tra chuỗi có phải địa chỉ hợp lệ trên `network` không
    #[inline]
    pub fn is_valid(address: &str, network: Network) -> bool {
        Address::from_str(address)
            .map(|a| a.is_valid_for_network(network))
            .unwrap_or(false)
    }
}

// =============================================================================
// TESTS
// =============================================================================
