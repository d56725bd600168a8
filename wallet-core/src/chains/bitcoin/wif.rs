// wallet-core/src/chains/bitcoin/wif.rs
//
// Wallet Import Format helpers

use crate::error::{CryptoError, WalletError, WalletResult};
use bitcoin::secp256k1::SecretKey;
use bitcoin::{Network, NetworkKind, PrivateKey};
use zeroize::Zeroizing;

/// Encode raw key material as WIF for `network`.
pub fn encode_wif(
    private_key: &[u8; 32],
    compressed: bool,
    network: Network,
) -> WalletResult<Zeroizing<String>> {
    let inner = SecretKey::from_slice(private_key).map_err(|e| {
        WalletError::Crypto(CryptoError::InvalidKeyFormat(format!(
            "Invalid secp256k1 private key: {}",
            e
        )))
    })?;

    let key = PrivateKey {
        compressed,
        network: NetworkKind::from(network),
        inner,
    };
    Ok(Zeroizing::new(key.to_wif()))
}

/// Parse `text` as WIF. Returns `None` for anything that is not a WIF key.
#[inline]
pub fn decode_wif(text: &str) -> Option<PrivateKey> {
    PrivateKey::from_wif(text.trim()).ok()
}
