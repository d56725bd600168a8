// wallet-core/src/recognizer/encrypted.rs
//
// Password-encrypted single keys (BIP-38 "6P...")

use crate::error::WalletResult;
use async_trait::async_trait;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Private key sau khi giải mã
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DecryptedKey {
    pub private_key: [u8; 32],
    pub compressed: bool,
}

impl std::fmt::Debug for DecryptedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecryptedKey")
            .field("private_key", &"[REDACTED]")
            .field("compressed", &self.compressed)
            .finish()
    }
}

/// KeyDecryptor - giải mã encrypted key bằng password
///
/// `Ok(None)` nghĩa là password sai. Lỗi giải mã (scrypt, format hỏng, ...)
/// trả về [`CryptoError::DecryptionFailed`](crate::error::CryptoError::DecryptionFailed).
#[async_trait]
pub trait KeyDecryptor: Send + Sync {
    async fn decrypt(&self, encrypted: &str, passphrase: &str)
        -> WalletResult<Option<DecryptedKey>>;
}
