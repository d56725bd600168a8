// wallet-core\src\crypto\mnemonic.rs
//
// Mnemonic Module - BIP-39 validation & seed derivation
// Chuẩn: BIP-39 (Mnemonic), PBKDF2-HMAC-SHA512 (Seed Derivation)

use crate::error::{MnemonicError, WalletError, WalletResult};
use bip39::Mnemonic;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Wallet Mnemonic - BIP-39 phrase recovered from user input
///
/// # Security Architecture
/// - **ZeroizeOnDrop**: Phrase được tự động ghi đè bằng 0 khi struct bị drop
/// - **No Debug Leak**: Custom Debug impl không hiển thị phrase
///
/// The import pipeline only ever restores phrases, it never generates them.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct WalletMnemonic {
    phrase: String,
    word_count: usize,
}

// Custom Debug - KHÔNG BAO GIỜ hiển thị mnemonic phrase
impl std::fmt::Debug for WalletMnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletMnemonic")
            .field("word_count", &self.word_count)
            .field("phrase", &"[REDACTED]")
            .finish()
    }
}

impl WalletMnemonic {
    /// Khôi phục mnemonic từ phrase có sẵn
    ///
    /// # Validation
    /// - Kiểm tra số lượng words (12, 15, 18, 21, 24)
    /// - Kiểm tra từng word có trong BIP-39 wordlist
    /// - Kiểm tra checksum
    pub fn from_phrase(phrase: &str) -> WalletResult<Self> {
        // Normalize whitespace và count words
        let normalized = phrase.split_whitespace().collect::<Vec<_>>();
        let count = normalized.len();

        if !matches!(count, 12 | 15 | 18 | 21 | 24) {
            return Err(WalletError::Mnemonic(MnemonicError::InvalidWordCount(
                count,
            )));
        }

        let normalized_phrase = normalized.join(" ");
        Mnemonic::parse(normalized_phrase.as_str()).map_err(|e| {
            WalletError::Mnemonic(match e {
                bip39::Error::UnknownWord(index) => MnemonicError::UnknownWord(index),
                bip39::Error::InvalidChecksum => MnemonicError::ChecksumFailed,
                bip39::Error::BadWordCount(n) => MnemonicError::InvalidWordCount(n),
                other => MnemonicError::Bip39Error(other.to_string()),
            })
        })?;

        Ok(Self {
            phrase: normalized_phrase,
            word_count: count,
        })
    }

    // =========================================================================
    // GETTERS
    // =========================================================================

    /// Lấy mnemonic phrase (đã normalize)
    ///
    /// # Warning
    /// Cẩn thận khi hiển thị hoặc log giá trị này!
    #[inline]
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    // =========================================================================
    // SEED DERIVATION
    // =========================================================================

    /// Tạo seed từ mnemonic (PBKDF2-HMAC-SHA512)
    ///
    /// # Arguments
    /// * `passphrase` - Optional BIP-39 passphrase. `None` and `Some("")` give the same seed.
    ///
    /// # Returns
    /// 64-byte seed wrapped trong `Zeroizing` để tự động xóa khi drop
    pub fn to_seed_bytes(&self, passphrase: Option<&str>) -> WalletResult<Zeroizing<[u8; 64]>> {
        let password = passphrase.unwrap_or("");
        let mnemonic = Mnemonic::parse(self.phrase.as_str())
            .map_err(|e| WalletError::Mnemonic(MnemonicError::Bip39Error(e.to_string())))?;
        Ok(Zeroizing::new(mnemonic.to_seed(password)))
    }

    // =========================================================================
    // VALIDATION
    // =========================================================================

    /// Kiểm tra xem phrase có hợp lệ không
    ///
    /// Thực hiện đầy đủ validation: word count, wordlist, checksum.
    /// Surrounding and repeated whitespace is tolerated.
    #[inline]
    pub fn validate(phrase: &str) -> bool {
        Self::from_phrase(phrase).is_ok()
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================
