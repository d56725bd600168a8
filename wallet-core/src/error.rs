// wallet-core/src/error.rs
//
// Error taxonomy cho toàn bộ crate.
// - WalletError: lỗi của các format / ledger / custodian collaborators
// - ImportError: lỗi của pipeline (Cancelled là tín hiệu, không phải lỗi thật)

use thiserror::Error;

pub type WalletResult<T> = std::result::Result<T, WalletError>;

pub type ImportResult<T> = std::result::Result<T, ImportError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WalletError {
    #[error("Mnemonic Error: {0}")]
    Mnemonic(#[from] MnemonicError),

    #[error("Cryptography Error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Validation Error: {0}")]
    Validation(String),

    #[error("Ledger Error: {0}")]
    Ledger(String),

    #[error("Custodian Error: {0}")]
    Custodian(String),

    #[error("Unknown Error: {0}")]
    Unknown(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MnemonicError {
    #[error("Invalid word count: {0}. Expected 12, 15, 18, 21 or 24 words.")]
    InvalidWordCount(usize),

    #[error("Word at position {0} not found in the BIP39 wordlist.")]
    UnknownWord(usize),

    #[error("Checksum validation failed.")]
    ChecksumFailed,

    #[error("BIP39 internal error: {0}")]
    Bip39Error(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("Key derivation failed: {0}")]
    DerivationFailed(String),

    #[error("Invalid key format: {0}")]
    InvalidKeyFormat(String),

    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),
}

/// Failure modes of one import run.
///
/// `Cancelled` is raised when the user aborts a password prompt (or the
/// run's cancellation token fires). It terminates the run but is reported
/// through the outcome flag, never as an error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImportError {
    #[error("Import cancelled")]
    Cancelled,

    #[error(transparent)]
    Wallet(#[from] WalletError),
}

impl ImportError {
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ImportError::Cancelled)
    }
}
