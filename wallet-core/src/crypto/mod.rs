// wallet-core/src/crypto/mod.rs

//! Core Cryptography Module
//!
//! - **Mnemonic Validation**: BIP-39 phrase validation and seed derivation via [`WalletMnemonic`].
//! - **Key Derivation**: BIP-32 secp256k1 derivation via [`Secp256k1Deriver`].
//! - **Derivation Paths**: Bitcoin BIP-44/49/84 path builders and account expansion via [`DerivationPaths`].

pub mod key_deriver;
pub mod mnemonic;
pub mod paths;

// Re-exports for cleaner API access
pub use key_deriver::Secp256k1Deriver;
pub use mnemonic::WalletMnemonic;
pub use paths::DerivationPaths;
