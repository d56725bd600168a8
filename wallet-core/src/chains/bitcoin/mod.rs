// wallet-core/src/chains/bitcoin/mod.rs

//! Bitcoin Chain Support
//!
//! - **Address Derivation**: P2PKH, P2SH-P2WPKH and P2WPKH addresses from a secp256k1 key via [`BitcoinAddress`].
//! - **Script Types**: the closed set of single-sig script types the import plan knows about, [`ScriptType`].
//! - **WIF**: Wallet Import Format encode/decode helpers in [`wif`].

pub mod address;
pub mod wif;

// Re-exports for cleaner API access
pub use address::{BitcoinAddress, ScriptType};
pub use wif::{decode_wif, encode_wif};
