// wallet-core/src/lib.rs

//! Wallet Import
//!
//! Nhận một secret dạng text do user dán vào và tìm ra những wallet formats
//! mà nó có thể là: BIP-39 HD, WIF, BIP-38, địa chỉ watch-only, Lightning
//! custodian, SLIP-39, Electrum seed, AEZEED, multisig.
//!
//! ```ignore
//! let importer = create_importer(ImportConfig::mainnet(), ImportServices::new(ledger))?;
//! let outcome = importer.run(text, &mut callbacks).await;
//! ```

#![allow(clippy::module_inception)]

pub mod api;
pub mod chains;
pub mod config;
pub mod crypto;
pub mod error;
pub mod import;
pub mod network;
pub mod recognizer;

pub use api::{create_importer, init_core, ImportServices};
pub use config::ImportConfig;
pub use error::{ImportError, ImportResult, WalletError, WalletResult};
pub use import::{
    ImportCallbacks, ImportOutcome, Importer, PasswordPrompt, PasswordResponse, Progress,
    RecognitionPlan,
};
pub use recognizer::{FormatCatalog, FormatRecognizer, WalletCandidate, WalletKind};
