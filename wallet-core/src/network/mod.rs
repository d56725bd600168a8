// wallet-core/src/network/mod.rs
//
// Network Module - Remote collaborators của pipeline import
//
// Cung cấp:
// - Traits cho ledger và custodian clients
// - Models cho dữ liệu các clients trả về

pub mod models;
pub mod traits;

// Re-export cho convenience
pub use models::*;
pub use traits::*;
