// wallet-core/src/crypto/paths.rs
//
// Derivation Paths Module - Bitcoin HD Wallet Path Generator
// BIP-44 (Legacy), BIP-49 (Nested SegWit), BIP-84 (Native SegWit)

use crate::error::{CryptoError, WalletError, WalletResult};
use bip32::DerivationPath;
use bitcoin::Network;
use std::str::FromStr;

// =============================================================================
// PURPOSE / COIN TYPES
// =============================================================================
/// BIP-43 purpose numbers dùng cho Bitcoin single-sig
pub mod purpose {
    pub const LEGACY: u32 = 44;
    pub const NESTED_SEGWIT: u32 = 49;
    pub const NATIVE_SEGWIT: u32 = 84;
}

/// SLIP-44 Registered Coin Types
/// Ref: https://github.com/satoshilabs/slips/blob/master/slip-0044.md
pub mod coin_type {
    use bitcoin::Network;

    pub const BITCOIN: u32 = 0;
    pub const TESTNET: u32 = 1;

    /// Mainnet dùng coin 0, mọi test network (testnet, signet, regtest) dùng coin 1
    #[inline]
    pub fn for_network(network: Network) -> u32 {
        match network {
            Network::Bitcoin => BITCOIN,
            _ => TESTNET,
        }
    }
}

// =============================================================================
// DERIVATION PATHS
// =============================================================================
/// Pre-built Derivation Paths cho Bitcoin HD wallets
///
/// # Conventions
/// - Account path: `m/purpose'/coin'/account'`
/// - Address path: `m/purpose'/coin'/account'/change/index`
/// - `change` = 0 (external, nhận tiền), 1 (internal, thối tiền)
pub struct DerivationPaths;

impl DerivationPaths {
    /// Account-level path `m/purpose'/coin'/account'`
    #[inline]
    pub fn account_path(purpose: u32, coin_type: u32, account: u32) -> String {
        format!("m/{}'/{}'/{}'", purpose, coin_type, account)
    }

    /// Append only the `change` level (base path cho batch derivation)
    #[inline]
    pub fn chain_base(account_path: &str, change: u32) -> String {
        format!("{}/{}", account_path.trim_end_matches('/'), change)
    }

    // =========================================================================
    // ACCOUNT EXPANSION
    // =========================================================================

    /// Expand một template thành `count` account paths
    ///
    /// Bỏ component cuối của template rồi nối `0'`, `1'`, ... theo thứ tự tăng dần.
    /// Template phải kết thúc bằng một hardened component.
    ///
    /// # Verify
    /// - `expand_accounts("m/84'/0'/0'", 2)` -> `["m/84'/0'/0'", "m/84'/0'/1'"]`
    pub fn expand_accounts(template: &str, count: u32) -> WalletResult<Vec<String>> {
        Self::validate(template)?;

        let (base, last) = template.rsplit_once('/').ok_or_else(|| {
            WalletError::Crypto(CryptoError::DerivationFailed(format!(
                "Path '{}' has no account component",
                template
            )))
        })?;

        if last == "m" || !(last.ends_with('\'') || last.ends_with('h')) {
            return Err(WalletError::Crypto(CryptoError::DerivationFailed(format!(
                "Path '{}' does not end in a hardened account component",
                template
            ))));
        }

        Ok((0..count).map(|j| format!("{}/{}'", base, j)).collect())
    }

    // =========================================================================
    // COIN TYPE
    // =========================================================================

    /// Đổi coin component của một BIP-44/49/84 path sang `coin_type`
    ///
    /// Path không theo layout `m/purpose'/coin'/...` (e.g. Breadwallet `m/0'`)
    /// được giữ nguyên.
    ///
    /// # Verify
    /// - `with_coin_type("m/84'/0'/0'", 1)` -> `"m/84'/1'/0'"`
    pub fn with_coin_type(path: &str, coin_type: u32) -> WalletResult<String> {
        Self::validate(path)?;

        let coin = format!("{}'", coin_type);
        let mut components: Vec<&str> = path.split('/').collect();
        let is_bip44_layout = components.len() >= 3
            && matches!(
                components[1].trim_end_matches(['\'', 'h']).parse::<u32>(),
                Ok(purpose::LEGACY | purpose::NESTED_SEGWIT | purpose::NATIVE_SEGWIT)
            );
        if !is_bip44_layout {
            return Ok(path.to_string());
        }

        components[2] = &coin;
        Ok(components.join("/"))
    }

    /// Như [`Self::with_coin_type`], với coin type của `network`
    #[inline]
    pub fn for_network(path: &str, network: Network) -> WalletResult<String> {
        Self::with_coin_type(path, coin_type::for_network(network))
    }

    /// Validate path bằng bip32 parser
    pub fn validate(path: &str) -> WalletResult<()> {
        DerivationPath::from_str(path).map(|_| ()).map_err(|e| {
            WalletError::Crypto(CryptoError::DerivationFailed(format!(
                "Invalid path '{}': {}",
                path, e
            )))
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
