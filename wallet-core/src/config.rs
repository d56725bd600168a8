// wallet-core/src/config.rs
//
// Import configuration. Mọi field đều có default, nên một JSON rỗng `{}`
// cũng là config hợp lệ.

use crate::chains::BitcoinChainConfig;
use crate::error::{WalletError, WalletResult};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TOTAL_STEPS: u32 = 10;
pub const DEFAULT_ACCOUNT_ITERATIONS: u32 = 5;
pub const DEFAULT_ADDRESS_SCAN_WIDTH: u32 = 10;
pub const DEFAULT_ENCRYPTED_KEY_PREFIX: &str = "6P";
pub const DEFAULT_CUSTODIAN_SCHEMES: [&str; 2] = ["blitzhub://", "lndhub://"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImportConfig {
    pub chain: BitcoinChainConfig,
    /// Progress total, cố định cho mỗi run
    pub total_steps: u32,
    /// Số accounts cho plan entries có `iterate_accounts`
    pub account_iterations: u32,
    /// Số địa chỉ mỗi chain (receive / change) mà HD probe kiểm tra
    pub address_scan_width: u32,
    /// Prefix của BIP-38 encrypted key
    pub encrypted_key_prefix: String,
    /// URI schemes của Lightning custodian
    pub custodian_schemes: Vec<String>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self::with_chain(BitcoinChainConfig::default())
    }
}

impl ImportConfig {
    pub fn with_chain(chain: BitcoinChainConfig) -> Self {
        Self {
            chain,
            total_steps: DEFAULT_TOTAL_STEPS,
            account_iterations: DEFAULT_ACCOUNT_ITERATIONS,
            address_scan_width: DEFAULT_ADDRESS_SCAN_WIDTH,
            encrypted_key_prefix: DEFAULT_ENCRYPTED_KEY_PREFIX.to_string(),
            custodian_schemes: DEFAULT_CUSTODIAN_SCHEMES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    pub fn mainnet() -> Self {
        Self::with_chain(BitcoinChainConfig::mainnet())
    }

    pub fn testnet() -> Self {
        Self::with_chain(BitcoinChainConfig::testnet())
    }

    pub fn signet() -> Self {
        Self::with_chain(BitcoinChainConfig::signet())
    }

    /// Parse config từ JSON, rồi validate
    pub fn from_json(json: &str) -> WalletResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| WalletError::Validation(format!("Invalid import config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> WalletResult<()> {
        if self.total_steps == 0 {
            return Err(WalletError::Validation(
                "totalSteps must be greater than zero".to_string(),
            ));
        }
        if self.encrypted_key_prefix.is_empty() {
            return Err(WalletError::Validation(
                "encryptedKeyPrefix must not be empty".to_string(),
            ));
        }
        if self.custodian_schemes.iter().any(|s| !s.ends_with("://")) {
            return Err(WalletError::Validation(
                "custodianSchemes entries must end with \"://\"".to_string(),
            ));
        }
        Ok(())
    }
}
