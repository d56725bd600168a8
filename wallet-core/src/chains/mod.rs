// src/chains/mod.rs
pub mod bitcoin;

use ::bitcoin::Network;
use serde::{Deserialize, Serialize};

// Cấu hình chung cho Bitcoin network mà pipeline import làm việc trên đó
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BitcoinChainConfig {
    pub network: Network,
    pub name: String,
}

// Helper để tạo nhanh config cho các mạng phổ biến
impl BitcoinChainConfig {
    pub fn mainnet() -> Self {
        Self {
            network: Network::Bitcoin,
            name: "Bitcoin Mainnet".to_string(),
        }
    }

    pub fn testnet() -> Self {
        Self {
            network: Network::Testnet,
            name: "Bitcoin Testnet".to_string(),
        }
    }

    pub fn signet() -> Self {
        Self {
            network: Network::Signet,
            name: "Bitcoin Signet".to_string(),
        }
    }
}

impl Default for BitcoinChainConfig {
    fn default() -> Self {
        Self::mainnet()
    }
}
