// wallet-core/src/import/plan.rs
//
// Recognition Plan - bảng HD formats cần quét, data-driven (JSON)

use crate::chains::bitcoin::ScriptType;
use crate::crypto::DerivationPaths;
use crate::error::{WalletError, WalletResult};
use crate::recognizer::WalletKind;
use bitcoin::Network;
use serde::{Deserialize, Serialize};

const STANDARD_PLAN: &str = include_str!("wallet_formats.json");

/// Một dòng của plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    pub description: String,
    /// Account-level path template (e.g. "m/84'/0'/0'")
    pub derivation_path: String,
    pub script_type: ScriptType,
    /// Quét nhiều accounts thay vì chỉ path trong template
    #[serde(default)]
    pub iterate_accounts: bool,
}

impl PlanEntry {
    #[inline]
    pub fn wallet_kind(&self) -> WalletKind {
        WalletKind::hd_for_script(self.script_type)
    }

    /// Các path cụ thể của entry, theo thứ tự account tăng dần
    pub fn paths(&self, accounts: u32) -> WalletResult<Vec<String>> {
        if self.iterate_accounts {
            DerivationPaths::expand_accounts(&self.derivation_path, accounts)
        } else {
            Ok(vec![self.derivation_path.clone()])
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionPlan {
    entries: Vec<PlanEntry>,
}

impl RecognitionPlan {
    /// Plan mặc định nhúng trong crate
    pub fn standard() -> WalletResult<Self> {
        Self::from_json(STANDARD_PLAN)
    }

    pub fn from_json(json: &str) -> WalletResult<Self> {
        let entries: Vec<PlanEntry> = serde_json::from_str(json)
            .map_err(|e| WalletError::Validation(format!("Invalid recognition plan: {}", e)))?;
        Self::from_entries(entries)
    }

    /// Validate từng path; `iterate_accounts` cần template kết thúc bằng hardened account
    pub fn from_entries(entries: Vec<PlanEntry>) -> WalletResult<Self> {
        for entry in &entries {
            DerivationPaths::validate(&entry.derivation_path)?;
            if entry.iterate_accounts {
                DerivationPaths::expand_accounts(&entry.derivation_path, 1)?;
            }
        }
        Ok(Self { entries })
    }

    /// Đổi coin component của mọi BIP-44/49/84 entry sang coin type của `network`
    pub fn for_network(self, network: Network) -> WalletResult<Self> {
        let entries = self
            .entries
            .into_iter()
            .map(|entry| {
                Ok(PlanEntry {
                    derivation_path: DerivationPaths::for_network(&entry.derivation_path, network)?,
                    ..entry
                })
            })
            .collect::<WalletResult<Vec<_>>>()?;
        Ok(Self { entries })
    }

    #[inline]
    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    /// Tổng số path sẽ được quét
    pub fn path_count(&self, accounts: u32) -> usize {
        self.entries
            .iter()
            .map(|e| if e.iterate_accounts { accounts as usize } else { 1 })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_plan() {
        let plan = RecognitionPlan::standard().unwrap();
        let first = &plan.entries()[0];
        assert_eq!(first.derivation_path, "m/84'/0'/0'");
        assert_eq!(first.wallet_kind(), WalletKind::HdSegwitBech32);
        assert!(first.iterate_accounts);

        let bread = plan
            .entries()
            .iter()
            .find(|e| e.derivation_path == "m/0'")
            .unwrap();
        assert_eq!(bread.wallet_kind(), WalletKind::HdLegacyP2pkh);
        assert!(!bread.iterate_accounts);

        assert_eq!(plan.path_count(5), 3 * 5 + 7);
    }

    #[test]
    fn test_standard_plan_for_testnet() {
        let plan = RecognitionPlan::standard()
            .unwrap()
            .for_network(Network::Testnet)
            .unwrap();
        let paths: Vec<&str> = plan
            .entries()
            .iter()
            .map(|e| e.derivation_path.as_str())
            .collect();

        assert_eq!(paths[0], "m/84'/1'/0'");
        assert!(paths.contains(&"m/49'/1'/0'"));
        assert!(paths.contains(&"m/44'/1'/0'"));
        assert!(paths.contains(&"m/84'/1'/2147483644'"));
        assert!(paths.contains(&"m/0'"));
        assert!(paths.iter().all(|p| !p.starts_with("m/84'/0'")));
        assert_eq!(plan.path_count(5), 3 * 5 + 7);

        let mainnet = RecognitionPlan::standard().unwrap();
        assert_eq!(
            mainnet.clone().for_network(Network::Bitcoin).unwrap(),
            mainnet
        );
    }

    #[test]
    fn test_entry_paths() {
        let entry = PlanEntry {
            description: "Nested".to_string(),
            derivation_path: "m/49'/0'/0'".to_string(),
            script_type: ScriptType::P2wpkhP2sh,
            iterate_accounts: true,
        };
        assert_eq!(
            entry.paths(3).unwrap(),
            vec!["m/49'/0'/0'", "m/49'/0'/1'", "m/49'/0'/2'"]
        );

        let single = PlanEntry {
            iterate_accounts: false,
            ..entry
        };
        assert_eq!(single.paths(3).unwrap(), vec!["m/49'/0'/0'"]);
    }

    #[test]
    fn test_from_json_rejects_bad_entries() {
        assert!(RecognitionPlan::from_json("{}").is_err());
        assert!(RecognitionPlan::from_json(
            r#"[{"description":"x","derivation_path":"bogus","script_type":"p2pkh"}]"#
        )
        .is_err());
        assert!(RecognitionPlan::from_json(
            r#"[{"description":"x","derivation_path":"m/84'/0'/0","script_type":"p2wpkh","iterate_accounts":true}]"#
        )
        .is_err());
        assert!(RecognitionPlan::from_json(
            r#"[{"description":"x","derivation_path":"m/84'/0'/0'","script_type":"p2tr"}]"#
        )
        .is_err());
    }
}
