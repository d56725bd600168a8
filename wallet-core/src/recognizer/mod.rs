// wallet-core/src/recognizer/mod.rs

//! Format Recognizers
//!
//! Mỗi wallet format được bọc trong một [`FormatRecognizer`]. Pipeline chỉ
//! biết tới contract này, không biết chi tiết derivation của từng format.
//!
//! - **Kinds**: tập đóng các wallet formats, [`WalletKind`].
//! - **Working secret**: text + passphrase đang được xử lý, [`WorkingSecret`].
//! - **Catalog**: registry kind → recognizer, [`FormatCatalog`].
//! - **Built-in recognizers**: HD BIP-39, single key (WIF), watch-only, Lightning custodian.

pub mod candidate;
pub mod catalog;
pub mod custodian;
pub mod encrypted;
pub mod hd;
pub mod single_key;
pub mod watch_only;

pub use candidate::WalletCandidate;
pub use catalog::FormatCatalog;
pub use custodian::{CustodianLogin, CustodianRecognizer, CustodianUri};
pub use encrypted::{DecryptedKey, KeyDecryptor};
pub use hd::HdMnemonicRecognizer;
pub use single_key::SingleKeyRecognizer;
pub use watch_only::WatchOnlyRecognizer;

use crate::chains::bitcoin::ScriptType;
use crate::error::WalletResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::Zeroizing;

// =============================================================================
// WALLET KINDS
// =============================================================================

/// Closed set of wallet formats the import pipeline can surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WalletKind {
    /// Single key, P2PKH (1...)
    Legacy,
    /// Single key, P2SH-P2WPKH (3...)
    SegwitP2sh,
    /// Single key, P2WPKH (bc1q...)
    SegwitBech32,
    HdLegacyP2pkh,
    HdSegwitP2sh,
    HdSegwitBech32,
    Multisig,
    LightningCustodian,
    WatchOnly,
    Slip39LegacyP2pkh,
    Slip39SegwitP2sh,
    Slip39SegwitBech32,
    ElectrumSeedP2pkh,
    ElectrumSeedP2wpkh,
    Aezeed,
}

impl WalletKind {
    pub const ALL: [WalletKind; 15] = [
        WalletKind::Legacy,
        WalletKind::SegwitP2sh,
        WalletKind::SegwitBech32,
        WalletKind::HdLegacyP2pkh,
        WalletKind::HdSegwitP2sh,
        WalletKind::HdSegwitBech32,
        WalletKind::Multisig,
        WalletKind::LightningCustodian,
        WalletKind::WatchOnly,
        WalletKind::Slip39LegacyP2pkh,
        WalletKind::Slip39SegwitP2sh,
        WalletKind::Slip39SegwitBech32,
        WalletKind::ElectrumSeedP2pkh,
        WalletKind::ElectrumSeedP2wpkh,
        WalletKind::Aezeed,
    ];

    /// HD kind cho một script type trong recognition plan
    pub const fn hd_for_script(script: ScriptType) -> WalletKind {
        match script {
            ScriptType::P2pkh => WalletKind::HdLegacyP2pkh,
            ScriptType::P2wpkhP2sh => WalletKind::HdSegwitP2sh,
            ScriptType::P2wpkh => WalletKind::HdSegwitBech32,
        }
    }

    /// Script type của kind, nếu kind là single-sig
    pub const fn script_type(self) -> Option<ScriptType> {
        match self {
            WalletKind::Legacy
            | WalletKind::HdLegacyP2pkh
            | WalletKind::Slip39LegacyP2pkh
            | WalletKind::ElectrumSeedP2pkh => Some(ScriptType::P2pkh),
            WalletKind::SegwitP2sh | WalletKind::HdSegwitP2sh | WalletKind::Slip39SegwitP2sh => {
                Some(ScriptType::P2wpkhP2sh)
            }
            WalletKind::SegwitBech32
            | WalletKind::HdSegwitBech32
            | WalletKind::Slip39SegwitBech32
            | WalletKind::ElectrumSeedP2wpkh
            | WalletKind::Aezeed => Some(ScriptType::P2wpkh),
            WalletKind::Multisig | WalletKind::LightningCustodian | WalletKind::WatchOnly => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            WalletKind::Legacy => "Legacy (P2PKH)",
            WalletKind::SegwitP2sh => "SegWit (P2SH)",
            WalletKind::SegwitBech32 => "SegWit (bech32)",
            WalletKind::HdLegacyP2pkh => "HD Legacy (BIP44 P2PKH)",
            WalletKind::HdSegwitP2sh => "HD SegWit (BIP49 P2SH)",
            WalletKind::HdSegwitBech32 => "HD SegWit (BIP84 bech32)",
            WalletKind::Multisig => "Multisig Vault",
            WalletKind::LightningCustodian => "Lightning Custodian",
            WalletKind::WatchOnly => "Watch-only",
            WalletKind::Slip39LegacyP2pkh => "SLIP39 Legacy (P2PKH)",
            WalletKind::Slip39SegwitP2sh => "SLIP39 SegWit (P2SH)",
            WalletKind::Slip39SegwitBech32 => "SLIP39 SegWit (bech32)",
            WalletKind::ElectrumSeedP2pkh => "HD Electrum (BIP32 P2PKH)",
            WalletKind::ElectrumSeedP2wpkh => "HD Electrum (BIP32 P2WPKH)",
            WalletKind::Aezeed => "HD AEZEED",
        }
    }
}

impl fmt::Display for WalletKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// WORKING SECRET
// =============================================================================

/// Secret material đang chạy qua pipeline
///
/// Immutable theo từng stage: stage biến đổi secret (decrypt, bind passphrase)
/// tạo ra một `WorkingSecret` mới thay vì sửa tại chỗ.
#[derive(Clone)]
pub struct WorkingSecret {
    text: Zeroizing<String>,
    passphrase: Option<Zeroizing<String>>,
}

// Custom Debug - không hiển thị secret
impl fmt::Debug for WorkingSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkingSecret")
            .field("text", &"[REDACTED]")
            .field("has_passphrase", &self.passphrase.is_some())
            .finish()
    }
}

impl WorkingSecret {
    /// Secret mới từ user input (đã trim)
    pub fn new(text: &str) -> Self {
        Self {
            text: Zeroizing::new(text.trim().to_string()),
            passphrase: None,
        }
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn passphrase(&self) -> Option<&str> {
        self.passphrase.as_deref().map(String::as_str)
    }

    /// Thay text, giữ passphrase
    pub fn with_text(&self, text: Zeroizing<String>) -> Self {
        Self {
            text,
            passphrase: self.passphrase.clone(),
        }
    }

    /// Thay passphrase, giữ text. Passphrase rỗng được coi như không có.
    pub fn with_passphrase(&self, passphrase: Option<Zeroizing<String>>) -> Self {
        Self {
            text: self.text.clone(),
            passphrase: passphrase.filter(|p| !p.is_empty()),
        }
    }

    /// Nhiều dòng = có thể là SLIP-39 shares
    #[inline]
    pub fn is_multiline(&self) -> bool {
        self.text.contains('\n')
    }

    #[inline]
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.text.starts_with(prefix)
    }
}

// =============================================================================
// RECOGNIZER CONTRACT
// =============================================================================

/// Kết quả của [`FormatRecognizer::verify`]
#[derive(Debug)]
pub enum MatchOutcome {
    /// Format khớp nhưng passphrase sai
    InvalidPassphrase,
    NoMatch,
    Match(WalletCandidate),
}

impl MatchOutcome {
    /// `InvalidPassphrase` ngoài validate-loop được xử lý như `NoMatch`
    #[inline]
    pub fn into_candidate(self) -> Option<WalletCandidate> {
        match self {
            MatchOutcome::Match(candidate) => Some(candidate),
            MatchOutcome::InvalidPassphrase | MatchOutcome::NoMatch => None,
        }
    }
}

/// Capability set của một wallet format
///
/// Default implementations mô tả format không có remote verification:
/// không cần passphrase, chưa từng được dùng, không có balance/history.
#[async_trait]
pub trait FormatRecognizer: Send + Sync {
    fn kind(&self) -> WalletKind;

    /// Structural check (wordlist, checksum, prefix, ...)
    fn matches(&self, text: &str) -> bool;

    /// Passphrase đang bind trong `secret` chưa mở được format này
    async fn needs_passphrase(&self, _secret: &WorkingSecret) -> WalletResult<bool> {
        Ok(false)
    }

    /// Bind secret (và derivation path, nếu có) thành một candidate
    async fn verify(
        &self,
        secret: &WorkingSecret,
        derivation_path: Option<&str>,
    ) -> WalletResult<MatchOutcome>;

    async fn authorize(&self, _candidate: &mut WalletCandidate) -> WalletResult<()> {
        Ok(())
    }

    async fn ever_used(&self, _candidate: &WalletCandidate) -> WalletResult<bool> {
        Ok(false)
    }

    async fn fetch_balance(&self, _candidate: &mut WalletCandidate) -> WalletResult<()> {
        Ok(())
    }

    async fn fetch_history(&self, _candidate: &mut WalletCandidate) -> WalletResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_working_secret_trims_and_redacts() {
        let secret = WorkingSecret::new("  hunter2 words\n");
        assert_eq!(secret.text(), "hunter2 words");
        assert!(!secret.is_multiline());

        let debug = format!("{:?}", secret);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn test_working_secret_is_replaced_not_mutated() {
        let original = WorkingSecret::new("6PYabc");
        let with_pass = original.with_passphrase(Some(Zeroizing::new("pw".to_string())));
        let decrypted = with_pass.with_text(Zeroizing::new("Kx...".to_string()));

        assert_eq!(original.passphrase(), None);
        assert!(original.has_prefix("6P"));
        assert_eq!(with_pass.passphrase(), Some("pw"));
        assert_eq!(decrypted.text(), "Kx...");
        assert_eq!(decrypted.passphrase(), Some("pw"));
    }

    #[test]
    fn test_empty_passphrase_is_absent() {
        let secret = WorkingSecret::new("a b c")
            .with_passphrase(Some(Zeroizing::new(String::new())));
        assert_eq!(secret.passphrase(), None);
    }

    #[test]
    fn test_multiline_inner_newline() {
        assert!(WorkingSecret::new("share one\nshare two").is_multiline());
    }

    #[test]
    fn test_hd_kind_mapping() {
        assert_eq!(WalletKind::hd_for_script(ScriptType::P2pkh), WalletKind::HdLegacyP2pkh);
        assert_eq!(
            WalletKind::hd_for_script(ScriptType::P2wpkhP2sh),
            WalletKind::HdSegwitP2sh
        );
        assert_eq!(WalletKind::hd_for_script(ScriptType::P2wpkh), WalletKind::HdSegwitBech32);
        assert_eq!(WalletKind::WatchOnly.script_type(), None);
        assert_eq!(WalletKind::ALL.len(), 15);
    }

    #[test]
    fn test_match_outcome_into_candidate() {
        assert!(MatchOutcome::InvalidPassphrase.into_candidate().is_none());
        assert!(MatchOutcome::NoMatch.into_candidate().is_none());
        let candidate = WalletCandidate::new(WalletKind::WatchOnly, "bc1q...");
        assert!(MatchOutcome::Match(candidate).into_candidate().is_some());
    }
}
