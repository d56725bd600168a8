// wallet-core/src/recognizer/single_key.rs
//
// Single-key Recognizer - WIF private key → một địa chỉ duy nhất

use crate::chains::bitcoin::{decode_wif, BitcoinAddress, ScriptType};
use crate::config::ImportConfig;
use crate::error::WalletResult;
use crate::network::traits::LedgerClient;
use crate::recognizer::{FormatRecognizer, MatchOutcome, WalletCandidate, WalletKind, WorkingSecret};
use async_trait::async_trait;
use bitcoin::Network;
use std::sync::Arc;
use tracing::debug;

const HISTORY_PAGE_SIZE: u32 = 50;

pub struct SingleKeyRecognizer {
    kind: WalletKind,
    script: ScriptType,
    network: Network,
    ledger: Arc<dyn LedgerClient>,
}

impl SingleKeyRecognizer {
    pub fn new(script: ScriptType, config: &ImportConfig, ledger: Arc<dyn LedgerClient>) -> Self {
        let kind = match script {
            ScriptType::P2pkh => WalletKind::Legacy,
            ScriptType::P2wpkhP2sh => WalletKind::SegwitP2sh,
            ScriptType::P2wpkh => WalletKind::SegwitBech32,
        };
        Self {
            kind,
            script,
            network: config.chain.network,
            ledger,
        }
    }

    /// Địa chỉ của key trong `text`. `None` nếu không phải WIF, hoặc
    /// script SegWit gặp uncompressed key.
    pub fn address_for(&self, text: &str) -> Option<String> {
        let key = decode_wif(text)?;
        BitcoinAddress::derive(&key, self.script, self.network).ok()
    }
}

#[async_trait]
impl FormatRecognizer for SingleKeyRecognizer {
    fn kind(&self) -> WalletKind {
        self.kind
    }

    fn matches(&self, text: &str) -> bool {
        decode_wif(text).is_some()
    }

    async fn verify(
        &self,
        secret: &WorkingSecret,
        _derivation_path: Option<&str>,
    ) -> WalletResult<MatchOutcome> {
        Ok(match self.address_for(secret.text()) {
            Some(address) => MatchOutcome::Match(
                WalletCandidate::new(self.kind, secret.text()).with_address(address),
            ),
            None => MatchOutcome::NoMatch,
        })
    }

    async fn ever_used(&self, candidate: &WalletCandidate) -> WalletResult<bool> {
        let Some(address) = candidate.address() else {
            return Ok(false);
        };
        let used = self.ledger.was_ever_used(&[address.to_string()]).await?;
        debug!(kind = %self.kind, used, "single-key ever-used probe");
        Ok(used)
    }

    async fn fetch_balance(&self, candidate: &mut WalletCandidate) -> WalletResult<()> {
        if let Some(address) = candidate.address().map(str::to_string) {
            let balance = self.ledger.get_balance(&address).await?;
            candidate.set_balance(balance);
        }
        Ok(())
    }

    async fn fetch_history(&self, candidate: &mut WalletCandidate) -> WalletResult<()> {
        if let Some(address) = candidate.address().map(str::to_string) {
            let transactions = self
                .ledger
                .get_transaction_history(&address, 0, HISTORY_PAGE_SIZE)
                .await?;
            candidate.set_transactions(transactions);
        }
        Ok(())
    }
}
