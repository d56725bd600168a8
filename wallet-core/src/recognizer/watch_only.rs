// wallet-core/src/recognizer/watch_only.rs
//
// Watch-only Recognizer - địa chỉ trần, không có private key

use crate::chains::bitcoin::BitcoinAddress;
use crate::config::ImportConfig;
use crate::error::WalletResult;
use crate::network::traits::LedgerClient;
use crate::recognizer::{FormatRecognizer, MatchOutcome, WalletCandidate, WalletKind, WorkingSecret};
use async_trait::async_trait;
use bitcoin::Network;
use std::sync::Arc;

const HISTORY_PAGE_SIZE: u32 = 50;

pub struct WatchOnlyRecognizer {
    network: Network,
    ledger: Arc<dyn LedgerClient>,
}

impl WatchOnlyRecognizer {
    pub fn new(config: &ImportConfig, ledger: Arc<dyn LedgerClient>) -> Self {
        Self {
            network: config.chain.network,
            ledger,
        }
    }
}

#[async_trait]
impl FormatRecognizer for WatchOnlyRecognizer {
    fn kind(&self) -> WalletKind {
        WalletKind::WatchOnly
    }

    fn matches(&self, text: &str) -> bool {
        BitcoinAddress::is_valid(text, self.network)
    }

    async fn verify(
        &self,
        secret: &WorkingSecret,
        _derivation_path: Option<&str>,
    ) -> WalletResult<MatchOutcome> {
        if !self.matches(secret.text()) {
            return Ok(MatchOutcome::NoMatch);
        }
        Ok(MatchOutcome::Match(
            WalletCandidate::new(WalletKind::WatchOnly, secret.text()).with_address(secret.text()),
        ))
    }

    async fn ever_used(&self, candidate: &WalletCandidate) -> WalletResult<bool> {
        self.ledger
            .was_ever_used(&[candidate.secret().to_string()])
            .await
    }

    async fn fetch_balance(&self, candidate: &mut WalletCandidate) -> WalletResult<()> {
        let balance = self.ledger.get_balance(candidate.secret()).await?;
        candidate.set_balance(balance);
        Ok(())
    }

    async fn fetch_history(&self, candidate: &mut WalletCandidate) -> WalletResult<()> {
        let transactions = self
            .ledger
            .get_transaction_history(candidate.secret(), 0, HISTORY_PAGE_SIZE)
            .await?;
        candidate.set_transactions(transactions);
        Ok(())
    }
}
