// wallet-core/src/recognizer/hd.rs
//
// HD BIP-39 Recognizer - BIP-44 / BIP-49 / BIP-84 single-sig HD wallets
//
// Flow:  Mnemonic → Seed (PBKDF2) → Account xprv (BIP-32) → change/index keys → Addresses

use crate::chains::bitcoin::{BitcoinAddress, ScriptType};
use crate::config::ImportConfig;
use crate::crypto::{DerivationPaths, Secp256k1Deriver, WalletMnemonic};
use crate::error::{WalletError, WalletResult};
use crate::network::models::Balance;
use crate::network::traits::LedgerClient;
use crate::recognizer::{FormatRecognizer, MatchOutcome, WalletCandidate, WalletKind, WorkingSecret};
use async_trait::async_trait;
use bitcoin::Network;
use std::sync::Arc;
use tracing::debug;

const RECEIVE: u32 = 0;
const CHANGE: u32 = 1;
const HISTORY_PAGE_SIZE: u32 = 50;

/// Recognizer cho HD wallets dựng từ BIP-39 mnemonic
pub struct HdMnemonicRecognizer {
    kind: WalletKind,
    script: ScriptType,
    default_account_path: String,
    network: Network,
    scan_width: u32,
    ledger: Arc<dyn LedgerClient>,
}

impl HdMnemonicRecognizer {
    pub fn new(script: ScriptType, config: &ImportConfig, ledger: Arc<dyn LedgerClient>) -> Self {
        let purpose = match script {
            ScriptType::P2pkh => crate::crypto::paths::purpose::LEGACY,
            ScriptType::P2wpkhP2sh => crate::crypto::paths::purpose::NESTED_SEGWIT,
            ScriptType::P2wpkh => crate::crypto::paths::purpose::NATIVE_SEGWIT,
        };
        let coin = crate::crypto::paths::coin_type::for_network(config.chain.network);

        Self {
            kind: WalletKind::hd_for_script(script),
            script,
            default_account_path: DerivationPaths::account_path(purpose, coin, 0),
            network: config.chain.network,
            scan_width: config.address_scan_width,
            ledger,
        }
    }

    /// Derive `count` addresses của một chain (receive / change) cho candidate
    fn chain_addresses(
        &self,
        candidate: &WalletCandidate,
        change: u32,
        count: u32,
    ) -> WalletResult<Vec<String>> {
        let mnemonic = WalletMnemonic::from_phrase(candidate.secret())?;
        let seed = mnemonic.to_seed_bytes(candidate.passphrase())?;
        let account = candidate
            .derivation_path()
            .unwrap_or(self.default_account_path.as_str());

        let keys = Secp256k1Deriver::derive_batch(
            &*seed,
            &DerivationPaths::chain_base(account, change),
            0..count,
        )?;

        keys.iter()
            .map(|key| BitcoinAddress::derive_from_slice(&**key, self.script, self.network))
            .collect()
    }
}

#[async_trait]
impl FormatRecognizer for HdMnemonicRecognizer {
    fn kind(&self) -> WalletKind {
        self.kind
    }

    fn matches(&self, text: &str) -> bool {
        WalletMnemonic::validate(text)
    }

    async fn verify(
        &self,
        secret: &WorkingSecret,
        derivation_path: Option<&str>,
    ) -> WalletResult<MatchOutcome> {
        if !self.matches(secret.text()) {
            return Ok(MatchOutcome::NoMatch);
        }

        let path = derivation_path.unwrap_or(self.default_account_path.as_str());
        DerivationPaths::validate(path)?;

        let candidate = WalletCandidate::new(self.kind, secret.text())
            .with_passphrase(secret.passphrase())
            .with_derivation_path(path);

        // Địa chỉ đầu tiên của receive chain làm địa chỉ hiển thị
        let first = self
            .chain_addresses(&candidate, RECEIVE, 1)?
            .into_iter()
            .next();

        Ok(MatchOutcome::Match(match first {
            Some(address) => candidate.with_address(address),
            None => candidate,
        }))
    }

    async fn ever_used(&self, candidate: &WalletCandidate) -> WalletResult<bool> {
        let mut addresses = self.chain_addresses(candidate, RECEIVE, self.scan_width)?;
        addresses.extend(self.chain_addresses(candidate, CHANGE, self.scan_width)?);

        let used = self.ledger.was_ever_used(&addresses).await?;
        debug!(
            kind = %self.kind,
            path = candidate.derivation_path().unwrap_or_default(),
            used,
            "HD ever-used probe"
        );
        Ok(used)
    }

    async fn fetch_balance(&self, candidate: &mut WalletCandidate) -> WalletResult<()> {
        let mut total = Balance::from_sats(0);
        for address in self.chain_addresses(candidate, RECEIVE, self.scan_width)? {
            let balance = self.ledger.get_balance(&address).await?;
            total = total.checked_add(&balance).ok_or_else(|| {
                WalletError::Ledger(format!(
                    "Cannot add balance {} {} of {} to the wallet total",
                    balance.raw, balance.symbol, address
                ))
            })?;
        }
        candidate.set_balance(total);
        Ok(())
    }

    async fn fetch_history(&self, candidate: &mut WalletCandidate) -> WalletResult<()> {
        let mut transactions = Vec::new();
        for address in self.chain_addresses(candidate, RECEIVE, self.scan_width)? {
            transactions.extend(
                self.ledger
                    .get_transaction_history(&address, 0, HISTORY_PAGE_SIZE)
                    .await?,
            );
        }
        candidate.set_transactions(transactions);
        Ok(())
    }
}
