// wallet-core/src/import/mod.rs

//! Import Pipeline
//!
//! Nhận một đoạn text bất kỳ (WIF, mnemonic, SLIP-39 shares, URI, địa chỉ...),
//! thử mọi wallet format có thể, hỏi passphrase khi cần, kiểm tra với ledger
//! và report từng [`WalletCandidate`] theo thứ tự phát hiện.
//!
//! ```text
//!  Prompting ──► Verifying ──► Reporting ──► Finished
//!      │             │
//!      └──────┬──────┘
//!             ▼
//!         Cancelled
//! ```
//!
//! Các stages chạy tuần tự, không bao giờ song song: stage sau đọc secret và
//! passphrase mà stage trước đã biến đổi.

pub mod callbacks;
pub mod negotiator;
pub mod plan;
pub mod progress;


pub use callbacks::{ImportCallbacks, ImportOutcome, PasswordPrompt, PasswordResponse};
pub use negotiator::{Passphrase, PassphraseNegotiator, PassphrasePolicy};
pub use plan::{PlanEntry, RecognitionPlan};
pub use progress::{Progress, ProgressTracker};

use crate::chains::bitcoin::encode_wif;
use crate::config::ImportConfig;
use crate::error::{CryptoError, ImportError, ImportResult, WalletError, WalletResult};
use crate::recognizer::{
    FormatCatalog, FormatRecognizer, KeyDecryptor, WalletCandidate, WalletKind, WorkingSecret,
};
use bitcoin::Network;
use zeroize::Zeroizing;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

// =============================================================================
// IMPORTER
// =============================================================================

/// Pipeline Driver
///
/// Một `Importer` có thể chạy nhiều lần; mỗi [`Importer::run`] có state riêng.
#[derive(Debug)]
pub struct Importer {
    config: ImportConfig,
    plan: RecognitionPlan,
    catalog: FormatCatalog,
    cancel: Option<CancellationToken>,
}

impl Importer {
    /// Plan mặc định được đổi sang coin type của network trong `config`
    pub fn new(config: ImportConfig, catalog: FormatCatalog) -> WalletResult<Self> {
        config.validate()?;
        let plan = RecognitionPlan::standard()?.for_network(config.chain.network)?;
        Ok(Self {
            config,
            plan,
            catalog,
            cancel: None,
        })
    }

    /// Plan tùy chỉnh được dùng nguyên văn
    pub fn with_plan(mut self, plan: RecognitionPlan) -> Self {
        self.plan = plan;
        self
    }

    /// Token được kiểm tra ở mọi ranh giới giữa các stages
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    #[inline]
    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    #[inline]
    pub fn plan(&self) -> &RecognitionPlan {
        &self.plan
    }

    #[inline]
    pub fn catalog(&self) -> &FormatCatalog {
        &self.catalog
    }

    /// Chạy pipeline trên `text`. Luôn resolve, đúng một lần.
    #[instrument(skip_all, fields(chain = %self.config.chain.name, total = self.config.total_steps))]
    pub async fn run<C>(&self, text: &str, callbacks: &mut C) -> ImportOutcome
    where
        C: ImportCallbacks + ?Sized,
    {
        let mut run = ImportRun {
            importer: self,
            callbacks,
            progress: ProgressTracker::new(self.config.total_steps),
            phase: Phase::Prompting,
            reported: 0,
        };
        let result = run.execute(WorkingSecret::new(text)).await;
        run.finish(result)
    }

    /// Recognizer của `kind` nếu đã đăng ký và `secret` khớp với nó
    async fn probe(
        &self,
        kind: WalletKind,
        secret: &WorkingSecret,
        derivation_path: Option<&str>,
    ) -> WalletResult<Option<(&dyn FormatRecognizer, WalletCandidate)>> {
        let Some(recognizer) = self.catalog.get(kind) else {
            return Ok(None);
        };
        if !recognizer.matches(secret.text()) {
            return Ok(None);
        }

        let outcome = recognizer.verify(secret, derivation_path).await?;
        Ok(outcome
            .into_candidate()
            .map(|candidate| (recognizer.as_ref(), candidate)))
    }
}

/// Giải mã rồi encode lại thành WIF. `Ok(None)` = password sai.
async fn decrypt_to_wif(
    decryptor: &dyn KeyDecryptor,
    encrypted: &str,
    passphrase: &str,
    network: Network,
) -> WalletResult<Option<Zeroizing<String>>> {
    let Some(key) = decryptor.decrypt(encrypted, passphrase).await? else {
        return Ok(None);
    };
    encode_wif(&key.private_key, key.compressed, network)
        .map(Some)
        .map_err(|e| {
            WalletError::Crypto(CryptoError::DecryptionFailed(format!(
                "decrypted key is unusable: {}",
                e
            )))
        })
}

// =============================================================================
// ONE RUN
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Prompting,
    Verifying,
    Reporting,
    Finished,
    Cancelled,
}

struct ImportRun<'a, C: ?Sized> {
    importer: &'a Importer,
    callbacks: &'a mut C,
    progress: ProgressTracker,
    phase: Phase,
    reported: usize,
}

impl<'a, C> ImportRun<'a, C>
where
    C: ImportCallbacks + ?Sized,
{
    async fn execute(&mut self, secret: WorkingSecret) -> ImportResult<()> {
        let secret = self.negotiate(secret).await?;

        // Từ đây trở đi không hỏi user nữa
        self.callbacks.on_no_questions();
        self.enter(Phase::Verifying);

        let secret = self.decrypt(secret).await?;
        self.multisig(&secret).await?;
        self.custodian(&secret).await?;
        self.hd_sweep(&secret).await?;
        self.single_key_sweep(&secret).await?;
        self.uncompressed_legacy(&secret).await?;
        self.watch_only(&secret).await?;
        self.electrum(&secret).await?;
        self.aezeed(&secret).await?;
        self.slip39(&secret).await?;
        Ok(())
    }

    // =========================================================================
    // PROMPTING
    // =========================================================================

    async fn negotiate(&mut self, secret: WorkingSecret) -> ImportResult<WorkingSecret> {
        let importer = self.importer;
        let mut secret = secret;

        // BIP-38: bắt buộc có password
        if secret.has_prefix(&importer.config.encrypted_key_prefix) {
            self.checkpoint()?;
            let passphrase = self
                .ask(PasswordPrompt::ENCRYPTED_KEY, PassphrasePolicy::RequiredNonEmpty)
                .await?;
            secret = secret.with_passphrase(passphrase);
        }

        // BIP-39: passphrase tùy chọn
        if let Some(hd) = importer.catalog.get(WalletKind::HdSegwitBech32) {
            if hd.matches(secret.text()) {
                self.checkpoint()?;
                let passphrase = self
                    .ask(PasswordPrompt::PASSPHRASE, PassphrasePolicy::OptionalOnce)
                    .await?;
                secret = secret.with_passphrase(passphrase);
            }
        }

        // AEZEED: hỏi đến khi đúng
        if let Some(aezeed) = importer.catalog.get(WalletKind::Aezeed) {
            let bare = secret.with_passphrase(None);
            if aezeed.matches(bare.text()) && aezeed.needs_passphrase(&bare).await? {
                self.checkpoint()?;
                let policy = PassphrasePolicy::ValidateLoop {
                    recognizer: aezeed.as_ref(),
                    secret: &bare,
                };
                let passphrase = self.ask(PasswordPrompt::AEZEED, policy).await?;
                secret = secret.with_passphrase(passphrase);
            }
        }

        // SLIP-39: passphrase tùy chọn
        if secret.is_multiline() {
            if let Some(slip39) = importer.catalog.get(WalletKind::Slip39SegwitP2sh) {
                if slip39.matches(secret.text()) {
                    self.checkpoint()?;
                    let passphrase = self
                        .ask(PasswordPrompt::PASSPHRASE, PassphrasePolicy::OptionalOnce)
                        .await?;
                    secret = secret.with_passphrase(passphrase);
                }
            }
        }

        Ok(secret)
    }

    async fn ask(
        &mut self,
        prompt: PasswordPrompt,
        policy: PassphrasePolicy<'_>,
    ) -> ImportResult<Option<Passphrase>> {
        let importer = self.importer;
        let mut negotiator = PassphraseNegotiator::new(&mut *self.callbacks);
        if let Some(token) = importer.cancel.as_ref() {
            negotiator = negotiator.with_cancellation(token);
        }
        negotiator.negotiate(prompt, policy).await
    }

    // =========================================================================
    // VERIFYING
    // =========================================================================

    async fn decrypt(&mut self, secret: WorkingSecret) -> ImportResult<WorkingSecret> {
        let importer = self.importer;
        self.checkpoint()?;

        if !secret.has_prefix(&importer.config.encrypted_key_prefix) {
            return Ok(secret);
        }
        let (Some(decryptor), Some(passphrase)) =
            (importer.catalog.decryptor(), secret.passphrase())
        else {
            warn!("encrypted key left as is: no decryptor or password");
            return Ok(secret);
        };

        let network = importer.config.chain.network;
        match decrypt_to_wif(decryptor.as_ref(), secret.text(), passphrase, network).await {
            Ok(Some(wif)) => {
                debug!("encrypted key decrypted");
                Ok(secret.with_text(wif))
            }
            Ok(None) => {
                warn!("encrypted key could not be decrypted with the given password");
                Ok(secret)
            }
            Err(e) => {
                warn!(error = %e, "encrypted key decryption failed");
                Ok(secret)
            }
        }
    }

    async fn multisig(&mut self, secret: &WorkingSecret) -> ImportResult<()> {
        self.checkpoint()?;
        if let Some((recognizer, mut candidate)) =
            self.importer.probe(WalletKind::Multisig, secret, None).await?
        {
            recognizer.fetch_balance(&mut candidate).await?;
            self.report(candidate);
        }
        self.tick();
        Ok(())
    }

    /// Lỗi authorize / network ở đây không bị nuốt
    async fn custodian(&mut self, secret: &WorkingSecret) -> ImportResult<()> {
        self.checkpoint()?;
        if let Some((recognizer, mut candidate)) = self
            .importer
            .probe(WalletKind::LightningCustodian, secret, None)
            .await?
        {
            recognizer.authorize(&mut candidate).await?;
            recognizer.fetch_history(&mut candidate).await?;
            recognizer.fetch_balance(&mut candidate).await?;
            self.report(candidate);
        }
        self.tick();
        Ok(())
    }

    /// Quét plan: mỗi entry, mỗi account, theo thứ tự
    async fn hd_sweep(&mut self, secret: &WorkingSecret) -> ImportResult<()> {
        let importer = self.importer;
        for entry in importer.plan.entries() {
            let kind = entry.wallet_kind();
            for path in entry.paths(importer.config.account_iterations)? {
                self.checkpoint()?;
                if let Some((recognizer, candidate)) =
                    importer.probe(kind, secret, Some(&path)).await?
                {
                    if recognizer.ever_used(&candidate).await? {
                        self.report(candidate);
                    }
                }
                self.tick();
            }
        }
        Ok(())
    }

    /// Native / wrapped SegWit nếu đã dùng, Legacy luôn được report
    async fn single_key_sweep(&mut self, secret: &WorkingSecret) -> ImportResult<()> {
        let importer = self.importer;
        self.checkpoint()?;

        if let Some((wrapped_recognizer, mut wrapped)) =
            importer.probe(WalletKind::SegwitP2sh, secret, None).await?
        {
            if let Some((native_recognizer, mut native)) =
                importer.probe(WalletKind::SegwitBech32, secret, None).await?
            {
                if native_recognizer.ever_used(&native).await? {
                    native_recognizer.fetch_balance(&mut native).await?;
                    self.report(native);
                }
            }
            self.tick();

            if wrapped_recognizer.ever_used(&wrapped).await? {
                wrapped_recognizer.fetch_balance(&mut wrapped).await?;
                self.report(wrapped);
            }
            self.tick();

            // TODO: gate this on an ever-used check once product confirms the default wallet policy
            if let Some((_, legacy)) = importer.probe(WalletKind::Legacy, secret, None).await? {
                self.report(legacy);
            }
        }
        self.tick();
        Ok(())
    }

    /// WIF hợp lệ nhưng uncompressed pubkey
    async fn uncompressed_legacy(&mut self, secret: &WorkingSecret) -> ImportResult<()> {
        self.checkpoint()?;
        if let Some((recognizer, mut candidate)) =
            self.importer.probe(WalletKind::Legacy, secret, None).await?
        {
            recognizer.fetch_balance(&mut candidate).await?;
            recognizer.fetch_history(&mut candidate).await?;
            self.report(candidate);
        }
        self.tick();
        Ok(())
    }

    async fn watch_only(&mut self, secret: &WorkingSecret) -> ImportResult<()> {
        self.checkpoint()?;
        if let Some((recognizer, mut candidate)) =
            self.importer.probe(WalletKind::WatchOnly, secret, None).await?
        {
            recognizer.fetch_balance(&mut candidate).await?;
            self.report(candidate);
        }
        self.tick();
        Ok(())
    }

    /// Electrum seeds: chỉ structural match, không hỏi ledger
    async fn electrum(&mut self, secret: &WorkingSecret) -> ImportResult<()> {
        for kind in [WalletKind::ElectrumSeedP2wpkh, WalletKind::ElectrumSeedP2pkh] {
            self.checkpoint()?;
            if let Some((_, candidate)) = self.importer.probe(kind, secret, None).await? {
                self.report(candidate);
            }
            self.tick();
        }
        Ok(())
    }

    async fn aezeed(&mut self, secret: &WorkingSecret) -> ImportResult<()> {
        self.checkpoint()?;
        if let Some((_, candidate)) = self.importer.probe(WalletKind::Aezeed, secret, None).await? {
            self.report(candidate);
        }
        self.tick();
        Ok(())
    }

    /// SLIP-39: wrapped / legacy nếu đã dùng, native SegWit luôn được report
    async fn slip39(&mut self, secret: &WorkingSecret) -> ImportResult<()> {
        let importer = self.importer;
        self.checkpoint()?;

        if secret.is_multiline() {
            if let Some((recognizer, wrapped)) =
                importer.probe(WalletKind::Slip39SegwitP2sh, secret, None).await?
            {
                if recognizer.ever_used(&wrapped).await? {
                    self.report(wrapped);
                }
                self.tick();

                if let Some((recognizer, legacy)) = importer
                    .probe(WalletKind::Slip39LegacyP2pkh, secret, None)
                    .await?
                {
                    if recognizer.ever_used(&legacy).await? {
                        self.report(legacy);
                    }
                }
                self.tick();

                if let Some((_, native)) = importer
                    .probe(WalletKind::Slip39SegwitBech32, secret, None)
                    .await?
                {
                    self.report(native);
                }
            }
        }
        self.tick();
        Ok(())
    }

    // =========================================================================
    // PLUMBING
    // =========================================================================

    fn checkpoint(&self) -> ImportResult<()> {
        match &self.importer.cancel {
            Some(token) if token.is_cancelled() => Err(ImportError::Cancelled),
            _ => Ok(()),
        }
    }

    fn tick(&mut self) {
        let progress = self.progress.tick();
        self.callbacks.on_progress(progress);
    }

    fn report(&mut self, candidate: WalletCandidate) {
        info!(
            kind = %candidate.kind(),
            path = candidate.derivation_path().unwrap_or("-"),
            "wallet found"
        );
        self.reported += 1;
        self.callbacks.on_wallet(candidate);
    }

    fn enter(&mut self, phase: Phase) {
        debug!(from = ?self.phase, to = ?phase, "import phase");
        self.phase = phase;
    }

    /// Ép position = total, tick lần cuối, gọi `on_finish` đúng một lần
    fn finish(mut self, result: ImportResult<()>) -> ImportOutcome {
        let cancelled = match result {
            Ok(()) => false,
            Err(ImportError::Cancelled) => {
                warn!(phase = ?self.phase, reported = self.reported, "import cancelled");
                true
            }
            Err(ImportError::Wallet(e)) => {
                warn!(phase = ?self.phase, reported = self.reported, error = %e, "import aborted");
                false
            }
        };

        self.enter(if cancelled {
            Phase::Cancelled
        } else {
            Phase::Reporting
        });

        self.progress.finish();
        self.tick();

        let outcome = ImportOutcome { cancelled };
        self.callbacks.on_finish(&outcome);

        if !cancelled {
            self.enter(Phase::Finished);
        }
        info!(cancelled, reported = self.reported, "import finished");
        outcome
    }
}
