// wallet-core/src/import/negotiator.rs
//
// Passphrase Negotiator - hỏi passphrase theo một retry policy cố định

use crate::error::{ImportError, ImportResult};
use crate::import::callbacks::{ImportCallbacks, PasswordPrompt, PasswordResponse};
use crate::recognizer::{FormatRecognizer, WorkingSecret};
use tokio_util::sync::CancellationToken;
use tracing::debug;
use zeroize::Zeroizing;

pub type Passphrase = Zeroizing<String>;

/// Retry policy cho một lần negotiation
pub enum PassphrasePolicy<'a> {
    /// Hỏi lại đến khi có giá trị không rỗng
    RequiredNonEmpty,
    /// Hỏi đúng một lần, chấp nhận cả câu trả lời rỗng
    OptionalOnce,
    /// Hỏi lại đến khi format chấp nhận passphrase
    ValidateLoop {
        recognizer: &'a dyn FormatRecognizer,
        secret: &'a WorkingSecret,
    },
}

pub struct PassphraseNegotiator<'c, C: ?Sized> {
    callbacks: &'c mut C,
    cancel: Option<&'c CancellationToken>,
    attempts: u32,
}

impl<'c, C> PassphraseNegotiator<'c, C>
where
    C: ImportCallbacks + ?Sized,
{
    pub fn new(callbacks: &'c mut C) -> Self {
        Self {
            callbacks,
            cancel: None,
            attempts: 0,
        }
    }

    pub fn with_cancellation(mut self, token: &'c CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Số lần đã gọi `on_password`
    #[inline]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Chạy policy. `Ok(None)` = không có passphrase.
    pub async fn negotiate(
        &mut self,
        prompt: PasswordPrompt,
        policy: PassphrasePolicy<'_>,
    ) -> ImportResult<Option<Passphrase>> {
        match policy {
            PassphrasePolicy::OptionalOnce => self.request(prompt).await,
            PassphrasePolicy::RequiredNonEmpty => loop {
                if let Some(passphrase) = self.request(prompt).await? {
                    return Ok(Some(passphrase));
                }
            },
            PassphrasePolicy::ValidateLoop { recognizer, secret } => loop {
                let candidate = self.request(prompt).await?;
                let probe = secret.with_passphrase(candidate.clone());
                if !recognizer.needs_passphrase(&probe).await? {
                    return Ok(candidate);
                }
                debug!(kind = %recognizer.kind(), attempt = self.attempts, "passphrase rejected");
            },
        }
    }

    async fn request(&mut self, prompt: PasswordPrompt) -> ImportResult<Option<Passphrase>> {
        if self.cancel.is_some_and(CancellationToken::is_cancelled) {
            return Err(ImportError::Cancelled);
        }

        self.attempts += 1;
        match self.callbacks.on_password(prompt).await {
            PasswordResponse::Provided(value) if !value.is_empty() => {
                Ok(Some(Zeroizing::new(value)))
            }
            PasswordResponse::Provided(_) | PasswordResponse::Absent => Ok(None),
            PasswordResponse::Cancelled => Err(ImportError::Cancelled),
        }
    }
}
