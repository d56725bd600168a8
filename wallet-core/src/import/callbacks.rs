// wallet-core/src/import/callbacks.rs
//
// Caller-side collaborators của một import run

use crate::import::progress::Progress;
use crate::recognizer::WalletCandidate;
use async_trait::async_trait;
use serde::Serialize;

/// Prompt hiển thị khi pipeline cần password / passphrase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PasswordPrompt {
    pub title: &'static str,
    pub message: &'static str,
}

impl PasswordPrompt {
    pub const ENCRYPTED_KEY: PasswordPrompt = PasswordPrompt {
        title: "Looks like a BIP38 encrypted key",
        message: "Enter the password to decrypt it",
    };

    pub const PASSPHRASE: PasswordPrompt = PasswordPrompt {
        title: "Passphrase",
        message: "Enter the passphrase if this wallet uses one. Leave it empty otherwise",
    };

    pub const AEZEED: PasswordPrompt = PasswordPrompt {
        title: "",
        message: "Enter the password to decrypt it",
    };
}

/// Câu trả lời của caller cho một prompt
pub enum PasswordResponse {
    Provided(String),
    /// User không nhập gì
    Absent,
    /// User bấm cancel: cả run bị hủy
    Cancelled,
}

impl std::fmt::Debug for PasswordResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PasswordResponse::Provided(_) => f.write_str("Provided([REDACTED])"),
            PasswordResponse::Absent => f.write_str("Absent"),
            PasswordResponse::Cancelled => f.write_str("Cancelled"),
        }
    }
}

/// Kết quả cuối của một run, resolve đúng một lần
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportOutcome {
    pub cancelled: bool,
}

/// ImportCallbacks - progress, wallet-found, password-request, no-more-questions, finish
///
/// Các callbacks được gọi tuần tự, không bao giờ đồng thời.
#[async_trait]
pub trait ImportCallbacks: Send {
    fn on_progress(&mut self, progress: Progress);

    fn on_wallet(&mut self, candidate: WalletCandidate);

    async fn on_password(&mut self, prompt: PasswordPrompt) -> PasswordResponse;

    /// Không còn prompt nào nữa trong run này
    fn on_no_questions(&mut self);

    fn on_finish(&mut self, _outcome: &ImportOutcome) {}
}
