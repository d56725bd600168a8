// wallet-core/src/recognizer/candidate.rs
//
// Wallet Candidate - một wallet có thể import, do recognizer tạo ra
// và được giao cho caller qua `on_wallet`.

use crate::network::models::{AccessToken, Balance, Invoice, Transaction};
use crate::recognizer::WalletKind;
use std::fmt;
use zeroize::Zeroizing;

/// Một wallet candidate
///
/// Recognizer tạo và làm giàu candidate (address, balance, history, ...).
/// Sau khi được report, pipeline không sửa nó nữa: `on_wallet` nhận ownership.
#[derive(Clone)]
pub struct WalletCandidate {
    kind: WalletKind,
    secret: Zeroizing<String>,
    passphrase: Option<Zeroizing<String>>,
    derivation_path: Option<String>,
    address: Option<String>,
    // Lightning custodian
    base_uri: Option<String>,
    auth_token: Option<AccessToken>,
    // Remote cache
    balance: Option<Balance>,
    transactions: Vec<Transaction>,
    pending_transactions: Vec<Transaction>,
    invoices: Vec<Invoice>,
}

// Custom Debug - KHÔNG BAO GIỜ hiển thị secret / passphrase
impl fmt::Debug for WalletCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletCandidate")
            .field("kind", &self.kind)
            .field("secret", &"[REDACTED]")
            .field("has_passphrase", &self.passphrase.is_some())
            .field("derivation_path", &self.derivation_path)
            .field("address", &self.address)
            .field("base_uri", &self.base_uri)
            .field("balance", &self.balance)
            .field("transactions", &self.transactions.len())
            .finish()
    }
}

impl WalletCandidate {
    pub fn new(kind: WalletKind, secret: &str) -> Self {
        Self {
            kind,
            secret: Zeroizing::new(secret.to_string()),
            passphrase: None,
            derivation_path: None,
            address: None,
            base_uri: None,
            auth_token: None,
            balance: None,
            transactions: Vec::new(),
            pending_transactions: Vec::new(),
            invoices: Vec::new(),
        }
    }

    // =========================================================================
    // BUILDERS
    // =========================================================================

    pub fn with_passphrase(mut self, passphrase: Option<&str>) -> Self {
        self.passphrase = passphrase
            .filter(|p| !p.is_empty())
            .map(|p| Zeroizing::new(p.to_string()));
        self
    }

    pub fn with_derivation_path(mut self, path: impl Into<String>) -> Self {
        self.derivation_path = Some(path.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = Some(base_uri.into());
        self
    }

    // =========================================================================
    // GETTERS
    // =========================================================================

    #[inline]
    pub fn kind(&self) -> WalletKind {
        self.kind
    }

    /// Secret material
    ///
    /// # Warning
    /// Cẩn thận khi hiển thị hoặc log giá trị này!
    #[inline]
    pub fn secret(&self) -> &str {
        &self.secret
    }

    #[inline]
    pub fn passphrase(&self) -> Option<&str> {
        self.passphrase.as_deref().map(String::as_str)
    }

    #[inline]
    pub fn derivation_path(&self) -> Option<&str> {
        self.derivation_path.as_deref()
    }

    #[inline]
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    #[inline]
    pub fn base_uri(&self) -> Option<&str> {
        self.base_uri.as_deref()
    }

    #[inline]
    pub fn auth_token(&self) -> Option<&AccessToken> {
        self.auth_token.as_ref()
    }

    #[inline]
    pub fn balance(&self) -> Option<&Balance> {
        self.balance.as_ref()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn pending_transactions(&self) -> &[Transaction] {
        &self.pending_transactions
    }

    pub fn invoices(&self) -> &[Invoice] {
        &self.invoices
    }

    // =========================================================================
    // REMOTE CACHE
    // =========================================================================

    pub fn set_auth_token(&mut self, token: AccessToken) {
        self.auth_token = Some(token);
    }

    pub fn set_balance(&mut self, balance: Balance) {
        self.balance = Some(balance);
    }

    pub fn set_transactions(&mut self, transactions: Vec<Transaction>) {
        self.transactions = transactions;
    }

    pub fn set_pending_transactions(&mut self, transactions: Vec<Transaction>) {
        self.pending_transactions = transactions;
    }

    pub fn set_invoices(&mut self, invoices: Vec<Invoice>) {
        self.invoices = invoices;
    }
}
