// wallet-core/src/network/traits.rs

// Remote Collaborator Traits - Ledger & Custodian
//
// Pipeline import không tự nói chuyện với mạng: mọi truy vấn balance / history /
// "ever used" đi qua các traits này. Timeout và rate-limit là trách nhiệm của
// implementation.

use crate::error::WalletResult;
use crate::network::models::{AccessToken, Balance, Invoice, Transaction};
use crate::recognizer::custodian::CustodianLogin;
use async_trait::async_trait;

// =============================================================================
// LEDGER CLIENT TRAIT
// =============================================================================

/// LedgerClient - Interface tới Bitcoin ledger (Electrum server, indexer, ...)
///
/// # Design Principles
/// - **Async-First**: Tất cả network operations đều async
/// - **Error Handling**: lỗi mạng trả về `WalletError::Ledger`
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Lấy số dư của một địa chỉ
    async fn get_balance(&self, address: &str) -> WalletResult<Balance>;

    /// Lấy lịch sử giao dịch
    ///
    /// # Arguments
    /// * `address` - Địa chỉ cần query
    /// * `page` - Trang (0-indexed)
    /// * `limit` - Số lượng mỗi trang
    async fn get_transaction_history(
        &self,
        address: &str,
        page: u32,
        limit: u32,
    ) -> WalletResult<Vec<Transaction>>;

    /// Có địa chỉ nào trong danh sách từng có giao dịch không
    ///
    /// Default: hỏi history từng địa chỉ, dừng ở địa chỉ đầu tiên có giao dịch.
    async fn was_ever_used(&self, addresses: &[String]) -> WalletResult<bool> {
        for address in addresses {
            if !self.get_transaction_history(address, 0, 1).await?.is_empty() {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

// =============================================================================
// CUSTODIAN CLIENT TRAIT
// =============================================================================

/// CustodianClient - Interface tới Lightning custodial hub (LndHub-compatible)
///
/// Một client được tạo cho một endpoint cụ thể; pipeline gọi `authorize`
/// trước, rồi dùng token cho mọi truy vấn sau.
#[async_trait]
pub trait CustodianClient: Send + Sync {
    /// Đăng nhập bằng login/password, trả về access token
    async fn authorize(&self, endpoint: &str, login: &CustodianLogin) -> WalletResult<AccessToken>;

    /// Lịch sử payment đã hoàn tất
    async fn fetch_transactions(
        &self,
        endpoint: &str,
        token: &AccessToken,
    ) -> WalletResult<Vec<Transaction>>;

    /// Invoices do user tạo
    async fn fetch_user_invoices(
        &self,
        endpoint: &str,
        token: &AccessToken,
    ) -> WalletResult<Vec<Invoice>>;

    /// Payments đang pending
    async fn fetch_pending_transactions(
        &self,
        endpoint: &str,
        token: &AccessToken,
    ) -> WalletResult<Vec<Transaction>>;

    /// Số dư custodial
    async fn fetch_balance(&self, endpoint: &str, token: &AccessToken) -> WalletResult<Balance>;
}
