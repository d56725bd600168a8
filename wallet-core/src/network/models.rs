// wallet-core/src/network/models.rs
//
// Ledger Data Models - cấu trúc dữ liệu mà ledger / custodian clients trả về
//
// Tất cả structs đều:
// - Serialize/Deserialize friendly (camelCase JSON)
// - Clone + Debug cho flexibility

use serde::{Deserialize, Serialize};

// =============================================================================
// BALANCE
// =============================================================================

/// Số dư (raw satoshis + formatted)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    /// Số dư raw (string để tránh overflow)
    pub raw: String,
    /// Số dư đã format với decimals (e.g., "1.5")
    pub formatted: String,
    /// Symbol (e.g., "BTC")
    pub symbol: String,
    /// Số decimals
    pub decimals: u8,
    /// Phần chưa confirm (satoshis), nếu ledger báo riêng
    #[serde(default)]
    pub unconfirmed: Option<i64>,
}

impl Balance {
    /// Tạo Balance từ raw value và decimals
    pub fn new(raw: impl Into<String>, decimals: u8, symbol: impl Into<String>) -> Self {
        let raw_str = raw.into();
        let formatted = Self::format_balance(&raw_str, decimals);
        Self {
            raw: raw_str,
            formatted,
            symbol: symbol.into(),
            decimals,
            unconfirmed: None,
        }
    }

    /// Tạo Balance BTC từ satoshis
    pub fn from_sats(sats: u64) -> Self {
        Self::new(sats.to_string(), 8, "BTC")
    }

    /// Raw value dưới dạng số. `None` nếu raw không parse được.
    pub fn sats(&self) -> Option<u64> {
        self.raw.parse().ok()
    }

    /// Cộng hai balance cùng symbol (dùng khi tổng hợp nhiều địa chỉ)
    ///
    /// `None` khi khác symbol/decimals hoặc khi tổng bị overflow.
    pub fn checked_add(&self, other: &Balance) -> Option<Balance> {
        if self.symbol != other.symbol || self.decimals != other.decimals {
            return None;
        }
        let total = self.sats()?.checked_add(other.sats()?)?;
        let unconfirmed = match (self.unconfirmed, other.unconfirmed) {
            (None, None) => None,
            (a, b) => Some(a.unwrap_or(0).checked_add(b.unwrap_or(0))?),
        };

        let mut sum = Balance::new(total.to_string(), self.decimals, self.symbol.clone());
        sum.unconfirmed = unconfirmed;
        Some(sum)
    }

    /// Format raw balance thành human-readable string
    fn format_balance(raw: &str, decimals: u8) -> String {
        if decimals == 0 || raw == "0" {
            return raw.to_string();
        }

        let raw_len = raw.len();
        let decimals_usize = decimals as usize;

        if raw_len <= decimals_usize {
            // Số nhỏ hơn 1 (e.g., 0.001)
            let padding = decimals_usize - raw_len;
            let decimal_part = format!("{}{}", "0".repeat(padding), raw);
            let trimmed = decimal_part.trim_end_matches('0');
            if trimmed.is_empty() {
                "0".to_string()
            } else {
                format!("0.{}", trimmed)
            }
        } else {
            // Số >= 1
            let integer_part = &raw[..raw_len - decimals_usize];
            let decimal_part = &raw[raw_len - decimals_usize..];
            let trimmed_decimal = decimal_part.trim_end_matches('0');
            if trimmed_decimal.is_empty() {
                integer_part.to_string()
            } else {
                format!("{}.{}", integer_part, trimmed_decimal)
            }
        }
    }
}

// =============================================================================
// TRANSACTIONS
// =============================================================================

/// Trạng thái giao dịch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Đang chờ xác nhận
    Pending,
    /// Đã xác nhận thành công
    Confirmed,
    /// Thất bại
    Failed,
}

/// Chi tiết giao dịch trên ledger hoặc custodian
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Transaction hash (txid hoặc payment hash)
    pub hash: String,
    /// Giá trị thay đổi (satoshis, âm = gửi đi)
    pub value: i64,
    /// Phí giao dịch (satoshis)
    pub fee: u64,
    /// Trạng thái
    pub status: TransactionStatus,
    /// Block height (nếu confirmed)
    pub block_height: Option<u64>,
    /// Timestamp (Unix seconds)
    pub timestamp: Option<u64>,
    /// Số confirmations
    pub confirmations: u64,
    /// Memo (custodial payments)
    #[serde(default)]
    pub memo: Option<String>,
}

/// Lightning invoice do custodian trả về
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// BOLT-11 payment request
    pub payment_request: String,
    /// Payment hash (hex)
    pub payment_hash: String,
    /// Số tiền (satoshis)
    pub amount: u64,
    pub description: Option<String>,
    /// Đã thanh toán chưa
    pub is_paid: bool,
    /// Timestamp tạo invoice (Unix seconds)
    pub timestamp: u64,
    /// Thời gian hết hạn (giây)
    pub expire_time: u64,
}

// =============================================================================
// CUSTODIAN SESSION
// =============================================================================

/// Access token sau khi authorize với custodian
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessToken {
    pub access_token: String,
    pub refresh_token: String,
}

// Custom Debug - không hiển thị token
impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
