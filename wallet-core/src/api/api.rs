use crate::chains::BitcoinChainConfig;
use crate::config::ImportConfig;
use crate::crypto::WalletMnemonic;
use crate::error::{WalletError, WalletResult};
use crate::import::{ImportCallbacks, ImportOutcome, Importer};
use crate::network::{CustodianClient, LedgerClient};
use crate::recognizer::{CustodianRecognizer, FormatCatalog, KeyDecryptor, WalletKind};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// Core Initialization
pub fn init_core() -> Result<(), WalletError> {
    // Gọi nhiều lần vẫn OK: subscriber đã cài thì bỏ qua
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
    Ok(())
}

// --- Importer Setup ---

/// Collaborators mà host app cung cấp cho pipeline
pub struct ImportServices {
    pub ledger: Arc<dyn LedgerClient>,
    pub custodian: Option<(String, Arc<dyn CustodianClient>)>,
    pub decryptor: Option<Arc<dyn KeyDecryptor>>,
}

impl ImportServices {
    pub fn new(ledger: Arc<dyn LedgerClient>) -> Self {
        Self {
            ledger,
            custodian: None,
            decryptor: None,
        }
    }
}

pub fn create_importer(config: ImportConfig, services: ImportServices) -> WalletResult<Importer> {
    let mut catalog = FormatCatalog::with_ledger(&config, services.ledger);
    if let Some((endpoint, client)) = services.custodian {
        catalog.register(Arc::new(CustodianRecognizer::new(&config, endpoint, client)));
    }
    if let Some(decryptor) = services.decryptor {
        catalog.set_decryptor(decryptor);
    }
    Importer::new(config, catalog)
}

pub fn create_importer_from_json(json: &str, services: ImportServices) -> WalletResult<Importer> {
    create_importer(ImportConfig::from_json(json)?, services)
}

// --- Import ---

pub async fn start_import<C>(importer: &Importer, text: String, callbacks: &mut C) -> ImportOutcome
where
    C: ImportCallbacks + ?Sized,
{
    importer.run(&text, callbacks).await
}

pub fn is_valid_mnemonic(phrase: String) -> bool {
    WalletMnemonic::validate(&phrase)
}

/// Các formats mà importer này có thể nhận ra
pub fn get_supported_formats(importer: &Importer) -> Vec<WalletKind> {
    WalletKind::ALL
        .iter()
        .copied()
        .filter(|kind| importer.catalog().contains(*kind))
        .collect()
}

// --- Config Helpers ---

pub fn get_default_chains() -> Vec<BitcoinChainConfig> {
    vec![
        BitcoinChainConfig::mainnet(),
        BitcoinChainConfig::testnet(),
        BitcoinChainConfig::signet(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::models::{AccessToken, Balance, Invoice, Transaction};
    use crate::recognizer::CustodianLogin;
    use async_trait::async_trait;

    struct EmptyLedger;

    #[async_trait]
    impl LedgerClient for EmptyLedger {
        async fn get_balance(&self, _address: &str) -> WalletResult<Balance> {
            Ok(Balance::from_sats(0))
        }

        async fn get_transaction_history(
            &self,
            _address: &str,
            _page: u32,
            _limit: u32,
        ) -> WalletResult<Vec<Transaction>> {
            Ok(Vec::new())
        }
    }

    struct OfflineCustodian;

    #[async_trait]
    impl CustodianClient for OfflineCustodian {
        async fn authorize(&self, _endpoint: &str, _login: &CustodianLogin) -> WalletResult<AccessToken> {
            Err(WalletError::Custodian("offline".to_string()))
        }

        async fn fetch_transactions(&self, _: &str, _: &AccessToken) -> WalletResult<Vec<Transaction>> {
            Ok(Vec::new())
        }

        async fn fetch_user_invoices(&self, _: &str, _: &AccessToken) -> WalletResult<Vec<Invoice>> {
            Ok(Vec::new())
        }

        async fn fetch_pending_transactions(
            &self,
            _: &str,
            _: &AccessToken,
        ) -> WalletResult<Vec<Transaction>> {
            Ok(Vec::new())
        }

        async fn fetch_balance(&self, _: &str, _: &AccessToken) -> WalletResult<Balance> {
            Ok(Balance::from_sats(0))
        }
    }

    #[test]
    fn test_init_core_twice() {
        assert!(init_core().is_ok());
        assert!(init_core().is_ok());
    }

    #[test]
    fn test_create_importer_registers_services() {
        let mut services = ImportServices::new(Arc::new(EmptyLedger));
        services.custodian = Some(("https://hub.example".to_string(), Arc::new(OfflineCustodian)));

        let importer = create_importer(ImportConfig::mainnet(), services).unwrap();
        let formats = get_supported_formats(&importer);

        assert!(formats.contains(&WalletKind::HdSegwitBech32));
        assert!(formats.contains(&WalletKind::WatchOnly));
        assert!(formats.contains(&WalletKind::LightningCustodian));
        assert!(!formats.contains(&WalletKind::Aezeed));
        assert!(importer.catalog().decryptor().is_none());
    }

    #[test]
    fn test_create_importer_from_json() {
        let services = ImportServices::new(Arc::new(EmptyLedger));
        let importer =
            create_importer_from_json(r#"{"accountIterations": 2}"#, services).unwrap();
        assert_eq!(importer.config().account_iterations, 2);
        assert_eq!(importer.config().total_steps, 10);

        let services = ImportServices::new(Arc::new(EmptyLedger));
        assert!(create_importer_from_json(r#"{"totalSteps": 0}"#, services).is_err());
    }

    #[test]
    fn test_helpers() {
        assert!(is_valid_mnemonic(
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about"
                .to_string()
        ));
        assert!(!is_valid_mnemonic("hello world".to_string()));
        assert_eq!(get_default_chains().len(), 3);
    }
}
