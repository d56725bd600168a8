// wallet-core/src/recognizer/catalog.rs
//
// Format Catalog - registry WalletKind → recognizer
//
// Pipeline chỉ tra cứu recognizer theo kind; thêm/bớt format không cần sửa driver.

use crate::chains::bitcoin::ScriptType;
use crate::config::ImportConfig;
use crate::network::traits::LedgerClient;
use crate::recognizer::{
    FormatRecognizer, HdMnemonicRecognizer, KeyDecryptor, SingleKeyRecognizer, WalletKind,
    WatchOnlyRecognizer,
};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Default, Clone)]
pub struct FormatCatalog {
    recognizers: HashMap<WalletKind, Arc<dyn FormatRecognizer>>,
    decryptor: Option<Arc<dyn KeyDecryptor>>,
}

impl std::fmt::Debug for FormatCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<_> = self.recognizers.keys().map(|k| k.label()).collect();
        kinds.sort_unstable();
        f.debug_struct("FormatCatalog")
            .field("kinds", &kinds)
            .field("has_decryptor", &self.decryptor.is_some())
            .finish()
    }
}

impl FormatCatalog {
    /// Catalog rỗng
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog với các built-in recognizers dùng chung một ledger:
    /// HD BIP-39 (3 script types), single key (3 script types), watch-only.
    pub fn with_ledger(config: &ImportConfig, ledger: Arc<dyn LedgerClient>) -> Self {
        let mut catalog = Self::new();
        for script in [ScriptType::P2pkh, ScriptType::P2wpkhP2sh, ScriptType::P2wpkh] {
            catalog.register(Arc::new(HdMnemonicRecognizer::new(
                script,
                config,
                ledger.clone(),
            )));
            catalog.register(Arc::new(SingleKeyRecognizer::new(
                script,
                config,
                ledger.clone(),
            )));
        }
        catalog.register(Arc::new(WatchOnlyRecognizer::new(config, ledger)));
        catalog
    }

    /// Đăng ký recognizer theo `kind()` của nó, thay thế recognizer cũ nếu có
    pub fn register(&mut self, recognizer: Arc<dyn FormatRecognizer>) -> &mut Self {
        self.recognizers.insert(recognizer.kind(), recognizer);
        self
    }

    pub fn remove(&mut self, kind: WalletKind) -> Option<Arc<dyn FormatRecognizer>> {
        self.recognizers.remove(&kind)
    }

    #[inline]
    pub fn get(&self, kind: WalletKind) -> Option<&Arc<dyn FormatRecognizer>> {
        self.recognizers.get(&kind)
    }

    #[inline]
    pub fn contains(&self, kind: WalletKind) -> bool {
        self.recognizers.contains_key(&kind)
    }

    pub fn set_decryptor(&mut self, decryptor: Arc<dyn KeyDecryptor>) -> &mut Self {
        self.decryptor = Some(decryptor);
        self
    }

    #[inline]
    pub fn decryptor(&self) -> Option<&Arc<dyn KeyDecryptor>> {
        self.decryptor.as_ref()
    }
}
