use std::sync::Arc;

use lugat_config::Config;
use lugat_store::{CredentialSlot, KeyValueStore, RecordStore};
use tokio::sync::{Mutex, RwLock};

use crate::status::SessionStatus;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub records: Mutex<RecordStore>,
    pub credential: CredentialSlot,
    pub status: Arc<RwLock<SessionStatus>>,
    /// Ignore the stored key and always use the offline resolver
    pub force_mock: bool,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn KeyValueStore>, force_mock: bool) -> Self {
        let records = RecordStore::load(store.clone(), config.storage.date_format.clone());

        Self {
            config: Arc::new(RwLock::new(config)),
            records: Mutex::new(records),
            credential: CredentialSlot::new(store),
            status: Arc::new(RwLock::new(SessionStatus::default())),
            force_mock,
        }
    }

    /// Key to resolve with, `None` selects the offline resolver
    pub fn lookup_credential(&self) -> Option<String> {
        if self.force_mock {
            return None;
        }
        self.credential.get()
    }
}
