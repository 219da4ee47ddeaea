use std::sync::Arc;

use crate::{CREDENTIAL_SLOT, KeyValueStore, Result, StoreError};

/// Optional API key kept in the shared store
#[derive(Clone)]
pub struct CredentialSlot {
    store: Arc<dyn KeyValueStore>,
}

impl CredentialSlot {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Stored key, trimmed. Missing, blank or unreadable means no key.
    pub fn get(&self) -> Option<String> {
        match self.store.get(CREDENTIAL_SLOT) {
            Ok(value) => value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            Err(e) => {
                tracing::warn!("Failed to read API key: {e}");
                None
            }
        }
    }

    pub fn set(&self, key: &str) -> Result<()> {
        let key = key.trim();
        if key.is_empty() {
            return Err(StoreError::EmptyCredential);
        }
        self.store.set(CREDENTIAL_SLOT, key)?;
        tracing::info!("API key saved");
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        self.store.remove(CREDENTIAL_SLOT)?;
        tracing::info!("API key cleared");
        Ok(())
    }

    /// Key with everything but the last four characters hidden
    pub fn masked(&self) -> Option<String> {
        self.get().map(|key| mask(&key))
    }
}

fn mask(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let visible = chars.len().min(4);
    let hidden = chars.len() - visible;
    let tail: String = chars[hidden..].iter().collect();
    format!("{}{}", "*".repeat(hidden), tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    #[test]
    fn test_absent_by_default() {
        let slot = CredentialSlot::new(Arc::new(MemoryStore::new()));
        assert_eq!(slot.get(), None);
        assert_eq!(slot.masked(), None);
    }

    #[test]
    fn test_set_trims_and_clear_removes() {
        let store = Arc::new(MemoryStore::new());
        let slot = CredentialSlot::new(store.clone());

        slot.set("  AIzaSecret1234 \n").unwrap();
        assert_eq!(slot.get().as_deref(), Some("AIzaSecret1234"));
        assert_eq!(store.get(CREDENTIAL_SLOT).unwrap().as_deref(), Some("AIzaSecret1234"));

        slot.clear().unwrap();
        assert_eq!(slot.get(), None);
    }

    #[test]
    fn test_blank_key_is_rejected() {
        let slot = CredentialSlot::new(Arc::new(MemoryStore::new()));
        assert!(matches!(slot.set("   "), Err(StoreError::EmptyCredential)));
        assert_eq!(slot.get(), None);
    }

    #[test]
    fn test_blank_stored_value_reads_as_absent() {
        let store = Arc::new(MemoryStore::new());
        store.set(CREDENTIAL_SLOT, "  ").unwrap();
        assert_eq!(CredentialSlot::new(store).get(), None);
    }

    #[test]
    fn test_mask() {
        assert_eq!(mask("abcdefgh"), "****efgh");
        assert_eq!(mask("abc"), "abc");
    }
}
