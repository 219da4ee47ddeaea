mod credential;
mod error;
mod file;
mod memory;
mod records;

pub use credential::CredentialSlot;
pub use error::{Result, StoreError};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use records::RecordStore;

/// Slot holding the serialized card list
pub const RECORDS_SLOT: &str = "vocabArgs";
/// Slot holding the generation API key
pub const CREDENTIAL_SLOT: &str = "geminiApiKey";

/// Persistent string slots, read and written whole
pub trait KeyValueStore: Send + Sync {
    /// Read a slot, `None` when it was never written
    fn get(&self, slot: &str) -> Result<Option<String>>;

    /// Replace the slot's value
    fn set(&self, slot: &str, value: &str) -> Result<()>;

    /// Delete the slot, no-op when missing
    fn remove(&self, slot: &str) -> Result<()>;
}
