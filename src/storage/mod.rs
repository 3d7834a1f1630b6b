pub mod json_backend;

use std::path::Path;

use crate::{errors::LedgerError, ledger::Ledger};

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Abstraction over persistence backends capable of storing ledgers.
///
/// Writes are optimistic from the core's perspective: in-memory state stays
/// authoritative and a failed save is reported without rolling anything back.
pub trait StorageBackend: Send + Sync {
    fn save(&self, ledger: &Ledger, name: &str) -> Result<()>;
    fn load(&self, name: &str) -> Result<Ledger>;
    fn list(&self) -> Result<Vec<String>>;

    /// Optional helpers for ad-hoc file operations, defaulting to the JSON
    /// document format.
    fn save_to_path(&self, ledger: &Ledger, path: &Path) -> Result<()> {
        json_backend::write_ledger(ledger, path)
    }

    fn load_from_path(&self, path: &Path) -> Result<Ledger> {
        json_backend::read_ledger(path)
    }
}

pub use json_backend::JsonStorage;
