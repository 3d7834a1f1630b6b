use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};

use crate::{errors::LedgerError, ledger::Ledger};

use super::{Result, StorageBackend};

const LEDGER_EXTENSION: &str = "json";
const STAGING_SUFFIX: &str = ".partial";
const APP_DIR: &str = "quincena";

/// Serializes a ledger to `path` as pretty-printed JSON. The bytes are
/// staged in a sibling `.partial` file and renamed into place, so a crash
/// mid-write never leaves a truncated document behind the real name.
pub fn write_ledger(ledger: &Ledger, path: &Path) -> Result<()> {
    let staged = staging_path(path);
    fs::write(&staged, serde_json::to_string_pretty(ledger)?)?;
    fs::rename(&staged, path)?;
    Ok(())
}

/// Reads a ledger document back from `path`.
pub fn read_ledger(path: &Path) -> Result<Ledger> {
    Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.file_name().map(Into::into).unwrap_or_default();
    name.push(STAGING_SUFFIX);
    path.with_file_name(name)
}

/// JSON-file persistence backend. Each ledger is one document under the
/// storage root, keyed by its canonicalized name.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    /// Creates a backend rooted at `root`, or at the platform data directory
    /// when none is provided. The directory is created if missing.
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = match root {
            Some(path) => path,
            None => dirs::data_dir()
                .ok_or_else(|| LedgerError::Storage("No platform data directory".into()))?
                .join(APP_DIR),
        };
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn ledger_path(&self, name: &str) -> PathBuf {
        self.root
            .join(format!("{}.{LEDGER_EXTENSION}", canonical_name(name)))
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }
}

impl StorageBackend for JsonStorage {
    fn save(&self, ledger: &Ledger, name: &str) -> Result<()> {
        write_ledger(ledger, &self.ledger_path(name))
    }

    fn load(&self, name: &str) -> Result<Ledger> {
        let path = self.ledger_path(name);
        if !path.exists() {
            return Err(LedgerError::Storage(format!(
                "ledger `{}` not found",
                name
            )));
        }
        read_ledger(&path)
    }

    fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(LEDGER_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

fn canonical_name(name: &str) -> String {
    name.trim().to_ascii_lowercase().replace(' ', "_")
}
