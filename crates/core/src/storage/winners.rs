//! Winner cache
//!
//! Stores the ledger as JSON in `<data dir>/raffle_winners_v1.json`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::instrument;

use super::LedgerStore;
use crate::error::{Error, Result};
use crate::ledger::Ledger;

/// Key the ledger is cached under
pub const WINNERS_KEY: &str = "raffle_winners_v1";

#[derive(Debug, Clone)]
pub struct WinnerCache {
    path: PathBuf,
}

impl WinnerCache {
    /// Cache file inside `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(format!("{WINNERS_KEY}.json")),
        }
    }

    /// Cache file in the platform data directory, created if missing
    #[instrument]
    pub fn open_default() -> Result<Self> {
        let dirs = ProjectDirs::from("dev", "onyx", "tombola").ok_or_else(|| {
            Error::Io(std::io::Error::new(
                ErrorKind::NotFound,
                "Could not determine data directory",
            ))
        })?;

        let dir = dirs.data_dir();
        fs::create_dir_all(dir)?;
        Ok(Self::in_dir(dir))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Option<Ledger>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }
}

impl LedgerStore for WinnerCache {
    fn load(&self) -> Ledger {
        match self.read() {
            Ok(Some(ledger)) => {
                tracing::debug!(winners = ledger.len(), path = %self.path.display(), "Winner cache loaded");
                ledger
            }
            Ok(None) => Ledger::new(),
            Err(e) => {
                tracing::warn!(error = %e, path = %self.path.display(), "Could not read winner cache");
                Ledger::new()
            }
        }
    }

    fn save(&self, ledger: &Ledger) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string(ledger)?)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
