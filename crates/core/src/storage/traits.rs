//! Storage traits
//!
//! The session talks to the cache through [`LedgerStore`], so tests and
//! throwaway runs can keep the ledger in memory.

use std::cell::RefCell;

use crate::error::Result;
use crate::ledger::Ledger;

/// Best-effort persistence of the winner ledger
pub trait LedgerStore {
    /// Load the stored ledger; unreadable data yields an empty ledger
    fn load(&self) -> Ledger;

    /// Replace the stored ledger
    fn save(&self, ledger: &Ledger) -> Result<()>;

    /// Forget the stored ledger
    fn clear(&self) -> Result<()>;
}

/// Keeps the ledger for the lifetime of the value only
#[derive(Debug, Default)]
pub struct MemoryStore {
    ledger: RefCell<Ledger>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerStore for MemoryStore {
    fn load(&self) -> Ledger {
        self.ledger.borrow().clone()
    }

    fn save(&self, ledger: &Ledger) -> Result<()> {
        *self.ledger.borrow_mut() = ledger.clone();
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.ledger.borrow_mut().clear();
        Ok(())
    }
}
