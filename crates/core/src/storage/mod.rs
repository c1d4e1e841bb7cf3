//! Local persistence for Tombola
//!
//! Only the winner ledger is kept between runs, under a single key.

mod traits;
mod winners;

pub use traits::{LedgerStore, MemoryStore};
pub use winners::{WinnerCache, WINNERS_KEY};
