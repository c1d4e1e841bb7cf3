//! Tombola Core Library
//!
//! Participant pool, draw engine, spin renderer, winner ledger and exports
//! for the Tombola raffle.

pub mod config;
pub mod draw;
pub mod error;
pub mod export;
pub mod invariants;
pub mod ledger;
pub mod models;
pub mod pool;
pub mod session;
pub mod spin;
pub mod storage;

pub use config::Settings;
pub use draw::{DrawEngine, DrawParams, DrawPlan};
pub use error::{Error, Result};
pub use export::{ExportOutcome, Exporter, WinnerTable};
pub use ledger::Ledger;
pub use models::*;
pub use pool::Pool;
pub use session::{DrawSession, Phase};
pub use spin::{MemorySurface, SpinOutcome, SpinParams, SpinSurface, Spinner};
pub use storage::{LedgerStore, MemoryStore, WinnerCache};
