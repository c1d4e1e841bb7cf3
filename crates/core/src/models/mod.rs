//! Data models for Tombola

mod event;
mod participant;
mod winner;

pub use event::*;
pub use participant::*;
pub use winner::*;
