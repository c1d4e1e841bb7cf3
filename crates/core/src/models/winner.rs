//! Winner record model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Participant;

/// A confirmed winner, as stored in the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinnerRecord {
    pub id: u32,
    pub name: String,
    pub department: String,
    pub timestamp: DateTime<Utc>,
    pub attended: bool,
}

impl WinnerRecord {
    /// Record a winner who showed up to collect the prize
    pub fn attended(participant: &Participant) -> Self {
        Self {
            id: participant.id,
            name: participant.name.clone(),
            department: participant.department.clone(),
            timestamp: Utc::now(),
            attended: true,
        }
    }
}
