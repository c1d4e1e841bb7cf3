//! Winner ledger
//!
//! Append-only list of confirmed winners.

use serde::{Deserialize, Serialize};

use crate::models::WinnerRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    records: Vec<WinnerRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, record: WinnerRecord) {
        tracing::info!(winner_id = record.id, name = %record.name, "Winner recorded");
        self.records.push(record);
    }

    pub fn records(&self) -> &[WinnerRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, id: u32) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Participant;

    #[test]
    fn test_record_appends_in_order() {
        let mut ledger = Ledger::new();
        ledger.record(WinnerRecord::attended(&Participant::new(2, "Luis", "IT")));
        ledger.record(WinnerRecord::attended(&Participant::new(1, "Ana", "Sales")));

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.records()[0].name, "Luis");
        assert!(ledger.contains(1));
        assert!(!ledger.contains(3));
    }

    #[test]
    fn test_serializes_as_plain_list() {
        let mut ledger = Ledger::new();
        ledger.record(WinnerRecord::attended(&Participant::new(1, "Ana", "Sales")));

        let json = serde_json::to_value(&ledger).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["name"], "Ana");
        assert_eq!(json[0]["attended"], true);
    }
}
