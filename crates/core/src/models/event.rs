//! Event details printed on exported winner lists

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The event a raffle is held for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventInfo {
    pub name: String,
    pub date: NaiveDate,
}

impl EventInfo {
    pub fn new(name: &str, date: NaiveDate) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::MissingEvent("event name is empty".into()));
        }
        Ok(Self {
            name: name.to_string(),
            date,
        })
    }

    /// Parse an ISO `YYYY-MM-DD` date as entered by the operator
    pub fn parse(name: &str, date: &str) -> Result<Self> {
        let date = date.trim();
        if date.is_empty() {
            return Err(Error::MissingEvent("event date is empty".into()));
        }
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|e| Error::MissingEvent(format!("invalid date {date:?}: {e}")))?;
        Self::new(name, date)
    }

    /// Date as shown on exports (dd-mm-yyyy)
    pub fn display_date(&self) -> String {
        self.date.format("%d-%m-%Y").to_string()
    }
}
