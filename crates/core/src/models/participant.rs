//! Participant model and roster parsing

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Someone taking part in the raffle
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Participant {
    /// Sequential id, starting at 1, in input order
    pub id: u32,
    pub name: String,
    pub department: String,
}

impl Participant {
    pub fn new(id: u32, name: impl Into<String>, department: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            department: department.into(),
        }
    }
}

/// Parse newline-delimited `name, department` entries.
///
/// Blank lines are skipped. Any entry missing a name or a department
/// rejects the whole roster.
pub fn parse_roster(text: &str) -> Result<Vec<Participant>> {
    let lines: Vec<&str> = text
        .split('\n')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    if lines.is_empty() {
        return Err(Error::EmptyRoster);
    }

    lines
        .iter()
        .enumerate()
        .map(|(index, line)| {
            let mut parts = line.split(',').map(str::trim);
            let name = parts.next().unwrap_or_default();
            let department = parts.next().unwrap_or_default();

            if name.is_empty() || department.is_empty() {
                return Err(Error::InvalidEntry {
                    line: index + 1,
                    entry: line.to_string(),
                });
            }

            Ok(Participant::new(index as u32 + 1, name, department))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_entries() {
        let roster = parse_roster("Ana, Sales\nLuis, IT").unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0], Participant::new(1, "Ana", "Sales"));
        assert_eq!(roster[1], Participant::new(2, "Luis", "IT"));
    }

    #[test]
    fn test_parse_skips_blank_lines_and_trims() {
        let roster = parse_roster("\n  Ana ,  Sales  \r\n\n\tLuis,IT\n   \n").unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].name, "Ana");
        assert_eq!(roster[0].department, "Sales");
        assert_eq!(roster[1].id, 2);
    }

    #[test]
    fn test_parse_ignores_extra_fields() {
        let roster = parse_roster("Ana, Sales, Floor 3").unwrap();
        assert_eq!(roster[0].department, "Sales");
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(matches!(parse_roster(""), Err(Error::EmptyRoster)));
        assert!(matches!(parse_roster(" \n\n  "), Err(Error::EmptyRoster)));
    }

    #[test]
    fn test_parse_missing_department() {
        let err = parse_roster("Ana, Sales\nLuis").unwrap_err();
        match err {
            Error::InvalidEntry { line, entry } => {
                assert_eq!(line, 2);
                assert_eq!(entry, "Luis");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_missing_name() {
        assert!(matches!(
            parse_roster(", Sales"),
            Err(Error::InvalidEntry { line: 1, .. })
        ));
    }
}
