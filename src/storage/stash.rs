use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A saved staging area, stored newest-first in stash.json
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StashEntry {
    pub message: String,
    /// Branch that was checked out when the entry was saved
    pub branch: String,
    pub files: BTreeMap<String, String>,
    pub timestamp: DateTime<Utc>,
}

impl StashEntry {
    /// Snapshot `files`, falling back to a "WIP on <branch>" message
    pub fn new(message: Option<&str>, branch: &str, files: BTreeMap<String, String>) -> Self {
        let message = match message.map(str::trim) {
            Some(m) if !m.is_empty() => m.to_string(),
            _ => format!("WIP on {}", branch),
        };

        StashEntry {
            message,
            branch: branch.to_string(),
            files,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_message() {
        let entry = StashEntry::new(None, "feature", BTreeMap::new());
        assert_eq!(entry.message, "WIP on feature");

        let entry = StashEntry::new(Some("  "), "main", BTreeMap::new());
        assert_eq!(entry.message, "WIP on main");
    }

    #[test]
    fn test_explicit_message() {
        let entry = StashEntry::new(Some("half-done parser"), "main", BTreeMap::new());
        assert_eq!(entry.message, "half-done parser");
        assert_eq!(entry.branch, "main");
    }
}
