//! Domain model for a ledger entry.
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryType {
    Credit,
    Debit,
}

impl EntryType {
    /// Storage representation of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Credit => "credit",
            EntryType::Debit => "debit",
        }
    }

    /// Parse a stored type value. Unknown values are an error, never a
    /// silent default.
    pub fn parse(value: &str) -> Result<Self, String> {
        match value {
            "credit" => Ok(EntryType::Credit),
            "debit" => Ok(EntryType::Debit),
            other => Err(format!("Unknown entry type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    pub date: DateTime<FixedOffset>,
    pub description: String,
    /// Always positive; the direction is carried by `entry_type`
    pub amount: f64,
    pub entry_type: EntryType,
}

impl Entry {
    /// Generate a unique entry ID based on type and current timestamp.
    /// Format: <cr|db>-<timestamp_ms>-<random_suffix>
    /// Example: cr-1625846400123-af3c
    pub fn generate_id(entry_type: EntryType, timestamp_ms: u64) -> String {
        let prefix = match entry_type {
            EntryType::Credit => "cr",
            EntryType::Debit => "db",
        };
        let random_suffix = Self::generate_random_suffix(4);
        format!("{}-{}-{}", prefix, timestamp_ms, random_suffix)
    }

    /// Generate a random hex suffix for entry IDs.
    fn generate_random_suffix(len: usize) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards")
            .as_nanos();
        format!("{:x}", now % (16_u128.pow(len as u32)))
            .chars()
            .take(len)
            .collect()
    }
}
