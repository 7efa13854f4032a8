use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Entry ID in format: "<cr|db>-<epoch_millis>-<hex suffix>"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    /// Creation timestamp with timezone (RFC 3339)
    pub date: DateTime<FixedOffset>,
    /// Description of the entry (max 256 characters)
    pub description: String,
    /// Entry amount, always positive; the direction lives in `entry_type`
    pub amount: f64,
    /// Whether this entry is income (credit) or an expense (debit)
    pub entry_type: EntryType,
}

/// Income/expense classification of an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Money coming in
    Credit,
    /// Money going out
    Debit,
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryType::Credit => write!(f, "credit"),
            EntryType::Debit => write!(f, "debit"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEntryRequest {
    /// Description of the entry (max 256 characters)
    pub description: String,
    /// Entry amount, must be greater than zero
    pub amount: f64,
    pub entry_type: EntryType,
    /// Optional date override (RFC 3339) - uses current time if not provided
    pub date: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryListRequest {
    /// Inclusive start of the date range (YYYY-MM-DD)
    pub start_date: Option<String>,
    /// Inclusive end of the date range (YYYY-MM-DD)
    pub end_date: Option<String>,
    /// Restrict the listed entries to one type; totals ignore this
    pub entry_type: Option<EntryTypeFilter>,
}

/// Type filter for entry listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryTypeFilter {
    All,
    Credit,
    Debit,
}

/// Credit/debit totals for the selected date range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub total_credit: f64,
    pub total_debit: f64,
    /// total_credit - total_debit
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryListResponse {
    /// Entries matching the date range and type filter, newest first
    pub entries: Vec<Entry>,
    /// Totals over the date range only; the type filter does not change these
    pub summary: LedgerSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteEntryResponse {
    /// False when the id was not present; the request still succeeds
    pub deleted: bool,
    pub message: String,
}

/// System role of a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Admin => write!(f, "admin"),
            UserRole::User => write!(f, "user"),
        }
    }
}

/// Public view of a user account; credentials never appear here
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub role: UserRole,
    pub created_at: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Opaque session token, passed back as a bearer token
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub display_name: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserListResponse {
    pub users: Vec<User>,
}

/// Error body returned with any non-success status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}
