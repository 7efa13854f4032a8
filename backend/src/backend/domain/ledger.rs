//! Date-range filtering and credit/debit aggregation over ledger entries.
//!
//! This is the one piece of the application with real semantics, so it lives
//! in a pure module the services call into: given the full entry list, an
//! optional day-precision date range and a type filter, produce the visible
//! list (newest first) and the credit/debit totals for the range.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

use super::models::entry::{Entry, EntryType};

/// Inclusive date range at day precision. Missing endpoints are unbounded.
///
/// The start counts from 00:00:00.000 of its day and the end up to
/// 23:59:59.999 of its day; entry timestamps are truncated to the start of
/// their day before comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn contains(&self, date: &DateTime<FixedOffset>) -> bool {
        let day: NaiveDateTime = date
            .naive_local()
            .date()
            .and_hms_opt(0, 0, 0)
            .expect("midnight is always a valid time");

        if let Some(start) = self.start {
            let lower = start
                .and_hms_opt(0, 0, 0)
                .expect("midnight is always a valid time");
            if day < lower {
                return false;
            }
        }

        if let Some(end) = self.end {
            let upper = end
                .and_hms_milli_opt(23, 59, 59, 999)
                .expect("end of day is always a valid time");
            if day > upper {
                return false;
            }
        }

        true
    }
}

/// Type filter applied to the visible list only; totals never see it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypeFilter {
    #[default]
    All,
    Credit,
    Debit,
}

impl TypeFilter {
    fn matches(&self, entry_type: EntryType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Credit => entry_type == EntryType::Credit,
            TypeFilter::Debit => entry_type == EntryType::Debit,
        }
    }
}

/// Credit/debit sums over the entries matching the date range.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub credit: f64,
    pub debit: f64,
}

impl Totals {
    pub fn balance(&self) -> f64 {
        self.credit - self.debit
    }
}

/// Result of one filtering pass: the visible entries plus the range totals.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerView {
    /// Entries matching both the date range and the type filter, newest
    /// first. Entries sharing a timestamp keep their incoming order.
    pub entries: Vec<Entry>,
    pub totals: Totals,
}

/// Filter and aggregate the given entries.
///
/// The totals are computed over the date-filtered set before the type filter
/// is applied, so switching the type filter never changes the summary.
pub fn build_view(entries: Vec<Entry>, range: DateRange, type_filter: TypeFilter) -> LedgerView {
    let mut in_range: Vec<Entry> = entries
        .into_iter()
        .filter(|entry| range.contains(&entry.date))
        .collect();

    let mut totals = Totals::default();
    for entry in &in_range {
        match entry.entry_type {
            EntryType::Credit => totals.credit += entry.amount,
            EntryType::Debit => totals.debit += entry.amount,
        }
    }

    in_range.retain(|entry| type_filter.matches(entry.entry_type));
    // Stable sort: same-timestamp entries keep the store's relative order.
    in_range.sort_by(|a, b| b.date.cmp(&a.date));

    LedgerView {
        entries: in_range,
        totals,
    }
}
