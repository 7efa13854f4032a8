//! Entry service domain logic for the daily ledger.
use chrono::{DateTime, FixedOffset, NaiveDate};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use time::format_description::well_known::Rfc3339;
use tracing::info;

use crate::backend::domain::error::{DomainError, DomainResult};
use crate::backend::domain::ledger::{build_view, DateRange};
use crate::backend::domain::models::entry::Entry as DomainEntry;
use crate::backend::io::rest::mappers::entry_mapper::EntryMapper;
use crate::backend::storage::{Connection, EntryStorage};
use shared::{
    CreateEntryRequest, DeleteEntryResponse, Entry as SharedEntry, EntryListRequest,
    EntryListResponse, LedgerSummary,
};

#[derive(Clone)]
pub struct EntryService<C: Connection> {
    entry_repository: C::EntryRepository,
}

impl<C: Connection> EntryService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        let entry_repository = connection.create_entry_repository();
        Self { entry_repository }
    }

    /// Validate and persist a new entry. The entry is only reported back to
    /// the caller once the backend write has succeeded.
    pub async fn create_entry(&self, request: CreateEntryRequest) -> DomainResult<SharedEntry> {
        if request.description.is_empty() || request.description.len() > 256 {
            return Err(DomainError::Validation(
                "Description must be between 1 and 256 characters".to_string(),
            ));
        }

        if !request.amount.is_finite() || request.amount <= 0.0 {
            return Err(DomainError::Validation(
                "Amount must be greater than zero".to_string(),
            ));
        }

        let entry_type = EntryMapper::type_to_domain(request.entry_type);

        let entry_date = match request.date {
            Some(date) => date,
            None => current_timestamp()?,
        };

        let now_millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(anyhow::Error::from)?
            .as_millis() as u64;

        let domain_entry = DomainEntry {
            id: DomainEntry::generate_id(entry_type, now_millis),
            date: entry_date,
            description: request.description,
            amount: request.amount,
            entry_type,
        };

        self.entry_repository.store_entry(&domain_entry).await?;

        info!("Created entry {}", domain_entry.id);
        Ok(EntryMapper::to_dto(domain_entry))
    }

    /// List entries for an optional date range and type filter, together
    /// with the credit/debit totals for the range.
    pub async fn list_entries(&self, request: EntryListRequest) -> DomainResult<EntryListResponse> {
        let range = DateRange {
            start: parse_date_bound("start date", request.start_date.as_deref())?,
            end: parse_date_bound("end date", request.end_date.as_deref())?,
        };
        let type_filter = EntryMapper::filter_to_domain(request.entry_type);

        let entries = self.entry_repository.list_entries().await?;
        let view = build_view(entries, range, type_filter);

        Ok(EntryListResponse {
            summary: LedgerSummary {
                total_credit: view.totals.credit,
                total_debit: view.totals.debit,
                balance: view.totals.balance(),
            },
            entries: view.entries.into_iter().map(EntryMapper::to_dto).collect(),
        })
    }

    /// Delete an entry by id. A missing id is not an error for the caller.
    pub async fn delete_entry(&self, entry_id: &str) -> DomainResult<DeleteEntryResponse> {
        let deleted = self.entry_repository.delete_entry(entry_id).await?;

        let message = if deleted {
            "1 entry deleted successfully".to_string()
        } else {
            "No entries were deleted".to_string()
        };

        Ok(DeleteEntryResponse { deleted, message })
    }
}

/// Current time as a fixed-offset timestamp. Round-tripping through RFC 3339
/// keeps store-assigned timestamps at the same precision on every backend.
pub(crate) fn current_timestamp() -> Result<DateTime<FixedOffset>, anyhow::Error> {
    let now = time::OffsetDateTime::from(SystemTime::now());
    let formatted = now.format(&Rfc3339)?;
    Ok(DateTime::parse_from_rfc3339(&formatted)?)
}

/// Parse an optional `YYYY-MM-DD` bound; an empty string counts as unset.
fn parse_date_bound(label: &str, value: Option<&str>) -> DomainResult<Option<NaiveDate>> {
    match value {
        None => Ok(None),
        Some(raw) if raw.is_empty() => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| DomainError::Validation(format!("Invalid {}: {}", label, raw))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::DbConnection;
    use shared::{EntryType as SharedEntryType, EntryTypeFilter};

    async fn create_test_service() -> EntryService<DbConnection> {
        let connection = Arc::new(DbConnection::init_test().await.unwrap());
        EntryService::new(connection)
    }

    fn create_request(
        description: &str,
        amount: f64,
        entry_type: SharedEntryType,
        date: Option<&str>,
    ) -> CreateEntryRequest {
        CreateEntryRequest {
            description: description.to_string(),
            amount,
            entry_type,
            date: date.map(|d| DateTime::parse_from_rfc3339(d).unwrap()),
        }
    }

    #[tokio::test]
    async fn test_create_entry_basic() {
        let service = create_test_service().await;

        let entry = service
            .create_entry(create_request(
                "Salary",
                1200.0,
                SharedEntryType::Credit,
                None,
            ))
            .await
            .unwrap();

        assert!(entry.id.starts_with("cr-"));
        assert_eq!(entry.description, "Salary");
        assert_eq!(entry.amount, 1200.0);
        assert_eq!(entry.entry_type, SharedEntryType::Credit);
    }

    #[tokio::test]
    async fn test_create_entry_rejects_bad_input() {
        let service = create_test_service().await;

        let empty = service
            .create_entry(create_request("", 10.0, SharedEntryType::Debit, None))
            .await;
        assert!(matches!(empty, Err(DomainError::Validation(_))));

        let too_long = service
            .create_entry(create_request(
                &"x".repeat(300),
                10.0,
                SharedEntryType::Debit,
                None,
            ))
            .await;
        assert!(matches!(too_long, Err(DomainError::Validation(_))));

        let negative = service
            .create_entry(create_request("Rent", -40.0, SharedEntryType::Debit, None))
            .await;
        assert!(matches!(negative, Err(DomainError::Validation(_))));

        let zero = service
            .create_entry(create_request("Rent", 0.0, SharedEntryType::Debit, None))
            .await;
        assert!(matches!(zero, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn test_list_entries_filters_and_totals() {
        let service = create_test_service().await;

        service
            .create_entry(create_request(
                "Salary",
                100.0,
                SharedEntryType::Credit,
                Some("2024-03-01T09:00:00Z"),
            ))
            .await
            .unwrap();
        service
            .create_entry(create_request(
                "Groceries",
                40.0,
                SharedEntryType::Debit,
                Some("2024-03-01T17:30:00Z"),
            ))
            .await
            .unwrap();
        service
            .create_entry(create_request(
                "Cinema",
                15.0,
                SharedEntryType::Debit,
                Some("2024-04-02T20:00:00Z"),
            ))
            .await
            .unwrap();

        let response = service
            .list_entries(EntryListRequest {
                start_date: Some("2024-03-01".to_string()),
                end_date: Some("2024-03-31".to_string()),
                entry_type: Some(EntryTypeFilter::Credit),
            })
            .await
            .unwrap();

        // The type filter narrows the list but never the totals.
        assert_eq!(response.entries.len(), 1);
        assert_eq!(response.entries[0].description, "Salary");
        assert_eq!(response.summary.total_credit, 100.0);
        assert_eq!(response.summary.total_debit, 40.0);
        assert_eq!(response.summary.balance, 60.0);
    }

    #[tokio::test]
    async fn test_list_entries_rejects_malformed_dates() {
        let service = create_test_service().await;

        let result = service
            .list_entries(EntryListRequest {
                start_date: Some("01/03/2024".to_string()),
                end_date: None,
                entry_type: None,
            })
            .await;
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn test_list_entries_empty_bounds_are_unset() {
        let service = create_test_service().await;

        service
            .create_entry(create_request(
                "Salary",
                100.0,
                SharedEntryType::Credit,
                None,
            ))
            .await
            .unwrap();

        let response = service
            .list_entries(EntryListRequest {
                start_date: Some(String::new()),
                end_date: Some(String::new()),
                entry_type: None,
            })
            .await
            .unwrap();
        assert_eq!(response.entries.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_entry_is_noop_for_missing_id() {
        let service = create_test_service().await;

        let response = service.delete_entry("cr-0-dead").await.unwrap();
        assert!(!response.deleted);

        let entry = service
            .create_entry(create_request("Salary", 10.0, SharedEntryType::Credit, None))
            .await
            .unwrap();
        let response = service.delete_entry(&entry.id).await.unwrap();
        assert!(response.deleted);
    }
}
