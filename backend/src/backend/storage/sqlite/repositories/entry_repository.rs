use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::DateTime;
use sqlx::{sqlite::SqliteRow, Row};

use crate::backend::domain::models::entry::{Entry, EntryType};
use crate::backend::storage::sqlite::db::DbConnection;

/// Repository for entry operations
#[derive(Clone)]
pub struct EntryRepository {
    db: DbConnection,
}

impl EntryRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_entry(row: &SqliteRow) -> Result<Entry> {
        let id: String = row.get("id");
        let date: String = row.get("date");
        let entry_type: String = row.get("entry_type");

        Ok(Entry {
            date: DateTime::parse_from_rfc3339(&date)
                .with_context(|| format!("Invalid date for entry {}: {}", id, date))?,
            description: row.get("description"),
            amount: row.get("amount"),
            entry_type: EntryType::parse(&entry_type)
                .map_err(|e| anyhow!("Invalid entry {}: {}", id, e))?,
            id,
        })
    }
}

#[async_trait]
impl crate::backend::storage::EntryStorage for EntryRepository {
    async fn store_entry(&self, entry: &Entry) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO entries (id, date, description, amount, entry_type)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&entry.id)
        .bind(entry.date.to_rfc3339())
        .bind(&entry.description)
        .bind(entry.amount)
        .bind(entry.entry_type.as_str())
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_entry(&self, entry_id: &str) -> Result<Option<Entry>> {
        let row = sqlx::query(
            r#"
            SELECT id, date, description, amount, entry_type
            FROM entries
            WHERE id = ?
            "#,
        )
        .bind(entry_id)
        .fetch_optional(self.db.pool())
        .await?;

        match row {
            Some(r) => Ok(Some(Self::row_to_entry(&r)?)),
            None => Ok(None),
        }
    }

    async fn list_entries(&self) -> Result<Vec<Entry>> {
        let rows = sqlx::query(
            r#"
            SELECT id, date, description, amount, entry_type
            FROM entries
            ORDER BY date DESC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::row_to_entry).collect()
    }

    async fn delete_entry(&self, entry_id: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM entries WHERE id = ?
            "#,
        )
        .bind(entry_id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
