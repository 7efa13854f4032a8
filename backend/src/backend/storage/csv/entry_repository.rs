use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::DateTime;
use csv::{Reader, Writer};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};
use tracing::info;

use super::connection::CsvConnection;
use crate::backend::domain::models::entry::{Entry, EntryType};

/// CSV-based entry repository
///
/// The whole ledger lives in one `entries.csv` file that is read in full and
/// rewritten atomically on every mutation, the same serialized-list shape a
/// key-value store would hold.
#[derive(Clone)]
pub struct EntryRepository {
    connection: CsvConnection,
}

impl EntryRepository {
    /// Create a new CSV entry repository
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    /// Read all entries from the CSV file, oldest first
    fn read_entries(&self) -> Result<Vec<Entry>> {
        self.connection.ensure_entries_file_exists()?;

        let file_path = self.connection.entries_file_path();
        let file = File::open(&file_path)?;
        let reader = BufReader::new(file);
        let mut csv_reader = Reader::from_reader(reader);

        let mut entries = Vec::new();

        for result in csv_reader.records() {
            let record = result?;

            let id = record
                .get(0)
                .ok_or_else(|| anyhow!("Missing id column"))?
                .to_string();
            let date = record.get(1).ok_or_else(|| anyhow!("Missing date column"))?;
            let description = record
                .get(2)
                .ok_or_else(|| anyhow!("Missing description column"))?
                .to_string();
            let amount = record
                .get(3)
                .ok_or_else(|| anyhow!("Missing amount column"))?;
            let entry_type = record
                .get(4)
                .ok_or_else(|| anyhow!("Missing entry_type column"))?;

            let entry = Entry {
                date: DateTime::parse_from_rfc3339(date)
                    .with_context(|| format!("Invalid date for entry {}: {}", id, date))?,
                description,
                amount: amount
                    .parse::<f64>()
                    .with_context(|| format!("Invalid amount for entry {}: {}", id, amount))?,
                entry_type: EntryType::parse(entry_type)
                    .map_err(|e| anyhow!("Invalid entry {}: {}", id, e))?,
                id,
            };

            entries.push(entry);
        }

        Ok(entries)
    }

    /// Write all entries to the CSV file
    fn write_entries(&self, entries: &[Entry]) -> Result<()> {
        let file_path = self.connection.entries_file_path();

        // Create a temporary file for atomic write
        let temp_path = file_path.with_extension("tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;

            let writer = BufWriter::new(file);
            let mut csv_writer = Writer::from_writer(writer);

            // Write header
            csv_writer.write_record(["id", "date", "description", "amount", "entry_type"])?;

            // Write entries
            for entry in entries {
                let date = entry.date.to_rfc3339();
                let amount = entry.amount.to_string();
                csv_writer.write_record([
                    entry.id.as_str(),
                    date.as_str(),
                    entry.description.as_str(),
                    amount.as_str(),
                    entry.entry_type.as_str(),
                ])?;
            }

            csv_writer.flush()?;
        }

        // Atomic move from temp to final file
        std::fs::rename(&temp_path, &file_path)?;

        Ok(())
    }
}

#[async_trait]
impl crate::backend::storage::EntryStorage for EntryRepository {
    async fn store_entry(&self, entry: &Entry) -> Result<()> {
        info!("Storing entry in CSV: {}", entry.id);

        let mut entries = self.read_entries()?;
        entries.push(entry.clone());

        // Keep the file in chronological order
        entries.sort_by(|a, b| a.date.cmp(&b.date));

        self.write_entries(&entries)?;

        info!("Successfully stored entry: {}", entry.id);
        Ok(())
    }

    async fn get_entry(&self, entry_id: &str) -> Result<Option<Entry>> {
        let entries = self.read_entries()?;

        Ok(entries.into_iter().find(|e| e.id == entry_id))
    }

    async fn list_entries(&self) -> Result<Vec<Entry>> {
        let mut entries = self.read_entries()?;

        // Sort by date descending (most recent first)
        entries.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(entries)
    }

    async fn delete_entry(&self, entry_id: &str) -> Result<bool> {
        info!("Deleting entry from CSV: {}", entry_id);

        let mut entries = self.read_entries()?;
        let initial_len = entries.len();

        entries.retain(|e| e.id != entry_id);

        if entries.len() < initial_len {
            self.write_entries(&entries)?;
            info!("Successfully deleted entry: {}", entry_id);
            Ok(true)
        } else {
            info!("Entry not found for deletion: {}", entry_id);
            Ok(false)
        }
    }
}
