use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::info;

use crate::backend::storage::csv::entry_repository::EntryRepository;
use crate::backend::storage::csv::user_repository::UserRepository;
use crate::backend::storage::traits::Connection;

/// CsvConnection manages the data directory holding the entries file and the
/// per-user YAML documents.
#[derive(Clone)]
pub struct CsvConnection {
    base_directory: Arc<Mutex<PathBuf>>,
}

impl CsvConnection {
    /// Create a new CSV connection with a base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }

        Ok(Self {
            base_directory: Arc::new(Mutex::new(base_path)),
        })
    }

    /// Create a new CSV connection in the default data directory
    /// (`~/Documents/Daily Ledger`).
    pub fn new_default() -> Result<Self> {
        let documents_dir = dirs::document_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join("Documents")))
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;

        let data_dir = documents_dir.join("Daily Ledger");
        info!("Using data directory: {}", data_dir.display());
        Self::new(data_dir)
    }

    /// Get the base data directory
    pub fn base_directory(&self) -> PathBuf {
        self.base_directory.lock().unwrap().clone()
    }

    /// Get the file path for the ledger entries
    pub fn entries_file_path(&self) -> PathBuf {
        self.base_directory().join("entries.csv")
    }

    /// Get the directory holding one YAML document per user
    pub fn users_directory(&self) -> PathBuf {
        self.base_directory().join("users")
    }

    /// Ensure the entries CSV file exists with its header row
    pub fn ensure_entries_file_exists(&self) -> Result<()> {
        let file_path = self.entries_file_path();

        if !file_path.exists() {
            let header = "id,date,description,amount,entry_type\n";
            fs::write(&file_path, header)?;
        }

        Ok(())
    }

    /// Ensure the users directory exists
    pub fn ensure_users_directory_exists(&self) -> Result<()> {
        let users_dir = self.users_directory();

        if !users_dir.exists() {
            fs::create_dir_all(&users_dir)?;
        }

        Ok(())
    }
}

impl Connection for CsvConnection {
    type EntryRepository = EntryRepository;
    type UserRepository = UserRepository;

    fn create_entry_repository(&self) -> Self::EntryRepository {
        EntryRepository::new(self.clone())
    }

    fn create_user_repository(&self) -> Self::UserRepository {
        UserRepository::new(self.clone())
    }
}
