use anyhow::{Context, Result};
use async_trait::async_trait;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use super::connection::CsvConnection;
use crate::backend::domain::models::user::User;

/// File-based user repository using filesystem discovery
///
/// Each account is one YAML document under `users/`, named after a
/// filesystem-safe rendering of the username.
#[derive(Clone)]
pub struct UserRepository {
    connection: CsvConnection,
}

impl UserRepository {
    /// Create a new file-based user repository
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    /// Generate a safe filesystem identifier from a username
    /// Converts "John Doe" -> "john_doe", "José" -> "jos", etc.
    pub fn generate_safe_file_name(username: &str) -> String {
        username
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_lowercase()
                } else {
                    '_'
                }
            })
            .collect::<String>()
            .trim_matches('_')
            .to_string()
    }

    /// Get the path to a user's YAML document
    fn user_file_path(&self, username: &str) -> PathBuf {
        let file_name = format!("{}.yaml", Self::generate_safe_file_name(username));
        self.connection.users_directory().join(file_name)
    }

    /// Discover all users by scanning the users directory
    fn discover_users(&self) -> Result<Vec<User>> {
        let users_dir = self.connection.users_directory();

        if !users_dir.exists() {
            debug!("Users directory doesn't exist, returning empty user list");
            return Ok(Vec::new());
        }

        let mut users = Vec::new();

        for dir_entry in fs::read_dir(&users_dir)? {
            let path = dir_entry?.path();

            if path.extension().and_then(|e| e.to_str()) != Some("yaml") {
                continue;
            }

            match self.load_user_from_file(&path) {
                Ok(user) => users.push(user),
                Err(e) => {
                    warn!("Skipping unreadable user file {:?}: {}", path, e);
                }
            }
        }

        // Sort users by username for consistent ordering
        users.sort_by(|a, b| a.username.cmp(&b.username));

        debug!("Discovered {} users", users.len());
        Ok(users)
    }

    /// Load a user from a specific YAML document
    fn load_user_from_file(&self, path: &PathBuf) -> Result<User> {
        let yaml_content = fs::read_to_string(path)?;
        let user: User = serde_yaml::from_str(&yaml_content)
            .with_context(|| format!("Invalid user document: {:?}", path))?;
        Ok(user)
    }

    /// Save a user document, atomically
    fn save_user_to_file(&self, user: &User) -> Result<()> {
        self.connection.ensure_users_directory_exists()?;

        let yaml_path = self.user_file_path(&user.username);
        let yaml_content = serde_yaml::to_string(user)?;

        // Atomic write using temp file
        let temp_path = yaml_path.with_extension("tmp");
        fs::write(&temp_path, yaml_content)?;
        fs::rename(&temp_path, &yaml_path)?;

        info!("Saved user '{}' to {:?}", user.username, yaml_path);
        Ok(())
    }
}

#[async_trait]
impl crate::backend::storage::UserStorage for UserRepository {
    async fn store_user(&self, user: &User) -> Result<()> {
        self.save_user_to_file(user)
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        let users = self.discover_users()?;

        Ok(users.into_iter().find(|u| u.id == user_id))
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        // The safe file name is lossy, so match on the stored username
        let users = self.discover_users()?;

        Ok(users.into_iter().find(|u| u.username == username))
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        self.discover_users()
    }
}
