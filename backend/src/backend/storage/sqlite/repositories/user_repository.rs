use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::DateTime;
use sqlx::{sqlite::SqliteRow, Row};

use crate::backend::domain::models::user::{User, UserRole};
use crate::backend::storage::sqlite::db::DbConnection;

/// Repository for user account operations
#[derive(Clone)]
pub struct UserRepository {
    db: DbConnection,
}

impl UserRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_user(row: &SqliteRow) -> Result<User> {
        let id: String = row.get("id");
        let role: String = row.get("role");
        let created_at: String = row.get("created_at");

        Ok(User {
            username: row.get("username"),
            display_name: row.get("display_name"),
            role: UserRole::parse(&role).map_err(|e| anyhow!("Invalid user {}: {}", id, e))?,
            password_hash: row.get("password_hash"),
            password_salt: row.get("password_salt"),
            created_at: DateTime::parse_from_rfc3339(&created_at)
                .with_context(|| format!("Invalid created_at for user {}: {}", id, created_at))?,
            id,
        })
    }
}

#[async_trait]
impl crate::backend::storage::UserStorage for UserRepository {
    async fn store_user(&self, user: &User) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, display_name, role, password_hash, password_salt, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.display_name)
        .bind(user.role.as_str())
        .bind(&user.password_hash)
        .bind(&user.password_salt)
        .bind(user.created_at.to_rfc3339())
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, username, display_name, role, password_hash, password_salt, created_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.db.pool())
        .await?;

        match row {
            Some(r) => Ok(Some(Self::row_to_user(&r)?)),
            None => Ok(None),
        }
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, username, display_name, role, password_hash, password_salt, created_at
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(self.db.pool())
        .await?;

        match row {
            Some(r) => Ok(Some(Self::row_to_user(&r)?)),
            None => Ok(None),
        }
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let rows = sqlx::query(
            r#"
            SELECT id, username, display_name, role, password_hash, password_salt, created_at
            FROM users
            ORDER BY username ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::row_to_user).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::UserStorage;

    fn test_user(id: &str, username: &str, role: UserRole) -> User {
        let salt = format!("salt-{}", id);
        User {
            id: id.to_string(),
            username: username.to_string(),
            display_name: username.to_uppercase(),
            role,
            password_hash: User::hash_password(&salt, "secret"),
            password_salt: salt,
            created_at: DateTime::parse_from_rfc3339("2024-01-15T10:30:00Z").unwrap(),
        }
    }

    #[tokio::test]
    async fn test_store_and_find_user() {
        let db = DbConnection::init_test().await.unwrap();
        let repo = UserRepository::new(db);

        let user = test_user("u_001", "johndoe", UserRole::Admin);
        repo.store_user(&user).await.unwrap();

        let found = repo.find_user_by_username("johndoe").await.unwrap().unwrap();
        assert_eq!(found.id, "u_001");
        assert_eq!(found.role, UserRole::Admin);
        assert!(found.verify_password("secret"));

        assert!(repo.find_user_by_username("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_is_rejected_by_schema() {
        let db = DbConnection::init_test().await.unwrap();
        let repo = UserRepository::new(db);

        repo.store_user(&test_user("u_001", "johndoe", UserRole::User))
            .await
            .unwrap();
        let duplicate = repo
            .store_user(&test_user("u_002", "johndoe", UserRole::User))
            .await;
        assert!(duplicate.is_err());
    }

    #[tokio::test]
    async fn test_list_users_ordered_by_username() {
        let db = DbConnection::init_test().await.unwrap();
        let repo = UserRepository::new(db);

        repo.store_user(&test_user("u_002", "zoe", UserRole::User))
            .await
            .unwrap();
        repo.store_user(&test_user("u_001", "amy", UserRole::User))
            .await
            .unwrap();

        let users = repo.list_users().await.unwrap();
        assert_eq!(users[0].username, "amy");
        assert_eq!(users[1].username, "zoe");
    }
}
