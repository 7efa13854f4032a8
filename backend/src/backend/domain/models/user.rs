//! Domain model for a user account.
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    Admin,
    User,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::User => "user",
        }
    }

    pub fn parse(value: &str) -> Result<Self, String> {
        match value {
            "admin" => Ok(UserRole::Admin),
            "user" => Ok(UserRole::User),
            other => Err(format!("Unknown user role: {}", other)),
        }
    }
}

/// A stored account. Passwords are kept as a salted SHA-256 digest and
/// never leave the storage/domain layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub role: UserRole,
    pub password_hash: String,
    pub password_salt: String,
    pub created_at: DateTime<FixedOffset>,
}

impl User {
    /// Digest a password with the given salt.
    pub fn hash_password(salt: &str, password: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(salt.as_bytes());
        hasher.update(password.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Check a candidate password against the stored digest.
    pub fn verify_password(&self, password: &str) -> bool {
        Self::hash_password(&self.password_salt, password) == self.password_hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn sample_user(password: &str) -> User {
        let salt = "fixed-salt";
        User {
            id: "user_001".to_string(),
            username: "johndoe".to_string(),
            display_name: "John Doe".to_string(),
            role: UserRole::User,
            password_hash: User::hash_password(salt, password),
            password_salt: salt.to_string(),
            created_at: DateTime::parse_from_rfc3339("2024-01-15T10:30:00Z").unwrap(),
        }
    }

    #[test]
    fn test_verify_password() {
        let user = sample_user("hunter2");
        assert!(user.verify_password("hunter2"));
        assert!(!user.verify_password("hunter3"));
        assert!(!user.verify_password(""));
    }

    #[test]
    fn test_hash_depends_on_salt() {
        let a = User::hash_password("salt-a", "hunter2");
        let b = User::hash_password("salt-b", "hunter2");
        assert_ne!(a, b);
    }
}
