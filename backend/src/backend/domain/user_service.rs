//! Account management and credential checks.
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::backend::domain::entry_service::current_timestamp;
use crate::backend::domain::error::{DomainError, DomainResult};
use crate::backend::domain::models::user::{User as DomainUser, UserRole};
use crate::backend::io::rest::mappers::user_mapper::UserMapper;
use crate::backend::storage::{Connection, UserStorage};
use shared::{CreateUserRequest, User as SharedUser};

#[derive(Clone)]
pub struct UserService<C: Connection> {
    user_repository: C::UserRepository,
}

impl<C: Connection> UserService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        let user_repository = connection.create_user_repository();
        Self { user_repository }
    }

    /// Make sure a fresh install has an administrator to log in with.
    pub async fn ensure_bootstrap_admin(&self, password: &str) -> DomainResult<()> {
        if !self.user_repository.list_users().await?.is_empty() {
            return Ok(());
        }

        warn!("No accounts found; creating the default 'admin' account. Change its password.");
        self.insert_user("admin", password, "Administrator", UserRole::Admin)
            .await?;
        Ok(())
    }

    /// Create a new account. Callers gate this behind the admin role.
    pub async fn create_user(&self, request: CreateUserRequest) -> DomainResult<SharedUser> {
        let username = request.username.trim();
        if username.is_empty() {
            return Err(DomainError::Validation(
                "Username must not be empty".to_string(),
            ));
        }
        if request.password.is_empty() {
            return Err(DomainError::Validation(
                "Password must not be empty".to_string(),
            ));
        }
        if request.display_name.trim().is_empty() {
            return Err(DomainError::Validation(
                "Display name must not be empty".to_string(),
            ));
        }

        // Check if username already exists
        if self
            .user_repository
            .find_user_by_username(username)
            .await?
            .is_some()
        {
            return Err(DomainError::Conflict("Username already exists.".to_string()));
        }

        let user = self
            .insert_user(
                username,
                &request.password,
                request.display_name.trim(),
                UserMapper::role_to_domain(request.role),
            )
            .await?;

        Ok(UserMapper::to_dto(user))
    }

    /// Verify credentials. Unknown usernames and wrong passwords are not
    /// distinguished for the caller.
    pub async fn authenticate(&self, username: &str, password: &str) -> DomainResult<DomainUser> {
        let user = self
            .user_repository
            .find_user_by_username(username)
            .await?
            .ok_or(DomainError::InvalidCredentials)?;

        if !user.verify_password(password) {
            return Err(DomainError::InvalidCredentials);
        }

        Ok(user)
    }

    pub async fn get_user(&self, user_id: &str) -> DomainResult<Option<DomainUser>> {
        Ok(self.user_repository.get_user(user_id).await?)
    }

    pub async fn list_users(&self) -> DomainResult<Vec<SharedUser>> {
        let users = self.user_repository.list_users().await?;
        Ok(users.into_iter().map(UserMapper::to_dto).collect())
    }

    async fn insert_user(
        &self,
        username: &str,
        password: &str,
        display_name: &str,
        role: UserRole,
    ) -> DomainResult<DomainUser> {
        let salt = Uuid::new_v4().to_string();
        let user = DomainUser {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            display_name: display_name.to_string(),
            role,
            password_hash: DomainUser::hash_password(&salt, password),
            password_salt: salt,
            created_at: current_timestamp()?,
        };

        self.user_repository.store_user(&user).await?;

        info!("Created {} account '{}'", role.as_str(), username);
        Ok(user)
    }
}
