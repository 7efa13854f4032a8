//! In-memory session registry.
//!
//! Tokens are opaque UUIDs handed out at login and passed back as bearer
//! tokens. Sessions live only as long as the process; there is no expiry.
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::backend::domain::models::user::{User, UserRole};

/// An authenticated session resolved from a bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub username: String,
    pub role: UserRole,
}

#[derive(Clone, Default)]
pub struct SessionService {
    sessions: Arc<Mutex<HashMap<String, Session>>>,
}

impl SessionService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session for the user and hand back its token.
    pub fn sign_in(&self, user: &User) -> String {
        let token = Uuid::new_v4().to_string();
        let session = Session {
            user_id: user.id.clone(),
            username: user.username.clone(),
            role: user.role,
        };
        self.sessions.lock().unwrap().insert(token.clone(), session);
        token
    }

    pub fn resolve(&self, token: &str) -> Option<Session> {
        self.sessions.lock().unwrap().get(token).cloned()
    }

    /// Drop a session. Returns false when the token was not active.
    pub fn sign_out(&self, token: &str) -> bool {
        self.sessions.lock().unwrap().remove(token).is_some()
    }
}
