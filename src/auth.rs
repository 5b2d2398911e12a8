//! Admin login and cookie sessions. The super-admin credential comes from
//! configuration and is never stored; secondary admins live in `users` with
//! plain-text passwords.

use crate::config::AppConfig;
use crate::db::Database;
use crate::error::AppError;
use crate::models::account::{AdminSession, Role};
use leptos::logging::log;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "feedback_session";
pub const SUPERADMIN_ID: &str = "superadmin";

/// What an operation requires of the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Any logged-in admin.
    Admin,
    /// Only the configured super-admin.
    SuperAdmin,
    /// Secondary admins only (the super-admin has no stored password).
    SecondaryAdmin,
}

pub fn authorize(session: Option<AdminSession>, access: Access) -> Result<AdminSession, AppError> {
    let session = session.ok_or(AppError::Unauthorized)?;
    let allowed = match access {
        Access::Admin => true,
        Access::SuperAdmin => session.role == Role::SuperAdmin,
        Access::SecondaryAdmin => session.role == Role::Admin,
    };
    if allowed {
        Ok(session)
    } else {
        Err(AppError::Forbidden)
    }
}

/// Checks the configured super-admin first, then the `users` table.
pub async fn authenticate(
    db: &Database,
    config: &AppConfig,
    username: &str,
    password: &str,
) -> Result<Option<AdminSession>, AppError> {
    if username == config.superadmin_username && password == config.superadmin_password {
        log!("[AUTH] Super-admin login");
        return Ok(Some(AdminSession {
            id: SUPERADMIN_ID.to_string(),
            username: config.superadmin_username.clone(),
            role: Role::SuperAdmin,
        }));
    }

    let account = db.find_admin(username, password).await?;
    match &account {
        Some(account) => log!("[AUTH] Admin login: {}", account.username),
        None => log!("[AUTH] Failed login for '{}'", username),
    }
    Ok(account.as_ref().map(AdminSession::from))
}

#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<String, AdminSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the token for the new session.
    pub async fn create(&self, session: AdminSession) -> String {
        let token = Uuid::new_v4().to_string();
        self.sessions.lock().await.insert(token.clone(), session);
        token
    }

    pub async fn get(&self, token: &str) -> Option<AdminSession> {
        self.sessions.lock().await.get(token).cloned()
    }

    pub async fn remove(&self, token: &str) -> Option<AdminSession> {
        self.sessions.lock().await.remove(token)
    }

    /// Drops every session of an account, e.g. after it was deleted.
    pub async fn revoke_user(&self, user_id: &str) -> usize {
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.id != user_id);
        before - sessions.len()
    }
}
