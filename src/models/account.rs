// src/models/account.rs
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    SuperAdmin,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "superadmin",
            Role::Admin => "admin",
        }
    }

    pub fn parse(value: &str) -> Option<Role> {
        match value {
            "superadmin" => Some(Role::SuperAdmin),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// A row of the `users` table. Passwords are kept as plain text.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminAccount {
    pub id: String,
    pub username: String,
    pub password: String,
    pub role: Role,
}

/// The logged-in identity handed to the browser.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AdminSession {
    pub id: String,
    pub username: String,
    pub role: Role,
}

impl AdminSession {
    pub fn is_superadmin(&self) -> bool {
        self.role == Role::SuperAdmin
    }
}

impl From<&AdminAccount> for AdminSession {
    fn from(account: &AdminAccount) -> Self {
        AdminSession {
            id: account.id.clone(),
            username: account.username.clone(),
            role: account.role,
        }
    }
}

/// Listing entry for the user management panel.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AdminSummary {
    pub id: String,
    pub username: String,
    pub role: Role,
}
