#[cfg(feature = "ssr")]
use thiserror::Error;

/// Wire codes carried inside `ServerFnError::ServerError` so the browser can
/// tell the distinguished failures apart from generic ones.
pub const CODE_RATE_LIMITED: &str = "IP_LIMIT_REACHED";
pub const CODE_USERNAME_EXISTS: &str = "USERNAME_EXISTS";
pub const CODE_INVALID_INPUT: &str = "INVALID_INPUT";
pub const CODE_UNAUTHORIZED: &str = "UNAUTHORIZED";
pub const CODE_FORBIDDEN: &str = "FORBIDDEN";
pub const CODE_NOT_FOUND: &str = "NOT_FOUND";
pub const CODE_INTERNAL: &str = "INTERNAL";

#[cfg(feature = "ssr")]
#[derive(Error, Debug)]
pub enum AppError {
    #[error("a review for this class was already submitted from this IP")]
    RateLimited,

    #[error("username already exists")]
    UsernameExists,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("login required")]
    Unauthorized,

    #[error("not allowed for this role")]
    Forbidden,

    #[error("record not found: {0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("geolocation lookup failed: {0}")]
    Geolocation(String),
}

#[cfg(feature = "ssr")]
impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::RateLimited => CODE_RATE_LIMITED,
            AppError::UsernameExists => CODE_USERNAME_EXISTS,
            AppError::InvalidInput(_) => CODE_INVALID_INPUT,
            AppError::Unauthorized => CODE_UNAUTHORIZED,
            AppError::Forbidden => CODE_FORBIDDEN,
            AppError::NotFound(_) => CODE_NOT_FOUND,
            AppError::Database(_) => CODE_INTERNAL,
            AppError::Geolocation(_) => CODE_INTERNAL,
        }
    }

    /// Logs the failure and reduces it to its wire code. Internal details stay
    /// in the server log.
    pub fn into_server_error(self) -> leptos::ServerFnError {
        leptos::logging::error!("[API] {}", self);
        leptos::ServerFnError::ServerError(self.code().to_string())
    }
}

/// Recovers the wire code from a server function failure, if it carries one.
pub fn error_code(err: &leptos::ServerFnError) -> Option<&str> {
    match err {
        leptos::ServerFnError::ServerError(code) => Some(code.as_str()),
        _ => None,
    }
}

/// Maps a server function failure to the message shown in the UI.
pub fn user_message(err: &leptos::ServerFnError) -> &'static str {
    match error_code(err) {
        Some(CODE_RATE_LIMITED) => crate::locale::ERR_IP_LIMIT,
        Some(CODE_USERNAME_EXISTS) => crate::locale::ERR_USERNAME_EXISTS,
        Some(CODE_FORBIDDEN) | Some(CODE_UNAUTHORIZED) => crate::locale::ERR_FORBIDDEN,
        _ => crate::locale::ERR_API,
    }
}
