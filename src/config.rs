//! Runtime settings read from the environment. Site address and asset paths
//! come from the Leptos configuration in `Cargo.toml`.

use leptos::logging::{log, warn};
use std::{env, fmt::Display, str::FromStr};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: String,
    pub superadmin_username: String,
    pub superadmin_password: String,
    pub geo_endpoint: String,
    pub expected_country: String,
    pub utc_offset_hours: i32,
    pub trust_proxy_headers: bool,
}

/// Real-world UTC offsets span UTC-12 to UTC+14.
const UTC_OFFSET_RANGE: std::ops::RangeInclusive<i32> = -12..=14;

impl AppConfig {
    pub fn load() -> Self {
        let defaults = Self {
            db_path: "feedback.db".to_string(),
            ..Self::default()
        };
        let utc_offset_hours = try_load("FEEDBACK_UTC_OFFSET_HOURS", defaults.utc_offset_hours);
        Self {
            db_path: try_load("FEEDBACK_DB_PATH", defaults.db_path),
            superadmin_username: try_load("FEEDBACK_SUPERADMIN_USER", defaults.superadmin_username),
            superadmin_password: try_load("FEEDBACK_SUPERADMIN_PASSWORD", defaults.superadmin_password),
            geo_endpoint: try_load("FEEDBACK_GEO_ENDPOINT", defaults.geo_endpoint),
            expected_country: try_load("FEEDBACK_EXPECTED_COUNTRY", defaults.expected_country),
            utc_offset_hours: checked_offset(utc_offset_hours, defaults.utc_offset_hours),
            trust_proxy_headers: try_load("FEEDBACK_TRUST_PROXY_HEADERS", defaults.trust_proxy_headers),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: ":memory:".to_string(),
            superadmin_username: "superadmin".to_string(),
            superadmin_password: "changeme".to_string(),
            geo_endpoint: "https://ipwho.is".to_string(),
            expected_country: "VN".to_string(),
            utc_offset_hours: 7,
            trust_proxy_headers: false,
        }
    }
}

fn checked_offset(hours: i32, default: i32) -> i32 {
    if UTC_OFFSET_RANGE.contains(&hours) {
        hours
    } else {
        warn!("[CONFIG] UTC offset {hours} out of range, using {default}");
        default
    }
}

fn try_load<T: FromStr>(key: &str, default: T) -> T
where
    T::Err: Display,
{
    let Ok(raw) = env::var(key) else {
        log!("[CONFIG] {key} not set, using default");
        return default;
    };
    match raw.parse() {
        Ok(value) => value,
        Err(e) => {
            warn!("[CONFIG] Invalid {key} value ({e}), using default");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_variables_fall_back_to_defaults() {
        let offset: i32 = try_load("FEEDBACK_TEST_UNSET_OFFSET", 7);
        assert_eq!(offset, 7);
        let path = try_load("FEEDBACK_TEST_UNSET_PATH", "feedback.db".to_string());
        assert_eq!(path, "feedback.db");
    }

    #[test]
    fn unparsable_values_fall_back_to_defaults() {
        env::set_var("FEEDBACK_TEST_BAD_OFFSET", "seven");
        let offset: i32 = try_load("FEEDBACK_TEST_BAD_OFFSET", 7);
        assert_eq!(offset, 7);
        env::set_var("FEEDBACK_TEST_BAD_FLAG", "yes");
        assert!(!try_load("FEEDBACK_TEST_BAD_FLAG", false));
    }

    #[test]
    fn offsets_outside_real_time_zones_are_replaced() {
        assert_eq!(checked_offset(-5, 7), -5);
        assert_eq!(checked_offset(14, 7), 14);
        assert_eq!(checked_offset(i32::MAX, 7), 7);
        assert_eq!(checked_offset(-13, 7), 7);
    }
}
