// src/models/ip_log.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A blocked duplicate submission attempt.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct IpLog {
    pub id: String,
    pub ip_address: String,
    pub class_name: String,
    pub timestamp: DateTime<Utc>,
}
