// src/models/review.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Binary satisfaction level given to one rating item.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RatingLevel {
    Satisfied,
    Unsatisfied,
}

impl RatingLevel {
    /// Localized label shown on cards and in exported sheets.
    pub fn label(&self) -> &'static str {
        match self {
            RatingLevel::Satisfied => crate::locale::SATISFIED,
            RatingLevel::Unsatisfied => crate::locale::UNSATISFIED,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Review {
    pub id: String,                              // uuid assigned on insert
    pub class_name: String,                      // class the parent reviewed
    pub ratings: BTreeMap<String, RatingLevel>,  // rating item label -> level
    pub comment: String,                         // free-text comment
    pub submitted_at: DateTime<Utc>,             // server-assigned
    pub ip_address: String,                      // submitting connection
}

/// What a parent sends from the form; the server fills in id and timestamp.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct NewReview {
    pub class_name: String,
    pub ratings: BTreeMap<String, RatingLevel>,
    pub comment: String,
    pub ip_address: String,
}
