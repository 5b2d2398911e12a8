//! Listing, filtering and tallying of reviews for the admin dashboard.

use crate::models::review::{RatingLevel, Review};
use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

pub const ALL_CLASSES_QUERY: &str = "all";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub enum ClassFilter {
    #[default]
    All,
    Class(String),
}

impl ClassFilter {
    /// `"all"` (or nothing) selects every class, anything else is an exact class name.
    pub fn from_query(value: &str) -> Self {
        if value.is_empty() || value == ALL_CLASSES_QUERY {
            ClassFilter::All
        } else {
            ClassFilter::Class(value.to_string())
        }
    }

    pub fn as_query(&self) -> &str {
        match self {
            ClassFilter::All => ALL_CLASSES_QUERY,
            ClassFilter::Class(name) => name,
        }
    }

    pub fn matches(&self, review: &Review) -> bool {
        match self {
            ClassFilter::All => true,
            ClassFilter::Class(name) => review.class_name == *name,
        }
    }
}

/// Newest first, then restricted to the selected class.
pub fn filter_reviews(reviews: &[Review], filter: &ClassFilter) -> Vec<Review> {
    let mut sorted: Vec<Review> = reviews.iter().filter(|r| filter.matches(r)).cloned().collect();
    sorted.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
    sorted
}

/// Classes present in the data set, alphabetically.
pub fn distinct_classes(reviews: &[Review]) -> Vec<String> {
    reviews
        .iter()
        .map(|r| r.class_name.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemTally {
    pub satisfied: u32,
    pub unsatisfied: u32,
}

impl ItemTally {
    pub fn total(&self) -> u32 {
        self.satisfied + self.unsatisfied
    }

    pub fn record(&mut self, level: RatingLevel) {
        match level {
            RatingLevel::Satisfied => self.satisfied += 1,
            RatingLevel::Unsatisfied => self.unsatisfied += 1,
        }
    }
}

/// Satisfied/unsatisfied counts per rating item, items in order of first appearance.
pub fn tally(reviews: &[Review]) -> Vec<(String, ItemTally)> {
    let mut order: Vec<(String, ItemTally)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for review in reviews {
        for (item, level) in &review.ratings {
            let slot = *index.entry(item.clone()).or_insert_with(|| {
                order.push((item.clone(), ItemTally::default()));
                order.len() - 1
            });
            order[slot].1.record(*level);
        }
    }
    order
}

/// One summary per class, classes sorted, for the all-classes overview.
pub fn tally_by_class(reviews: &[Review]) -> Vec<(String, Vec<(String, ItemTally)>)> {
    distinct_classes(reviews)
        .into_iter()
        .map(|class_name| {
            let class_reviews: Vec<Review> = reviews
                .iter()
                .filter(|r| r.class_name == class_name)
                .cloned()
                .collect();
            let tallies = tally(&class_reviews);
            (class_name, tallies)
        })
        .collect()
}

/// Whole-number percentage, 0 when there is nothing to divide.
pub fn percent(part: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    ((part as f64 / total as f64) * 100.0).round() as u32
}

/// Renders a UTC instant in the school's local time.
pub fn format_local(instant: &DateTime<Utc>, utc_offset_hours: i32) -> String {
    let offset = utc_offset_hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| Utc.fix());
    instant.with_timezone(&offset).format("%d/%m/%Y %H:%M").to_string()
}
