//! Accepting a parent's submission: validate, then admit at most one review
//! per (class, IP).

use crate::db::Database;
use crate::error::AppError;
use crate::models::review::{NewReview, Review};
use crate::validation::validate_review;
use chrono::{DateTime, Utc};
use leptos::logging::{log, warn};

/// Validates the form and admits the review with `now` as its submission
/// time. A repeat (class, IP) pair is logged and rejected with
/// `AppError::RateLimited`.
pub async fn submit(db: &Database, review: NewReview, now: DateTime<Utc>) -> Result<Review, AppError> {
    if let Err(errors) = validate_review(&review) {
        warn!("[ADMISSION] Rejected invalid form for class '{}': {:?}", review.class_name, errors);
        return Err(AppError::InvalidInput(format!("{:?}", errors)));
    }
    if review.ip_address.trim().is_empty() {
        return Err(AppError::InvalidInput("missing caller IP".to_string()));
    }

    match db.admit_review(&review, now).await {
        Ok(stored) => {
            log!("[ADMISSION] Accepted review {} for class {}", stored.id, stored.class_name);
            Ok(stored)
        }
        Err(AppError::RateLimited) => {
            warn!(
                "[ADMISSION] {} already reviewed class {}, attempt logged",
                review.ip_address,
                review.class_name
            );
            Err(AppError::RateLimited)
        }
        Err(e) => Err(e),
    }
}
