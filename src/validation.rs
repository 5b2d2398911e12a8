//! Form checks shared by the browser and the server functions.

use crate::catalog;
use crate::locale;
use crate::models::review::NewReview;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Per-field messages for the feedback form. Empty means the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub class: Option<&'static str>,
    pub rating: Option<&'static str>,
    pub comment: Option<&'static str>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.class.is_none() && self.rating.is_none() && self.comment.is_none()
    }
}

pub fn validate_review(review: &NewReview) -> Result<(), FormErrors> {
    let mut errors = FormErrors::default();

    if review.class_name.is_empty() {
        errors.class = Some(locale::ERR_CLASS_MISSING);
    } else if catalog::teachers_of(&review.class_name).is_none() {
        errors.class = Some(locale::ERR_CLASS_UNKNOWN);
    }

    let items = catalog::rating_items(&review.class_name);
    let incomplete = review.ratings.len() != items.len()
        || items.iter().any(|item| !review.ratings.contains_key(item));
    if !items.is_empty() && incomplete {
        errors.rating = Some(locale::ERR_RATING_MISSING);
    }

    if review.comment.trim().is_empty() {
        errors.comment = Some(locale::ERR_COMMENT_MISSING);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Returns the trimmed username to store. `reserved` is the configured
/// super-admin name, which cannot be taken by a stored account.
pub fn validate_new_admin<'a>(
    username: &'a str,
    password: &str,
    reserved: &str,
) -> Result<&'a str, &'static str> {
    let username = username.trim();
    if username.is_empty() || password.trim().is_empty() {
        return Err(locale::ERR_CREDENTIALS_BLANK);
    }
    if username == reserved.trim() {
        return Err(locale::ERR_USERNAME_EXISTS);
    }
    Ok(username)
}

pub fn validate_password_change(new_password: &str, confirmation: &str) -> Result<(), &'static str> {
    if new_password != confirmation {
        return Err(locale::ERR_PASSWORDS_DIFFER);
    }
    if new_password.chars().count() < MIN_PASSWORD_LEN {
        return Err(locale::ERR_PASSWORD_TOO_SHORT);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::review::RatingLevel;

    fn complete_review(class_name: &str) -> NewReview {
        NewReview {
            class_name: class_name.to_string(),
            ratings: catalog::rating_items(class_name)
                .into_iter()
                .map(|item| (item, RatingLevel::Satisfied))
                .collect(),
            comment: "Các cô rất tận tâm".to_string(),
            ip_address: "203.0.113.7".to_string(),
        }
    }

    #[test]
    fn complete_form_passes() {
        assert_eq!(validate_review(&complete_review("Lá 1")), Ok(()));
    }

    #[test]
    fn every_problem_is_reported_at_once() {
        let errors = validate_review(&NewReview::default()).unwrap_err();
        assert_eq!(errors.class, Some(locale::ERR_CLASS_MISSING));
        assert_eq!(errors.comment, Some(locale::ERR_COMMENT_MISSING));
        // no class selected means there are no items to rate yet
        assert_eq!(errors.rating, None);
    }

    #[test]
    fn missing_rating_is_rejected() {
        let mut review = complete_review("Lá 1");
        let first = catalog::rating_items("Lá 1").remove(0);
        review.ratings.remove(&first);
        assert_eq!(validate_review(&review).unwrap_err().rating, Some(locale::ERR_RATING_MISSING));
    }

    #[test]
    fn foreign_rating_item_is_rejected() {
        let mut review = complete_review("Lá 1");
        let first = catalog::rating_items("Lá 1").remove(0);
        review.ratings.remove(&first);
        review.ratings.insert("Cô giáo Lan".into(), RatingLevel::Unsatisfied);
        assert!(validate_review(&review).unwrap_err().rating.is_some());
    }

    #[test]
    fn class_outside_the_catalog_is_rejected() {
        for class_name in ["Lá 1 ", " Lá 1", "Lớp ma"] {
            let errors = validate_review(&complete_review(class_name)).unwrap_err();
            assert_eq!(errors.class, Some(locale::ERR_CLASS_UNKNOWN), "{class_name:?}");
        }
    }

    #[test]
    fn whitespace_comment_is_blank() {
        let mut review = complete_review("Lá 2");
        review.comment = "   \n".into();
        assert_eq!(validate_review(&review).unwrap_err().comment, Some(locale::ERR_COMMENT_MISSING));
    }

    #[test]
    fn password_rules() {
        assert_eq!(validate_password_change("abc123", "abc124"), Err(locale::ERR_PASSWORDS_DIFFER));
        assert_eq!(validate_password_change("abc12", "abc12"), Err(locale::ERR_PASSWORD_TOO_SHORT));
        assert_eq!(validate_password_change("abc123", "abc123"), Ok(()));
    }

    #[test]
    fn new_admin_names_are_trimmed_and_cannot_shadow_the_superadmin() {
        assert_eq!(validate_new_admin(" ", "secret", "superadmin"), Err(locale::ERR_CREDENTIALS_BLANK));
        assert_eq!(validate_new_admin("thuy", "secret", "superadmin"), Ok("thuy"));
        assert_eq!(validate_new_admin("  thuy ", "secret", "superadmin"), Ok("thuy"));
        assert_eq!(
            validate_new_admin(" superadmin ", "secret", "superadmin"),
            Err(locale::ERR_USERNAME_EXISTS)
        );
    }
}
