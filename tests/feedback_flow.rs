#![cfg(feature = "ssr")]

use chrono::{TimeZone, Utc};
use class_feedback::admission::submit;
use class_feedback::auth::{authenticate, authorize, Access, SessionStore};
use class_feedback::catalog::rating_items;
use class_feedback::config::AppConfig;
use class_feedback::dashboard::{filter_reviews, tally, ClassFilter};
use class_feedback::db::Database;
use class_feedback::error::AppError;
use class_feedback::export::reviews_to_csv;
use class_feedback::models::review::{NewReview, RatingLevel};

async fn setup() -> Database {
    let db = Database::new(":memory:").unwrap();
    db.create_schema().await.unwrap();
    db
}

fn form(class_name: &str, ip: &str, level: RatingLevel) -> NewReview {
    NewReview {
        class_name: class_name.to_string(),
        ratings: rating_items(class_name).into_iter().map(|item| (item, level)).collect(),
        comment: "Các cô rất tận tình".to_string(),
        ip_address: ip.to_string(),
    }
}

#[tokio::test]
async fn parents_submit_and_admins_see_the_results() {
    let db = setup().await;
    let t0 = Utc.with_ymd_and_hms(2024, 5, 20, 1, 0, 0).unwrap();
    let t1 = Utc.with_ymd_and_hms(2024, 5, 20, 2, 0, 0).unwrap();

    submit(&db, form("Mầm 1", "203.0.113.10", RatingLevel::Satisfied), t0).await.unwrap();
    submit(&db, form("Lá 1", "203.0.113.10", RatingLevel::Unsatisfied), t1).await.unwrap();

    // same connection, same class
    let repeat = submit(&db, form("Mầm 1", "203.0.113.10", RatingLevel::Unsatisfied), t1).await;
    assert!(matches!(repeat, Err(AppError::RateLimited)));

    let reviews = db.list_reviews().await.unwrap();
    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[0].class_name, "Lá 1");

    let logs = db.list_ip_logs().await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].class_name, "Mầm 1");

    let mam = filter_reviews(&reviews, &ClassFilter::from_query("Mầm 1"));
    assert_eq!(mam.len(), 1);
    let tallies = tally(&mam);
    assert_eq!(tallies.len(), rating_items("Mầm 1").len());
    assert!(tallies.iter().all(|(_, t)| t.satisfied == 1 && t.unsatisfied == 0));

    let csv = reviews_to_csv(&mam, 7);
    assert_eq!(csv.lines().count(), 2);
    assert!(csv.contains("20/05/2024 08:00"));
}

#[tokio::test]
async fn superadmin_manages_accounts_and_resets() {
    let db = setup().await;
    let config = AppConfig::default();
    let sessions = SessionStore::new();

    let root = authenticate(&db, &config, &config.superadmin_username, &config.superadmin_password)
        .await
        .unwrap()
        .unwrap();
    let root_token = sessions.create(root).await;
    assert!(authorize(sessions.get(&root_token).await, Access::SuperAdmin).is_ok());

    let account = db.insert_admin("lan", "lan123").await.unwrap();
    let lan = authenticate(&db, &config, "lan", "lan123").await.unwrap().unwrap();
    let lan_token = sessions.create(lan).await;
    assert!(matches!(
        authorize(sessions.get(&lan_token).await, Access::SuperAdmin),
        Err(AppError::Forbidden)
    ));

    assert!(db.update_password(&account.id, "moi-mat-khau").await.unwrap());
    assert!(authenticate(&db, &config, "lan", "lan123").await.unwrap().is_none());

    submit(&db, form("Lá 1", "198.51.100.4", RatingLevel::Satisfied), Utc::now()).await.unwrap();
    assert_eq!(db.delete_all_reviews().await.unwrap(), 1);
    assert!(db.list_reviews().await.unwrap().is_empty());

    assert!(db.delete_admin(&account.id).await.unwrap());
    assert_eq!(sessions.revoke_user(&account.id).await, 1);
    assert!(sessions.get(&lan_token).await.is_none());
}
