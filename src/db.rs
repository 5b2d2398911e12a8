#[cfg(feature = "ssr")]
mod db_impl {
    use crate::error::AppError;
    use crate::models::account::{AdminAccount, Role};
    use crate::models::ip_log::IpLog;
    use crate::models::review::{NewReview, RatingLevel, Review};
    use chrono::{DateTime, SecondsFormat, Utc};
    use leptos::logging;
    use leptos::logging::log;
    use rusqlite::{params, Connection, Error, OptionalExtension, Row};
    use std::collections::BTreeMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;
    use uuid::Uuid;

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::{Duration, TimeZone};

        // Helper function to create test database
        async fn create_test_db() -> Database {
            log!("[TEST] Creating in-memory test database");
            let db = Database::new(":memory:").unwrap();
            db.create_schema().await.unwrap();
            log!("[TEST] Database schema created");
            db
        }

        fn at(minute: i64) -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2024, 5, 20, 8, 0, 0).unwrap() + Duration::minutes(minute)
        }

        fn new_review(class_name: &str, ip: &str) -> NewReview {
            NewReview {
                class_name: class_name.into(),
                ratings: vec![
                    ("Cô giáo Lan".to_string(), RatingLevel::Satisfied),
                    ("Vệ sinh lớp học".to_string(), RatingLevel::Unsatisfied),
                ]
                .into_iter()
                .collect(),
                comment: "Cảm ơn các cô".into(),
                ip_address: ip.into(),
            }
        }

        #[tokio::test]
        async fn test_schema_creation() {
            log!("[TEST] Starting test_schema_creation");
            let db = create_test_db().await;

            let conn = db.conn.lock().await;
            let mut stmt = conn
                .prepare("SELECT name FROM sqlite_master WHERE type='table'")
                .unwrap();
            let tables: Vec<String> = stmt
                .query_map([], |row| row.get(0))
                .unwrap()
                .collect::<Result<_, _>>()
                .unwrap();

            assert!(tables.contains(&"reviews".to_string()));
            assert!(tables.contains(&"users".to_string()));
            assert!(tables.contains(&"ip_logs".to_string()));
        }

        #[tokio::test]
        async fn test_review_lifecycle() {
            log!("[TEST] Starting test_review_lifecycle");
            let db = create_test_db().await;

            let first = db.admit_review(&new_review("Nhà trẻ A", "10.0.0.1"), at(1)).await.unwrap();
            let second = db.admit_review(&new_review("Nhà trẻ B", "10.0.0.2"), at(5)).await.unwrap();
            log!("[TEST] Review insertion - PASSED");

            let reviews = db.list_reviews().await.unwrap();
            assert_eq!(reviews.len(), 2);
            assert_eq!(reviews[0].id, second.id, "newest first");
            assert_eq!(reviews[1].ratings.len(), 2);
            assert_eq!(reviews[1].submitted_at, at(1));
            log!("[TEST] Review listing - PASSED");

            assert!(db.delete_review(&first.id).await.unwrap());
            assert!(!db.delete_review(&first.id).await.unwrap());
            let reviews = db.list_reviews().await.unwrap();
            assert_eq!(reviews.len(), 1);
            assert_eq!(reviews[0].id, second.id);

            // the export is built from the same listing
            let csv = crate::export::reviews_to_csv(&reviews, 7);
            assert!(!csv.contains("Nhà trẻ A"));
            assert!(csv.contains("Nhà trẻ B"));
            log!("[TEST] Review deletion - PASSED");
        }

        #[tokio::test]
        async fn test_duplicate_submission_writes_one_ip_log() {
            log!("[TEST] Starting test_duplicate_submission_writes_one_ip_log");
            let db = create_test_db().await;
            let review = new_review("Mầm 1", "203.0.113.9");

            db.admit_review(&review, at(1)).await.unwrap();
            let err = db.admit_review(&review, at(2)).await.unwrap_err();
            assert!(matches!(err, AppError::RateLimited));

            assert_eq!(db.list_reviews().await.unwrap().len(), 1);
            let logs = db.list_ip_logs().await.unwrap();
            assert_eq!(logs.len(), 1);
            assert_eq!(logs[0].ip_address, "203.0.113.9");
            assert_eq!(logs[0].class_name, "Mầm 1");
            assert_eq!(logs[0].timestamp, at(2));

            // same IP, another class is a fresh submission
            db.admit_review(&new_review("Mầm 2", "203.0.113.9"), at(3)).await.unwrap();
            assert_eq!(db.list_ip_logs().await.unwrap().len(), 1);
            log!("[TEST] Duplicate admission - PASSED");
        }

        #[tokio::test]
        async fn test_concurrent_duplicates_admit_exactly_one() {
            log!("[TEST] Starting test_concurrent_duplicates_admit_exactly_one");
            let db = create_test_db().await;
            let review = new_review("Chồi 1", "198.51.100.77");

            let (a, b) = tokio::join!(db.admit_review(&review, at(1)), db.admit_review(&review, at(1)));
            let results = [a, b];
            assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
            assert_eq!(
                results.iter().filter(|r| matches!(r, Err(AppError::RateLimited))).count(),
                1
            );
            assert_eq!(db.list_reviews().await.unwrap().len(), 1);
            assert_eq!(db.list_ip_logs().await.unwrap().len(), 1);
            log!("[TEST] Concurrent admission - PASSED");
        }

        #[tokio::test]
        async fn test_delete_all_reviews_keeps_ip_logs() {
            log!("[TEST] Starting test_delete_all_reviews_keeps_ip_logs");
            let db = create_test_db().await;
            let review = new_review("Chồi 1", "198.51.100.3");
            db.admit_review(&review, at(1)).await.unwrap();
            let _ = db.admit_review(&review, at(2)).await;
            db.admit_review(&new_review("Chồi 2", "198.51.100.4"), at(3)).await.unwrap();

            assert_eq!(db.delete_all_reviews().await.unwrap(), 2);
            assert!(db.list_reviews().await.unwrap().is_empty());
            assert_eq!(db.list_ip_logs().await.unwrap().len(), 1);
        }

        #[tokio::test]
        async fn test_ip_log_listing_and_deletion() {
            let db = create_test_db().await;
            for (ip, class_name, minute) in [("10.1.1.1", "Lá 1", 1), ("10.1.1.2", "Lá 2", 9)] {
                let review = new_review(class_name, ip);
                db.admit_review(&review, at(0)).await.unwrap();
                let _ = db.admit_review(&review, at(minute)).await;
            }

            let logs = db.list_ip_logs().await.unwrap();
            assert_eq!(logs.len(), 2);
            assert_eq!(logs[0].ip_address, "10.1.1.2", "newest first");
            assert_eq!(logs[1].timestamp, at(1));
            let (newer, older) = (logs[0].id.clone(), logs[1].id.clone());

            assert!(db.delete_ip_log(&older).await.unwrap());
            let logs = db.list_ip_logs().await.unwrap();
            assert_eq!(logs.len(), 1);
            assert_eq!(logs[0].id, newer);
        }

        #[tokio::test]
        async fn test_reviewed_classes_by_ip() {
            let db = create_test_db().await;
            db.admit_review(&new_review("Lá 2", "10.9.9.9"), at(1)).await.unwrap();
            db.admit_review(&new_review("Lá 1", "10.9.9.9"), at(2)).await.unwrap();
            db.admit_review(&new_review("Mầm 1", "10.0.0.1"), at(4)).await.unwrap();

            let classes = db.reviewed_classes_by_ip("10.9.9.9").await.unwrap();
            assert_eq!(classes, vec!["Lá 1".to_string(), "Lá 2".to_string()]);
            assert!(db.reviewed_classes_by_ip("").await.unwrap().is_empty());
        }

        #[tokio::test]
        async fn test_admin_accounts() {
            log!("[TEST] Starting test_admin_accounts");
            let db = create_test_db().await;

            let thuy = db.insert_admin("thuy", "matkhau1").await.unwrap();
            db.insert_admin("an", "matkhau2").await.unwrap();
            assert!(matches!(
                db.insert_admin("thuy", "other").await.unwrap_err(),
                AppError::UsernameExists
            ));
            log!("[TEST] Duplicate username rejected - PASSED");

            let admins = db.list_admins().await.unwrap();
            let names: Vec<&str> = admins.iter().map(|a| a.username.as_str()).collect();
            assert_eq!(names, vec!["an", "thuy"]);
            assert!(admins.iter().all(|a| a.role == Role::Admin));

            assert_eq!(db.find_admin("thuy", "matkhau1").await.unwrap().map(|a| a.id), Some(thuy.id.clone()));
            assert!(db.find_admin("thuy", "wrong").await.unwrap().is_none());

            assert!(db.update_password(&thuy.id, "moi123456").await.unwrap());
            assert!(db.find_admin("thuy", "matkhau1").await.unwrap().is_none());
            assert!(db.find_admin("thuy", "moi123456").await.unwrap().is_some());
            log!("[TEST] Password update - PASSED");

            assert!(db.delete_admin(&thuy.id).await.unwrap());
            assert_eq!(db.list_admins().await.unwrap().len(), 1);
        }

        #[tokio::test]
        async fn test_missing_values_read_back_with_fallbacks() {
            let db = create_test_db().await;
            {
                let conn = db.conn.lock().await;
                conn.execute(
                    "INSERT INTO reviews (id, class_name, ratings, comment, submitted_at, ip_address)
                     VALUES ('legacy', NULL, 'not json', NULL, '2024-01-01T00:00:00.000000Z', NULL)",
                    [],
                )
                .unwrap();
            }
            let reviews = db.list_reviews().await.unwrap();
            assert_eq!(reviews[0].class_name, "");
            assert_eq!(reviews[0].comment, "");
            assert_eq!(reviews[0].ip_address, "N/A");
            assert!(reviews[0].ratings.is_empty());
        }
    }

    fn encode_time(instant: &DateTime<Utc>) -> String {
        // fixed width so that text order is time order
        instant.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    fn decode_time(raw: Option<String>) -> DateTime<Utc> {
        raw.and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
            .map(|t| t.with_timezone(&Utc))
            .unwrap_or_else(Utc::now)
    }

    fn review_from_row(row: &Row<'_>) -> Result<Review, Error> {
        let ratings_json: Option<String> = row.get(2)?;
        let ratings: BTreeMap<String, RatingLevel> = ratings_json
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default();
        Ok(Review {
            id: row.get(0)?,
            class_name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
            ratings,
            comment: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            submitted_at: decode_time(row.get(4)?),
            ip_address: row
                .get::<_, Option<String>>(5)?
                .unwrap_or_else(|| "N/A".to_string()),
        })
    }

    fn ip_log_from_row(row: &Row<'_>) -> Result<IpLog, Error> {
        Ok(IpLog {
            id: row.get(0)?,
            ip_address: row
                .get::<_, Option<String>>(1)?
                .unwrap_or_else(|| "N/A".to_string()),
            class_name: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            timestamp: decode_time(row.get(3)?),
        })
    }

    fn account_from_row(row: &Row<'_>) -> Result<AdminAccount, Error> {
        let role: String = row.get(3)?;
        Ok(AdminAccount {
            id: row.get(0)?,
            username: row.get(1)?,
            password: row.get(2)?,
            role: Role::parse(&role).unwrap_or(Role::Admin),
        })
    }

    const REVIEW_COLUMNS: &str = "id, class_name, ratings, comment, submitted_at, ip_address";

    fn insert_review_row(
        conn: &Connection,
        review: &NewReview,
        submitted_at: &DateTime<Utc>,
    ) -> Result<Review, Error> {
        let id = Uuid::new_v4().to_string();
        let ratings_json = serde_json::to_string(&review.ratings)
            .map_err(|e| Error::ToSqlConversionFailure(Box::new(e)))?;
        conn.execute(
            "INSERT INTO reviews (id, class_name, ratings, comment, submitted_at, ip_address)
             VALUES (?, ?, ?, ?, ?, ?)",
            params![
                &id,
                &review.class_name,
                &ratings_json,
                &review.comment,
                encode_time(submitted_at),
                &review.ip_address
            ],
        )?;
        Ok(Review {
            id,
            class_name: review.class_name.clone(),
            ratings: review.ratings.clone(),
            comment: review.comment.clone(),
            submitted_at: *submitted_at,
            ip_address: review.ip_address.clone(),
        })
    }

    fn insert_ip_log_row(
        conn: &Connection,
        ip_address: &str,
        class_name: &str,
        timestamp: &DateTime<Utc>,
    ) -> Result<IpLog, Error> {
        let id = Uuid::new_v4().to_string();
        conn.execute(
            "INSERT INTO ip_logs (id, ip_address, class_name, timestamp) VALUES (?, ?, ?, ?)",
            params![&id, ip_address, class_name, encode_time(timestamp)],
        )?;
        Ok(IpLog {
            id,
            ip_address: ip_address.to_string(),
            class_name: class_name.to_string(),
            timestamp: *timestamp,
        })
    }

    // Shared handle to the SQLite store holding reviews, admin accounts and IP logs
    #[derive(Debug)]
    pub struct Database {
        conn: Arc<Mutex<Connection>>,
    }

    impl Database {
        // Create a new database connection
        pub fn new(db_path: &str) -> Result<Self, Error> {
            let conn = Connection::open(db_path)?;
            logging::log!("Database connection established at: {}", db_path);
            Ok(Database {
                conn: Arc::new(Mutex::new(conn)),
            })
        }

        // Create the database schema
        pub async fn create_schema(&self) -> Result<(), Error> {
            let conn = self.conn.lock().await;

            // 1. Reviews table
            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS reviews (
                    id TEXT PRIMARY KEY,
                    class_name TEXT,
                    ratings TEXT,
                    comment TEXT,
                    submitted_at TEXT,
                    ip_address TEXT
                );
                CREATE INDEX IF NOT EXISTS idx_reviews_class_ip
                    ON reviews (class_name, ip_address);
                CREATE INDEX IF NOT EXISTS idx_reviews_submitted_at
                    ON reviews (submitted_at);",
            )
            .map_err(|e| {
                logging::error!("Failed creating reviews table: {}", e);
                e
            })?;

            // 2. Admin accounts
            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS users (
                    id TEXT PRIMARY KEY,
                    username TEXT NOT NULL,
                    password TEXT NOT NULL,
                    role TEXT NOT NULL DEFAULT 'admin'
                );",
            )
            .map_err(|e| {
                logging::error!("Failed creating users table: {}", e);
                e
            })?;

            // 3. Blocked duplicate attempts
            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS ip_logs (
                    id TEXT PRIMARY KEY,
                    ip_address TEXT,
                    class_name TEXT,
                    timestamp TEXT
                );",
            )
            .map_err(|e| {
                logging::error!("Failed creating ip_logs table: {}", e);
                e
            })?;
            Ok(())
        }

        // All reviews, newest first
        pub async fn list_reviews(&self) -> Result<Vec<Review>, Error> {
            let conn = self.conn.lock().await;
            let mut stmt = conn.prepare(&format!(
                "SELECT {REVIEW_COLUMNS} FROM reviews ORDER BY submitted_at DESC"
            ))?;
            let reviews = stmt
                .query_map([], review_from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            logging::log!("[DB] Fetched {} reviews", reviews.len());
            Ok(reviews)
        }

        /// Inserts the review unless one already exists for the same class and
        /// IP. A duplicate records an IP log instead and fails with
        /// `AppError::RateLimited`. Check and write share one transaction.
        pub async fn admit_review(&self, review: &NewReview, now: DateTime<Utc>) -> Result<Review, AppError> {
            let mut conn = self.conn.lock().await;
            let tx = conn.transaction()?;

            let existing: Option<String> = tx
                .query_row(
                    "SELECT id FROM reviews WHERE class_name = ? AND ip_address = ? LIMIT 1",
                    [&review.class_name, &review.ip_address],
                    |row| row.get(0),
                )
                .optional()?;

            if let Some(existing_id) = existing {
                log!(
                    "[DB] Duplicate submission for class {} from {} (existing review {})",
                    review.class_name,
                    review.ip_address,
                    existing_id
                );
                insert_ip_log_row(&tx, &review.ip_address, &review.class_name, &now)?;
                tx.commit()?;
                return Err(AppError::RateLimited);
            }

            let stored = insert_review_row(&tx, review, &now)?;
            tx.commit()?;
            log!("[DB] Review {} admitted for class {}", stored.id, stored.class_name);
            Ok(stored)
        }

        // Distinct classes already reviewed from this IP
        pub async fn reviewed_classes_by_ip(&self, ip_address: &str) -> Result<Vec<String>, Error> {
            if ip_address.is_empty() {
                return Ok(Vec::new());
            }
            let conn = self.conn.lock().await;
            let mut stmt = conn.prepare(
                "SELECT DISTINCT class_name FROM reviews
                 WHERE ip_address = ? AND class_name IS NOT NULL AND class_name != ''
                 ORDER BY class_name",
            )?;
            let classes = stmt.query_map([ip_address], |row| row.get(0))?;
            classes.collect()
        }

        pub async fn delete_review(&self, review_id: &str) -> Result<bool, Error> {
            let conn = self.conn.lock().await;
            let deleted = conn.execute("DELETE FROM reviews WHERE id = ?", [review_id])?;
            logging::log!("Review deleted: {} ({} rows)", review_id, deleted);
            Ok(deleted > 0)
        }

        pub async fn delete_all_reviews(&self) -> Result<usize, Error> {
            let mut conn = self.conn.lock().await;
            let tx = conn.transaction()?;
            let deleted = tx.execute("DELETE FROM reviews", [])?;
            tx.commit()?;
            logging::log!("[DB] Deleted all {} reviews", deleted);
            Ok(deleted)
        }

        pub async fn list_ip_logs(&self) -> Result<Vec<IpLog>, Error> {
            let conn = self.conn.lock().await;
            let mut stmt = conn.prepare(
                "SELECT id, ip_address, class_name, timestamp FROM ip_logs ORDER BY timestamp DESC",
            )?;
            let logs = stmt.query_map([], ip_log_from_row)?;
            logs.collect()
        }

        pub async fn delete_ip_log(&self, log_id: &str) -> Result<bool, Error> {
            let conn = self.conn.lock().await;
            let deleted = conn.execute("DELETE FROM ip_logs WHERE id = ?", [log_id])?;
            logging::log!("IP log deleted: {}", log_id);
            Ok(deleted > 0)
        }

        // Plain-text credential match against the users table
        pub async fn find_admin(&self, username: &str, password: &str) -> Result<Option<AdminAccount>, Error> {
            let conn = self.conn.lock().await;
            conn.query_row(
                "SELECT id, username, password, role FROM users
                 WHERE username = ? AND password = ? LIMIT 1",
                [username, password],
                account_from_row,
            )
            .optional()
        }

        pub async fn list_admins(&self) -> Result<Vec<AdminAccount>, Error> {
            let conn = self.conn.lock().await;
            let mut stmt = conn.prepare(
                "SELECT id, username, password, role FROM users ORDER BY username",
            )?;
            let admins = stmt.query_map([], account_from_row)?;
            admins.collect()
        }

        pub async fn insert_admin(&self, username: &str, password: &str) -> Result<AdminAccount, AppError> {
            let mut conn = self.conn.lock().await;
            let tx = conn.transaction()?;

            let taken: Option<String> = tx
                .query_row("SELECT id FROM users WHERE username = ?", [username], |row| row.get(0))
                .optional()?;
            if taken.is_some() {
                return Err(AppError::UsernameExists);
            }

            let account = AdminAccount {
                id: Uuid::new_v4().to_string(),
                username: username.to_string(),
                password: password.to_string(),
                role: Role::Admin,
            };
            tx.execute(
                "INSERT INTO users (id, username, password, role) VALUES (?, ?, ?, ?)",
                params![&account.id, &account.username, &account.password, account.role.as_str()],
            )?;
            tx.commit()?;
            log!("[DB] Admin account created: {}", account.username);
            Ok(account)
        }

        pub async fn delete_admin(&self, user_id: &str) -> Result<bool, Error> {
            let conn = self.conn.lock().await;
            let deleted = conn.execute("DELETE FROM users WHERE id = ?", [user_id])?;
            logging::log!("Admin account deleted: {}", user_id);
            Ok(deleted > 0)
        }

        pub async fn update_password(&self, user_id: &str, new_password: &str) -> Result<bool, Error> {
            let conn = self.conn.lock().await;
            let updated = conn.execute(
                "UPDATE users SET password = ? WHERE id = ?",
                [new_password, user_id],
            )?;
            Ok(updated > 0)
        }
    }
}

#[cfg(feature = "ssr")]
pub use db_impl::Database;
