use crate::auth::SessionStore;
use crate::config::AppConfig;
use crate::db::Database;
use crate::geo::GeoClient;

/// Shared by every actix worker through `web::Data`.
pub struct AppState {
    pub db: Database,
    pub sessions: SessionStore,
    pub geo: GeoClient,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(db: Database, config: AppConfig) -> Self {
        let geo = GeoClient::new(&config.geo_endpoint, &config.expected_country);
        Self {
            db,
            sessions: SessionStore::new(),
            geo,
            config,
        }
    }
}
