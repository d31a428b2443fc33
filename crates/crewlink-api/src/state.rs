use std::sync::Arc;

use crewlink_db::Database;

use crate::auth::JwtConfig;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub jwt: JwtConfig,
}
