use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{gate::SessionEvents, storage::ObjectStore};

#[derive(Clone)]
pub struct AppState {
    pub orm: DatabaseConnection,
    pub storage: Arc<dyn ObjectStore>,
    pub sessions: SessionEvents,
    pub jwt_secret: String,
}
