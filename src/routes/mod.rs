use axum::Router;

use crate::state::AppState;

pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod doc;
pub mod health;
pub mod images;
pub mod params;
pub mod products;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/categories", categories::router())
        .nest("/products", products::router())
        .nest("/images", images::router())
        .nest("/dashboard", dashboard::router())
}
