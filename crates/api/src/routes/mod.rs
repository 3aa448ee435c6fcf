pub mod health;
pub mod workshop;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /workshops                                       list, create
/// /workshops/{id}                                  get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/workshops", workshop::router())
}
