//! Route definitions for the `/workshops` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::workshop;
use crate::state::AppState;

/// Routes mounted at `/workshops`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(workshop::list).post(workshop::create))
        .route(
            "/{id}",
            get(workshop::get_by_id)
                .put(workshop::update)
                .delete(workshop::delete),
        )
}
