//! Handlers for the `/workshops` resource.
//!
//! Every endpoint authenticates via [`AuthUser`] and asks [`WorkshopPolicy`]
//! before touching the repository. Writes validate the full payload first;
//! nothing reaches the database on a validation failure.
//!
//! Extractors are taken as `Result` so that rejections go through
//! [`AppError`] and come back as JSON like every other error.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use taller_core::error::CoreError;
use taller_core::filter::build_list_query;
use taller_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use taller_core::policy::{Action, WorkshopPolicy};
use taller_core::schema::EntitySchema;
use taller_core::types::DbId;
use taller_core::validation::{validate_payload, ValidatedWorkshop};
use taller_core::workshop::ENTITY_TYPE;
use taller_db::models::workshop::Workshop;
use taller_db::repositories::{DeleteOutcome, WorkshopRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::ListWorkshopsParams;
use crate::response::{DataResponse, Page};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Workshop",
        id,
    })
}

fn validate(body: &serde_json::Value) -> AppResult<ValidatedWorkshop> {
    validate_payload(body).map_err(|fields| AppError::Core(CoreError::InvalidFields(fields)))
}

/// GET /api/v1/workshops
///
/// Filtered, windowed list in insertion order. `search` matches any term
/// against the name columns; `state` matches shift/state text and, where the
/// table has a boolean `state` column, the activity keywords.
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    params: Result<Query<ListWorkshopsParams>, QueryRejection>,
) -> AppResult<Json<DataResponse<Page<Workshop>>>> {
    auth.authorize(&WorkshopPolicy, Action::ViewAny, None::<&Workshop>)?;
    let Query(params) = params?;

    let empty = EntitySchema::new();
    let schema = state.schema.entity(ENTITY_TYPE).unwrap_or(&empty);
    let query = build_list_query(params.search.as_deref(), params.state.as_deref(), schema);

    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.offset);

    let items = WorkshopRepo::list(&state.pool, &query, limit, offset).await?;
    let total = WorkshopRepo::count(&state.pool, &query).await?;

    Ok(Json(DataResponse {
        data: Page {
            items,
            total,
            limit,
            offset,
        },
    }))
}

/// POST /api/v1/workshops
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> AppResult<(StatusCode, Json<DataResponse<Workshop>>)> {
    auth.authorize(&WorkshopPolicy, Action::Create, None::<&Workshop>)?;
    let Json(body) = body?;
    let validated = validate(&body)?;

    let workshop = WorkshopRepo::create(&state.pool, &validated).await?;

    tracing::info!(
        workshop_id = workshop.id,
        state = %workshop.state,
        user_id = auth.user_id(),
        "Workshop created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: workshop })))
}

/// GET /api/v1/workshops/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
) -> AppResult<Json<DataResponse<Workshop>>> {
    let Path(id) = id?;
    let workshop = WorkshopRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    auth.authorize(&WorkshopPolicy, Action::View, Some(&workshop))?;

    Ok(Json(DataResponse { data: workshop }))
}

/// PUT /api/v1/workshops/{id}
///
/// Full replacement: the payload is validated as on create and the state is
/// re-derived from the new capacity.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> AppResult<Json<DataResponse<Workshop>>> {
    auth.authorize(&WorkshopPolicy, Action::Update, None::<&Workshop>)?;
    let Path(id) = id?;
    let Json(body) = body?;
    let validated = validate(&body)?;

    let workshop = WorkshopRepo::update(&state.pool, id, &validated)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(
        workshop_id = id,
        state = %workshop.state,
        user_id = auth.user_id(),
        "Workshop updated",
    );

    Ok(Json(DataResponse { data: workshop }))
}

/// DELETE /api/v1/workshops/{id}
///
/// Refused with 400 `HAS_RELATIONS` while dependents exist; the row is kept.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
) -> AppResult<StatusCode> {
    auth.authorize(&WorkshopPolicy, Action::Delete, None::<&Workshop>)?;
    let Path(id) = id?;

    match WorkshopRepo::delete_guarded(&state.pool, id, state.relation_guard.as_ref()).await? {
        DeleteOutcome::Deleted => {
            tracing::info!(workshop_id = id, user_id = auth.user_id(), "Workshop deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        DeleteOutcome::NotFound => Err(not_found(id)),
        DeleteOutcome::HasRelations => {
            tracing::info!(workshop_id = id, user_id = auth.user_id(), "Workshop delete refused: has relations");
            Err(AppError::Core(CoreError::HasRelations {
                entity: "Workshop",
                id,
            }))
        }
    }
}
