//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use taller_core::error::CoreError;
use taller_core::policy::{Action, Actor, Policy};

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated caller extracted from a JWT Bearer token in the
/// `Authorization` header.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     user.authorize(&WorkshopPolicy, Action::ViewAny, None::<&Workshop>)?;
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub Actor);

impl AuthUser {
    /// Ask `policy` whether this caller may perform `action`; 403 if not.
    pub fn authorize<P, R>(&self, policy: &P, action: Action, resource: Option<&R>) -> Result<(), AppError>
    where
        P: Policy<R>,
        R: ?Sized,
    {
        if policy.can(&self.0, action, resource) {
            return Ok(());
        }
        tracing::debug!(
            user_id = self.0.user_id,
            action = action.as_str(),
            "Authorization denied"
        );
        Err(AppError::Core(CoreError::Forbidden(
            "No tienes permiso para realizar esta acción.".into(),
        )))
    }

    pub fn user_id(&self) -> taller_core::types::DbId {
        self.0.user_id
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AuthUser(claims.into_actor()))
    }
}
