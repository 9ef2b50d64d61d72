use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{instrument, warn};

use crate::{
    error::ApiError,
    state::AppState,
    users::{
        dto::{CreateUserRequest, PublicUser},
        services::register_user,
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new().route("/users", post(create_user))
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PublicUser>), ApiError> {
    let Json(payload) = payload.map_err(|e| match e {
        // No JSON body to read: same as an empty object.
        JsonRejection::MissingJsonContentType(_) => {
            warn!("registration without JSON content type");
            ApiError::MissingEmail
        }
        e => {
            warn!(error = %e, "rejected request body");
            ApiError::InvalidBody
        }
    })?;

    let user = register_user(state.users.as_ref(), payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}
