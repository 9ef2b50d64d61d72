use tracing::{info, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::users::{
    dto::{CreateUserRequest, PublicUser},
    password::hash_password,
    repo::{StoreError, UserStore},
    repo_types::NewUser,
};

/// Validates the request, rejects taken emails and stores the new user.
///
/// Checks run in a fixed order: email, then password, then uniqueness.
pub async fn register_user(
    store: &dyn UserStore,
    request: CreateUserRequest,
) -> Result<PublicUser, ApiError> {
    let email = match request.email {
        Some(e) if !e.is_empty() => e,
        _ => {
            warn!("registration without email");
            return Err(ApiError::MissingEmail);
        }
    };

    let password = match request.password {
        Some(p) if !p.is_empty() => p,
        _ => {
            warn!(email = %email, "registration without password");
            return Err(ApiError::MissingPassword);
        }
    };

    if store.find_by_email(&email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(ApiError::AlreadyExists);
    }

    let password_hash = hash_password(&password)?;
    let user = store
        .insert(NewUser {
            id: Uuid::new_v4(),
            email,
            password_hash,
        })
        .await
        .inspect_err(|e| {
            if matches!(e, StoreError::Duplicate) {
                warn!("email registered concurrently");
            }
        })?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(PublicUser {
        id: user.id,
        email: user.email,
    })
}
