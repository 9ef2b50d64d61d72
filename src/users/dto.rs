use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for `POST /users`. Both fields are checked by hand so that
/// a missing one gets its own error message.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
}
