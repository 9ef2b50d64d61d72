use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,                   // assigned at registration
    pub email: String,              // unique key
    pub password_hash: String,      // Argon2 hash
    pub created_at: OffsetDateTime, // set by the store on insert
}

/// Row about to be inserted; `created_at` is filled in by the store.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
}
