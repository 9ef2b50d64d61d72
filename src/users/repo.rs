use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::users::repo_types::{NewUser, User};

const UNIQUE_VIOLATION: &str = "23505";
// Raised for NUL characters, which TEXT columns cannot hold.
const CHARACTER_NOT_IN_REPERTOIRE: &str = "22021";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("a user with this email already exists")]
    Duplicate,
    #[error("value cannot be stored")]
    Unrepresentable,
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Collection of users keyed by email.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    /// Fails with [`StoreError::Duplicate`] when the email is already taken.
    async fn insert(&self, user: NewUser) -> Result<User, StoreError>;
    /// Returns the number of removed records.
    async fn delete_by_email(&self, email: &str) -> Result<u64, StoreError>;
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| classify(e, "find user by email"))?;
        Ok(user)
    }

    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, email, password_hash, created_at
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.db)
        .await
        .map_err(|e| classify(e, "insert user"))
    }

    async fn delete_by_email(&self, email: &str) -> Result<u64, StoreError> {
        let done = sqlx::query("DELETE FROM users WHERE email = $1")
            .bind(email)
            .execute(&self.db)
            .await
            .context("delete users by email")?;
        Ok(done.rows_affected())
    }
}

fn classify(e: sqlx::Error, action: &'static str) -> StoreError {
    let code = match &e {
        sqlx::Error::Database(db_err) => db_err.code().map(|c| c.into_owned()),
        _ => None,
    };
    match code.as_deref() {
        Some(UNIQUE_VIOLATION) => StoreError::Duplicate,
        Some(CHARACTER_NOT_IN_REPERTOIRE) => StoreError::Unrepresentable,
        _ => StoreError::Backend(anyhow::Error::new(e).context(action)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;
    use uuid::Uuid;

    async fn connect() -> PgUserStore {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let db = PgPoolOptions::new()
            .max_connections(2)
            .connect(&url)
            .await
            .expect("connect to database");
        sqlx::migrate!("./migrations")
            .run(&db)
            .await
            .expect("run migrations");
        PgUserStore::new(db)
    }

    fn new_user(email: &str) -> NewUser {
        NewUser {
            id: Uuid::new_v4(),
            email: email.into(),
            password_hash: "$argon2id$placeholder".into(),
        }
    }

    #[tokio::test]
    #[ignore = "needs a Postgres instance in DATABASE_URL"]
    async fn insert_find_and_delete_against_postgres() {
        let store = connect().await;
        let email = "repo-roundtrip@userhub.test";
        store.delete_by_email(email).await.expect("cleanup");

        let created = store.insert(new_user(email)).await.expect("insert");
        let found = store
            .find_by_email(email)
            .await
            .expect("lookup")
            .expect("user present");
        assert_eq!(found.id, created.id);

        let err = store.insert(new_user(email)).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate));

        assert_eq!(store.delete_by_email(email).await.expect("delete"), 1);
        assert!(store.find_by_email(email).await.expect("lookup").is_none());
    }

    #[tokio::test]
    #[ignore = "needs a Postgres instance in DATABASE_URL"]
    async fn nul_in_email_is_unrepresentable() {
        let store = connect().await;
        let email = "nul\u{0}@userhub.test";

        let err = store.find_by_email(email).await.unwrap_err();
        assert!(matches!(err, StoreError::Unrepresentable), "got {err:?}");

        let err = store.insert(new_user(email)).await.unwrap_err();
        assert!(matches!(err, StoreError::Unrepresentable), "got {err:?}");
    }
}
