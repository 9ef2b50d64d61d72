use std::collections::HashMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use crate::users::repo::{StoreError, UserStore};
use crate::users::repo_types::{NewUser, User};

/// Process-local user store. Data is lost on restart.
#[derive(Default)]
pub struct InMemoryUserStore {
    by_email: RwLock<HashMap<String, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.by_email.read().await.get(email).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let mut users = self.by_email.write().await;
        if users.contains_key(&user.email) {
            return Err(StoreError::Duplicate);
        }
        let record = User {
            id: user.id,
            email: user.email,
            password_hash: user.password_hash,
            created_at: OffsetDateTime::now_utc(),
        };
        users.insert(record.email.clone(), record.clone());
        Ok(record)
    }

    async fn delete_by_email(&self, email: &str) -> Result<u64, StoreError> {
        Ok(self.by_email.write().await.remove(email).map_or(0, |_| 1))
    }
}
