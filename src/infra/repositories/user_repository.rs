//! User account persistence.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, Unchanged,
};
use uuid::Uuid;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::base::EntityRepository;
use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::User;
use crate::errors::AppResult;

/// User repository trait for dependency injection
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Insert a user. A taken email fails with a conflict.
    async fn create(&self, email: String, password_hash: String, roles: Vec<String>)
        -> AppResult<User>;

    /// Replace the granted role names
    async fn update_roles(&self, id: Uuid, roles: Vec<String>) -> AppResult<User>;
}

/// SeaORM-backed user repository
#[derive(Clone)]
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl EntityRepository<UserEntity> for UserStore {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let model = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(model.map(User::from))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.fetch_by_id(id).await?.map(User::from))
    }

    async fn create(
        &self,
        email: String,
        password_hash: String,
        roles: Vec<String>,
    ) -> AppResult<User> {
        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email),
            password_hash: Set(password_hash),
            roles: Set(roles),
            created_at: Set(chrono::Utc::now()),
        }
        .insert(&self.db)
        .await?;

        Ok(User::from(model))
    }

    async fn update_roles(&self, id: Uuid, roles: Vec<String>) -> AppResult<User> {
        let model = ActiveModel {
            id: Unchanged(id),
            roles: Set(roles),
            ..Default::default()
        }
        .update(&self.db)
        .await?;

        Ok(User::from(model))
    }
}
