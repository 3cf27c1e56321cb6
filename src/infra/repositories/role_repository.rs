//! Role persistence.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::base::EntityRepository;
use super::entities::role::{self, ActiveModel, Entity as RoleEntity};
use crate::domain::{NewRole, Role};
use crate::errors::AppResult;

/// Role repository trait for dependency injection
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// All roles ordered by name
    async fn list(&self) -> AppResult<Vec<Role>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Role>>;

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Role>>;

    async fn create(&self, role: NewRole) -> AppResult<Role>;

    /// Returns false when no role had the id
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// SeaORM-backed role repository
#[derive(Clone)]
pub struct RoleStore {
    db: DatabaseConnection,
}

impl RoleStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl EntityRepository<RoleEntity> for RoleStore {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl RoleRepository for RoleStore {
    async fn list(&self) -> AppResult<Vec<Role>> {
        let models = RoleEntity::find()
            .order_by_asc(role::Column::Name)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Role::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Role>> {
        Ok(self.fetch_by_id(id).await?.map(Role::from))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Role>> {
        let model = RoleEntity::find()
            .filter(role::Column::Name.eq(name))
            .one(&self.db)
            .await?;

        Ok(model.map(Role::from))
    }

    async fn create(&self, role: NewRole) -> AppResult<Role> {
        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(role.name),
            description: Set(role.description),
        }
        .insert(&self.db)
        .await?;

        Ok(Role::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        self.remove_by_id(id).await
    }
}
