//! Role service - Role reference data and grants.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{NewRole, Role, User};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Role service trait for dependency injection.
#[async_trait]
pub trait RoleService: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Role>>;

    async fn get(&self, id: Uuid) -> AppResult<Role>;

    /// Create a role. Names are unique.
    async fn create(&self, role: NewRole) -> AppResult<Role>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// Grant an existing role to the user with the given email
    async fn grant(&self, email: &str, role_name: &str) -> AppResult<User>;
}

/// Concrete implementation of RoleService using Unit of Work.
pub struct RoleManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> RoleManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> RoleService for RoleManager<U> {
    async fn list(&self) -> AppResult<Vec<Role>> {
        self.uow.roles().list().await
    }

    async fn get(&self, id: Uuid) -> AppResult<Role> {
        self.uow.roles().find_by_id(id).await?.ok_or_not_found()
    }

    async fn create(&self, role: NewRole) -> AppResult<Role> {
        let name = role.name.trim().to_lowercase();
        if name.is_empty() {
            return Err(AppError::validation("Role name is required"));
        }

        let roles = self.uow.roles();
        if roles.find_by_name(&name).await?.is_some() {
            return Err(AppError::conflict(format!("Role '{}' already exists", name)));
        }

        let role = roles
            .create(NewRole {
                name,
                description: role.description.trim().to_string(),
            })
            .await?;

        tracing::info!(role_id = %role.id, name = %role.name, "Role created");
        Ok(role)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.uow.roles().delete(id).await? {
            return Err(AppError::NotFound);
        }
        tracing::info!(role_id = %id, "Role deleted");
        Ok(())
    }

    async fn grant(&self, email: &str, role_name: &str) -> AppResult<User> {
        let role_name = role_name.trim().to_lowercase();
        if self.uow.roles().find_by_name(&role_name).await?.is_none() {
            return Err(AppError::bad_request(format!("Unknown role: {}", role_name)));
        }

        let users = self.uow.users();
        let mut user = users
            .find_by_email(&email.trim().to_lowercase())
            .await?
            .ok_or_not_found()?;

        if !user.grant(&role_name) {
            tracing::info!(user_id = %user.id, role = %role_name, "Role already granted");
            return Ok(user);
        }

        let user = users.update_roles(user.id, user.roles).await?;
        tracing::info!(user_id = %user.id, role = %role_name, "Role granted");
        Ok(user)
    }
}
