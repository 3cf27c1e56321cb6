//! Base repository trait shared by the SeaORM stores.
//!
//! Provides primary-key lookups and deletes for any entity so the
//! concrete stores only carry their own queries.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, PrimaryKeyTrait};
use std::fmt::Debug;

use crate::errors::AppResult;

/// Primary-key operations over a SeaORM entity.
#[async_trait]
pub trait EntityRepository<E>: Send + Sync
where
    E: EntityTrait,
    E::Model: Send + Sync,
{
    /// Get database connection reference
    fn db(&self) -> &DatabaseConnection;

    /// Find a row by primary key
    async fn fetch_by_id(
        &self,
        id: <E::PrimaryKey as PrimaryKeyTrait>::ValueType,
    ) -> AppResult<Option<E::Model>>
    where
        <E::PrimaryKey as PrimaryKeyTrait>::ValueType: Clone + Send,
    {
        E::find_by_id(id).one(self.db()).await.map_err(Into::into)
    }

    /// Delete a row by primary key. Returns false when nothing matched.
    async fn remove_by_id(
        &self,
        id: <E::PrimaryKey as PrimaryKeyTrait>::ValueType,
    ) -> AppResult<bool>
    where
        <E::PrimaryKey as PrimaryKeyTrait>::ValueType: Clone + Send + Debug,
    {
        let result = E::delete_by_id(id).exec(self.db()).await?;
        Ok(result.rows_affected > 0)
    }
}
