//! Migration: Create roles table and seed the built-in roles.

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;
use uuid::Uuid;

use crate::config::{ROLE_ADMIN, ROLE_USER};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Roles::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Roles::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Roles::Name).string().not_null().unique_key())
                    .col(ColumnDef::new(Roles::Description).string().not_null())
                    .to_owned(),
            )
            .await?;

        let seed = Query::insert()
            .into_table(Roles::Table)
            .columns([Roles::Id, Roles::Name, Roles::Description])
            .values_panic([
                Uuid::new_v4().into(),
                ROLE_USER.into(),
                "Can browse the catalog and rate movies".into(),
            ])
            .values_panic([
                Uuid::new_v4().into(),
                ROLE_ADMIN.into(),
                "Manages the movie catalog and roles".into(),
            ])
            .to_owned();

        let backend = manager.get_database_backend();
        manager.get_connection().execute(backend.build(&seed)).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Roles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Roles {
    Table,
    Id,
    Name,
    Description,
}
