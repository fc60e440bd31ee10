//! Migration: Create the user table.

use sea_orm_migration::prelude::*;

use domain::{PASSWORD_HASH_MAX_LEN, USER_EMAIL_MAX_LEN, USER_NAME_MAX_LEN};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(User::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(User::FirstName)
                            .string_len(USER_NAME_MAX_LEN as u32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(User::LastName)
                            .string_len(USER_NAME_MAX_LEN as u32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(User::Email)
                            .string_len(USER_EMAIL_MAX_LEN as u32)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(User::Password)
                            .string_len(PASSWORD_HASH_MAX_LEN as u32)
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Lookups by email on login
        manager
            .create_index(
                Index::create()
                    .name("idx_user_email")
                    .table(User::Table)
                    .col(User::Email)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    Password,
}
