//! Migration: Create child, guardian, godparent and their join tables.

use sea_orm_migration::prelude::*;

use domain::{
    CHILD_NAME_MAX_LEN, GODPARENT_EMAIL_MAX_LEN, GODPARENT_NAME_MAX_LEN, GUARDIAN_NAME_MAX_LEN,
    GUARDIAN_TYPE_MAX_LEN, NATIONALITY_MAX_LEN, PIC_URL_MAX_LEN, SCHOOL_YEAR_MAX_LEN,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Child::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Child::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Child::PicUrl).string_len(PIC_URL_MAX_LEN as u32).null())
                    .col(
                        ColumnDef::new(Child::FirstName)
                            .string_len(CHILD_NAME_MAX_LEN as u32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Child::LastName)
                            .string_len(CHILD_NAME_MAX_LEN as u32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Child::NickName)
                            .string_len(CHILD_NAME_MAX_LEN as u32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Child::BirthDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Child::Nationality)
                            .string_len(NATIONALITY_MAX_LEN as u32)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Child::SchoolYear)
                            .string_len(SCHOOL_YEAR_MAX_LEN as u32)
                            .null(),
                    )
                    .col(ColumnDef::new(Child::Situation).text().null())
                    .col(ColumnDef::new(Child::Latitude).double().null())
                    .col(ColumnDef::new(Child::Longitude).double().null())
                    .col(ColumnDef::new(Child::Activity).boolean().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Guardian::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Guardian::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Guardian::GuardianType)
                            .string_len(GUARDIAN_TYPE_MAX_LEN as u32)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Guardian::GuardianFname)
                            .string_len(GUARDIAN_NAME_MAX_LEN as u32)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Guardian::GuardianLname)
                            .string_len(GUARDIAN_NAME_MAX_LEN as u32)
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Godparent::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Godparent::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Godparent::FirstName)
                            .string_len(GODPARENT_NAME_MAX_LEN as u32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Godparent::LastName)
                            .string_len(GODPARENT_NAME_MAX_LEN as u32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Godparent::Email)
                            .string_len(GODPARENT_EMAIL_MAX_LEN as u32)
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // One row per (child, guardian) pair; the composite key enforces it
        manager
            .create_table(
                Table::create()
                    .table(ChildToGuardian::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ChildToGuardian::ChildId).uuid().not_null())
                    .col(ColumnDef::new(ChildToGuardian::GuardianId).uuid().not_null())
                    .col(
                        ColumnDef::new(ChildToGuardian::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(ChildToGuardian::ChildId)
                            .col(ChildToGuardian::GuardianId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_child_to_guardian_child")
                            .from(ChildToGuardian::Table, ChildToGuardian::ChildId)
                            .to(Child::Table, Child::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_child_to_guardian_guardian")
                            .from(ChildToGuardian::Table, ChildToGuardian::GuardianId)
                            .to(Guardian::Table, Guardian::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ChildToGodparent::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ChildToGodparent::ChildId).uuid().not_null())
                    .col(ColumnDef::new(ChildToGodparent::GodparentId).uuid().not_null())
                    .col(
                        ColumnDef::new(ChildToGodparent::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(ChildToGodparent::ChildId)
                            .col(ChildToGodparent::GodparentId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_child_to_godparent_child")
                            .from(ChildToGodparent::Table, ChildToGodparent::ChildId)
                            .to(Child::Table, Child::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_child_to_godparent_godparent")
                            .from(ChildToGodparent::Table, ChildToGodparent::GodparentId)
                            .to(Godparent::Table, Godparent::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Join tables first
        manager
            .drop_table(Table::drop().table(ChildToGodparent::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ChildToGuardian::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Godparent::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Guardian::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Child::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Child {
    Table,
    Id,
    PicUrl,
    FirstName,
    LastName,
    NickName,
    BirthDate,
    Nationality,
    SchoolYear,
    Situation,
    Latitude,
    Longitude,
    Activity,
}

#[derive(DeriveIden)]
enum Guardian {
    Table,
    Id,
    GuardianType,
    GuardianFname,
    GuardianLname,
}

#[derive(DeriveIden)]
enum Godparent {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
}

#[derive(DeriveIden)]
enum ChildToGuardian {
    Table,
    ChildId,
    GuardianId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ChildToGodparent {
    Table,
    ChildId,
    GodparentId,
    CreatedAt,
}
