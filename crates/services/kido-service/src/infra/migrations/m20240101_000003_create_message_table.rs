//! Migration: Create the message table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Message::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Message::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Message::GodparentId).uuid().not_null())
                    .col(ColumnDef::new(Message::ChildId).uuid().not_null())
                    .col(ColumnDef::new(Message::Subject).text().null())
                    .col(
                        ColumnDef::new(Message::TextContent)
                            .string_len(domain::TEXT_CONTENT_MAX_LEN as u32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Message::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Message::SentAt).timestamp_with_time_zone().null())
                    .col(ColumnDef::new(Message::SentOk).boolean().null())
                    .col(ColumnDef::new(Message::Error).text().null())
                    // Parents that still have messages cannot be deleted (NO ACTION)
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_message_godparent")
                            .from(Message::Table, Message::GodparentId)
                            .to(Godparent::Table, Godparent::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_message_child")
                            .from(Message::Table, Message::ChildId)
                            .to(Child::Table, Child::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Pending messages are looked up by sent_ok IS NULL
        manager
            .create_index(
                Index::create()
                    .name("idx_message_sent_ok")
                    .table(Message::Table)
                    .col(Message::SentOk)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Message::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Message {
    Table,
    Id,
    GodparentId,
    ChildId,
    Subject,
    TextContent,
    CreatedAt,
    SentAt,
    SentOk,
    Error,
}

#[derive(DeriveIden)]
enum Child {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Godparent {
    Table,
    Id,
}
