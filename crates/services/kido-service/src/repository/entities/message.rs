//! Message database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::Message;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "message")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub godparent_id: Uuid,
    pub child_id: Uuid,
    #[sea_orm(column_type = "Text", nullable)]
    pub subject: Option<String>,
    pub text_content: String,
    pub created_at: DateTimeUtc,
    pub sent_at: Option<DateTimeUtc>,
    pub sent_ok: Option<bool>,
    #[sea_orm(column_type = "Text", nullable)]
    pub error: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::godparent::Entity",
        from = "Column::GodparentId",
        to = "super::godparent::Column::Id"
    )]
    Godparent,
    #[sea_orm(
        belongs_to = "super::child::Entity",
        from = "Column::ChildId",
        to = "super::child::Column::Id"
    )]
    Child,
}

impl Related<super::godparent::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Godparent.def()
    }
}

impl Related<super::child::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Child.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Message {
    fn from(model: Model) -> Self {
        Message {
            id: model.id,
            godparent_id: model.godparent_id,
            child_id: model.child_id,
            subject: model.subject,
            text_content: model.text_content,
            created_at: model.created_at,
            sent_at: model.sent_at,
            sent_ok: model.sent_ok,
            error: model.error,
        }
    }
}

impl From<&Message> for ActiveModel {
    fn from(message: &Message) -> Self {
        ActiveModel {
            id: Set(message.id),
            godparent_id: Set(message.godparent_id),
            child_id: Set(message.child_id),
            subject: Set(message.subject.clone()),
            text_content: Set(message.text_content.clone()),
            created_at: Set(message.created_at),
            sent_at: Set(message.sent_at),
            sent_ok: Set(message.sent_ok),
            error: Set(message.error.clone()),
        }
    }
}
