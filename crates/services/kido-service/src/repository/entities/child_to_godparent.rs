//! Child ↔ godparent join entity. Composite primary key (child_id, godparent_id).

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::ChildToGodparent;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "child_to_godparent")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub child_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub godparent_id: Uuid,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::child::Entity",
        from = "Column::ChildId",
        to = "super::child::Column::Id",
        on_delete = "Cascade"
    )]
    Child,
    #[sea_orm(
        belongs_to = "super::godparent::Entity",
        from = "Column::GodparentId",
        to = "super::godparent::Column::Id",
        on_delete = "Cascade"
    )]
    Godparent,
}

impl Related<super::child::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Child.def()
    }
}

impl Related<super::godparent::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Godparent.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ChildToGodparent {
    fn from(model: Model) -> Self {
        ChildToGodparent {
            child_id: model.child_id,
            godparent_id: model.godparent_id,
            created_at: model.created_at,
        }
    }
}

impl From<&ChildToGodparent> for ActiveModel {
    fn from(link: &ChildToGodparent) -> Self {
        ActiveModel {
            child_id: Set(link.child_id),
            godparent_id: Set(link.godparent_id),
            created_at: Set(link.created_at),
        }
    }
}
