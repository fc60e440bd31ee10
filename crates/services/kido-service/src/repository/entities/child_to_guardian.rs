//! Child ↔ guardian join entity. Composite primary key (child_id, guardian_id).

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::ChildToGuardian;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "child_to_guardian")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub child_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub guardian_id: Uuid,
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
        belongs_to = "super::guardian::Entity",
        from = "Column::GuardianId",
        to = "super::guardian::Column::Id",
        on_delete = "Cascade"
    )]
    Guardian,
}

impl Related<super::child::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Child.def()
    }
}

impl Related<super::guardian::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Guardian.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ChildToGuardian {
    fn from(model: Model) -> Self {
        ChildToGuardian {
            child_id: model.child_id,
            guardian_id: model.guardian_id,
            created_at: model.created_at,
        }
    }
}

impl From<&ChildToGuardian> for ActiveModel {
    fn from(link: &ChildToGuardian) -> Self {
        ActiveModel {
            child_id: Set(link.child_id),
            guardian_id: Set(link.guardian_id),
            created_at: Set(link.created_at),
        }
    }
}
