//! Godparent database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::Godparent;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "godparent")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::message::Entity")]
    Message,
    #[sea_orm(has_many = "super::child_to_godparent::Entity")]
    ChildToGodparent,
}

impl Related<super::message::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Message.def()
    }
}

impl Related<super::child::Entity> for Entity {
    fn to() -> RelationDef {
        super::child_to_godparent::Relation::Child.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::child_to_godparent::Relation::Godparent.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Godparent {
    fn from(model: Model) -> Self {
        Godparent {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
        }
    }
}

impl From<&Godparent> for ActiveModel {
    fn from(godparent: &Godparent) -> Self {
        ActiveModel {
            id: Set(godparent.id),
            first_name: Set(godparent.first_name.clone()),
            last_name: Set(godparent.last_name.clone()),
            email: Set(godparent.email.clone()),
        }
    }
}
