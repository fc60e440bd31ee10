//! Guardian database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::Guardian;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "guardian")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub guardian_type: Option<String>,
    pub guardian_fname: Option<String>,
    pub guardian_lname: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::child_to_guardian::Entity")]
    ChildToGuardian,
}

impl Related<super::child::Entity> for Entity {
    fn to() -> RelationDef {
        super::child_to_guardian::Relation::Child.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::child_to_guardian::Relation::Guardian.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Guardian {
    fn from(model: Model) -> Self {
        Guardian {
            id: model.id,
            guardian_type: model.guardian_type,
            guardian_fname: model.guardian_fname,
            guardian_lname: model.guardian_lname,
        }
    }
}

impl From<&Guardian> for ActiveModel {
    fn from(guardian: &Guardian) -> Self {
        ActiveModel {
            id: Set(guardian.id),
            guardian_type: Set(guardian.guardian_type.clone()),
            guardian_fname: Set(guardian.guardian_fname.clone()),
            guardian_lname: Set(guardian.guardian_lname.clone()),
        }
    }
}
