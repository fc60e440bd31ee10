//! Child database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{BinOper, Expr, SimpleExpr};
use sea_orm::Set;

use domain::Child;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "child")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub pic_url: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub nick_name: String,
    pub birth_date: DateTimeUtc,
    pub nationality: Option<String>,
    pub school_year: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub situation: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub activity: Option<bool>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::message::Entity")]
    Message,
    #[sea_orm(has_many = "super::child_to_guardian::Entity")]
    ChildToGuardian,
    #[sea_orm(has_many = "super::child_to_godparent::Entity")]
    ChildToGodparent,
}

impl Related<super::message::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Message.def()
    }
}

impl Related<super::guardian::Entity> for Entity {
    fn to() -> RelationDef {
        super::child_to_guardian::Relation::Guardian.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::child_to_guardian::Relation::Child.def().rev())
    }
}

impl Related<super::godparent::Entity> for Entity {
    fn to() -> RelationDef {
        super::child_to_godparent::Relation::Godparent.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::child_to_godparent::Relation::Child.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Entity {
    /// `first_name || ' ' || last_name`, the query-side form of
    /// [`Child::fullname`].
    pub fn fullname_expr() -> SimpleExpr {
        Expr::col((Entity, Column::FirstName))
            .binary(BinOper::Custom("||"), Expr::val(" "))
            .binary(BinOper::Custom("||"), Expr::col((Entity, Column::LastName)))
    }
}

/// Convert database model to domain entity
impl From<Model> for Child {
    fn from(model: Model) -> Self {
        Child {
            id: model.id,
            pic_url: model.pic_url,
            first_name: model.first_name,
            last_name: model.last_name,
            nick_name: model.nick_name,
            birth_date: model.birth_date,
            nationality: model.nationality,
            school_year: model.school_year,
            situation: model.situation,
            latitude: model.latitude,
            longitude: model.longitude,
            activity: model.activity,
        }
    }
}

impl From<&Child> for ActiveModel {
    fn from(child: &Child) -> Self {
        ActiveModel {
            id: Set(child.id),
            pic_url: Set(child.pic_url.clone()),
            first_name: Set(child.first_name.clone()),
            last_name: Set(child.last_name.clone()),
            nick_name: Set(child.nick_name.clone()),
            birth_date: Set(child.birth_date),
            nationality: Set(child.nationality.clone()),
            school_year: Set(child.school_year.clone()),
            situation: Set(child.situation.clone()),
            latitude: Set(child.latitude),
            longitude: Set(child.longitude),
            activity: Set(child.activity),
        }
    }
}
