//! Godparent repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter,
    QuerySelect, RelationTrait,
};
use uuid::Uuid;

use super::entities::{child, child_to_godparent, godparent};
use common::{AppError, AppResult};
use domain::{Child, Godparent};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait GodparentRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Godparent>>;

    /// Find godparents by email. Callers pass the lowercased form.
    async fn find_by_email(&self, email: &str) -> AppResult<Vec<Godparent>>;

    async fn create(&self, godparent: &Godparent) -> AppResult<Godparent>;

    /// Children this godparent sponsors
    async fn children(&self, godparent_id: Uuid) -> AppResult<Vec<Child>>;

    /// Delete a godparent. Fails while messages still reference it.
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct GodparentStore {
    db: DatabaseConnection,
}

impl GodparentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GodparentRepository for GodparentStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Godparent>> {
        let result = godparent::Entity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Godparent::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Vec<Godparent>> {
        let models = godparent::Entity::find()
            .filter(godparent::Column::Email.eq(email))
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Godparent::from).collect())
    }

    async fn create(&self, godparent: &Godparent) -> AppResult<Godparent> {
        let model = godparent::ActiveModel::from(godparent).insert(&self.db).await?;
        Ok(Godparent::from(model))
    }

    async fn children(&self, godparent_id: Uuid) -> AppResult<Vec<Child>> {
        let models = child::Entity::find()
            .join(JoinType::InnerJoin, child::Relation::ChildToGodparent.def())
            .filter(child_to_godparent::Column::GodparentId.eq(godparent_id))
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Child::from).collect())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = godparent::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
