//! Guardian repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter,
    QuerySelect, RelationTrait,
};
use uuid::Uuid;

use super::entities::{child, child_to_guardian, guardian};
use common::{AppError, AppResult};
use domain::{Child, Guardian};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait GuardianRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Guardian>>;

    async fn create(&self, guardian: &Guardian) -> AppResult<Guardian>;

    /// Children this guardian is linked to
    async fn children(&self, guardian_id: Uuid) -> AppResult<Vec<Child>>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct GuardianStore {
    db: DatabaseConnection,
}

impl GuardianStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GuardianRepository for GuardianStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Guardian>> {
        let result = guardian::Entity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Guardian::from))
    }

    async fn create(&self, guardian: &Guardian) -> AppResult<Guardian> {
        let model = guardian::ActiveModel::from(guardian).insert(&self.db).await?;
        Ok(Guardian::from(model))
    }

    async fn children(&self, guardian_id: Uuid) -> AppResult<Vec<Child>> {
        let models = child::Entity::find()
            .join(JoinType::InnerJoin, child::Relation::ChildToGuardian.def())
            .filter(child_to_guardian::Column::GuardianId.eq(guardian_id))
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Child::from).collect())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = guardian::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
