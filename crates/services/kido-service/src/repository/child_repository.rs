//! Child repository: child rows plus the guardian/godparent join rows.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    DbErr, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
    TransactionTrait,
};
use uuid::Uuid;

use super::entities::{child, child_to_godparent, child_to_guardian, godparent, guardian};
use common::{AppError, AppResult};
use domain::{Child, ChildToGodparent, ChildToGuardian, Godparent, Guardian};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Child repository trait for dependency injection.
///
/// Link operations do not check for an existing pair; the composite key
/// rejects duplicates and the error surfaces as a constraint violation.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ChildRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Child>>;

    /// Children whose `first_name || ' ' || last_name` equals `fullname`
    async fn find_by_fullname(&self, fullname: &str) -> AppResult<Vec<Child>>;

    /// All children ordered by last then first name
    async fn list(&self) -> AppResult<Vec<Child>>;

    async fn create(&self, child: &Child) -> AppResult<Child>;

    /// Insert a child with an optional new guardian and godparent, linked,
    /// in one transaction.
    async fn create_with_relations(
        &self,
        child: &Child,
        guardian: Option<Guardian>,
        godparent: Option<Godparent>,
    ) -> AppResult<Child>;

    /// Insert a new guardian and link it to the child in one transaction.
    /// Nothing is kept when the link fails.
    async fn add_guardian(&self, child_id: Uuid, guardian: &Guardian) -> AppResult<Guardian>;

    /// Insert a new godparent and link it to the child in one transaction.
    async fn add_godparent(&self, child_id: Uuid, godparent: &Godparent) -> AppResult<Godparent>;

    async fn update(&self, child: &Child) -> AppResult<Child>;

    /// Delete a child; its join rows go with it.
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    async fn guardians(&self, child_id: Uuid) -> AppResult<Vec<Guardian>>;

    async fn godparents(&self, child_id: Uuid) -> AppResult<Vec<Godparent>>;

    async fn link_guardian(&self, child_id: Uuid, guardian_id: Uuid) -> AppResult<ChildToGuardian>;

    async fn unlink_guardian(&self, child_id: Uuid, guardian_id: Uuid) -> AppResult<()>;

    async fn link_godparent(&self, child_id: Uuid, godparent_id: Uuid) -> AppResult<ChildToGodparent>;

    async fn unlink_godparent(&self, child_id: Uuid, godparent_id: Uuid) -> AppResult<()>;
}

/// Insert a guardian row and its link to `child_id`.
async fn insert_guardian<C: ConnectionTrait>(
    conn: &C,
    child_id: Uuid,
    guardian: &Guardian,
) -> Result<guardian::Model, DbErr> {
    let model = guardian::ActiveModel::from(guardian).insert(conn).await?;
    let link = ChildToGuardian::new(child_id, guardian.id);
    child_to_guardian::Entity::insert(child_to_guardian::ActiveModel::from(&link))
        .exec_without_returning(conn)
        .await?;
    Ok(model)
}

/// Insert a godparent row and its link to `child_id`.
async fn insert_godparent<C: ConnectionTrait>(
    conn: &C,
    child_id: Uuid,
    godparent: &Godparent,
) -> Result<godparent::Model, DbErr> {
    let model = godparent::ActiveModel::from(godparent).insert(conn).await?;
    let link = ChildToGodparent::new(child_id, godparent.id);
    child_to_godparent::Entity::insert(child_to_godparent::ActiveModel::from(&link))
        .exec_without_returning(conn)
        .await?;
    Ok(model)
}

/// Commit on success, roll back on error.
async fn settle<T>(txn: DatabaseTransaction, result: Result<T, DbErr>) -> AppResult<T> {
    match result {
        Ok(value) => {
            txn.commit().await?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback_err) = txn.rollback().await {
                tracing::error!("Transaction rollback failed: {}", rollback_err);
            }
            Err(e.into())
        }
    }
}

/// Concrete implementation of ChildRepository
pub struct ChildStore {
    db: DatabaseConnection,
}

impl ChildStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ChildRepository for ChildStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Child>> {
        let result = child::Entity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Child::from))
    }

    async fn find_by_fullname(&self, fullname: &str) -> AppResult<Vec<Child>> {
        let models = child::Entity::find()
            .filter(Expr::expr(child::Entity::fullname_expr()).eq(fullname))
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Child::from).collect())
    }

    async fn list(&self) -> AppResult<Vec<Child>> {
        let models = child::Entity::find()
            .order_by_asc(child::Column::LastName)
            .order_by_asc(child::Column::FirstName)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Child::from).collect())
    }

    async fn create(&self, child: &Child) -> AppResult<Child> {
        let model = child::ActiveModel::from(child).insert(&self.db).await?;
        Ok(Child::from(model))
    }

    async fn create_with_relations(
        &self,
        child: &Child,
        guardian: Option<Guardian>,
        godparent: Option<Godparent>,
    ) -> AppResult<Child> {
        let txn = self.db.begin().await?;

        let result = async {
            let model = child::ActiveModel::from(child).insert(&txn).await?;
            if let Some(guardian) = &guardian {
                insert_guardian(&txn, child.id, guardian).await?;
            }
            if let Some(godparent) = &godparent {
                insert_godparent(&txn, child.id, godparent).await?;
            }
            Ok::<_, DbErr>(model)
        }
        .await;

        let model = settle(txn, result).await?;
        Ok(Child::from(model))
    }

    async fn add_guardian(&self, child_id: Uuid, guardian: &Guardian) -> AppResult<Guardian> {
        let txn = self.db.begin().await?;
        let result = insert_guardian(&txn, child_id, guardian).await;
        let model = settle(txn, result).await?;

        tracing::info!(%child_id, guardian_id = %model.id, "Guardian added");
        Ok(Guardian::from(model))
    }

    async fn add_godparent(&self, child_id: Uuid, godparent: &Godparent) -> AppResult<Godparent> {
        let txn = self.db.begin().await?;
        let result = insert_godparent(&txn, child_id, godparent).await;
        let model = settle(txn, result).await?;

        tracing::info!(%child_id, godparent_id = %model.id, "Godparent added");
        Ok(Godparent::from(model))
    }

    async fn update(&self, child: &Child) -> AppResult<Child> {
        let model = child::ActiveModel::from(child).update(&self.db).await?;
        Ok(Child::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = child::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn guardians(&self, child_id: Uuid) -> AppResult<Vec<Guardian>> {
        let models = guardian::Entity::find()
            .join(JoinType::InnerJoin, guardian::Relation::ChildToGuardian.def())
            .filter(child_to_guardian::Column::ChildId.eq(child_id))
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Guardian::from).collect())
    }

    async fn godparents(&self, child_id: Uuid) -> AppResult<Vec<Godparent>> {
        let models = godparent::Entity::find()
            .join(JoinType::InnerJoin, godparent::Relation::ChildToGodparent.def())
            .filter(child_to_godparent::Column::ChildId.eq(child_id))
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Godparent::from).collect())
    }

    async fn link_guardian(&self, child_id: Uuid, guardian_id: Uuid) -> AppResult<ChildToGuardian> {
        let link = ChildToGuardian::new(child_id, guardian_id);
        child_to_guardian::Entity::insert(child_to_guardian::ActiveModel::from(&link))
            .exec_without_returning(&self.db)
            .await?;

        tracing::info!(%child_id, %guardian_id, "Guardian linked");
        Ok(link)
    }

    async fn unlink_guardian(&self, child_id: Uuid, guardian_id: Uuid) -> AppResult<()> {
        let result = child_to_guardian::Entity::delete_by_id((child_id, guardian_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn link_godparent(&self, child_id: Uuid, godparent_id: Uuid) -> AppResult<ChildToGodparent> {
        let link = ChildToGodparent::new(child_id, godparent_id);
        child_to_godparent::Entity::insert(child_to_godparent::ActiveModel::from(&link))
            .exec_without_returning(&self.db)
            .await?;

        tracing::info!(%child_id, %godparent_id, "Godparent linked");
        Ok(link)
    }

    async fn unlink_godparent(&self, child_id: Uuid, godparent_id: Uuid) -> AppResult<()> {
        let result = child_to_godparent::Entity::delete_by_id((child_id, godparent_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
