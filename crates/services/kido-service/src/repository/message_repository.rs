//! Message repository implementation.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use super::entities::message;
use common::{AppError, AppResult};
use domain::Message;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Message>>;

    async fn create(&self, message: &Message) -> AppResult<Message>;

    /// Persist `sent_at`, `sent_ok` and `error` of a resolved message.
    ///
    /// Only a row that is still pending is written; a message already
    /// resolved by another caller yields `Conflict`.
    async fn save_outcome(&self, message: &Message) -> AppResult<Message>;

    /// Messages about a child, oldest first
    async fn for_child(&self, child_id: Uuid) -> AppResult<Vec<Message>>;

    /// Messages to a godparent, oldest first
    async fn for_godparent(&self, godparent_id: Uuid) -> AppResult<Vec<Message>>;

    /// Messages not yet dispatched, oldest first
    async fn pending(&self) -> AppResult<Vec<Message>>;
}

pub struct MessageStore {
    db: DatabaseConnection,
}

impl MessageStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MessageRepository for MessageStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Message>> {
        let result = message::Entity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Message::from))
    }

    async fn create(&self, message: &Message) -> AppResult<Message> {
        let model = message::ActiveModel::from(message).insert(&self.db).await?;
        Ok(Message::from(model))
    }

    async fn save_outcome(&self, message: &Message) -> AppResult<Message> {
        let result = message::Entity::update_many()
            .col_expr(message::Column::SentAt, Expr::value(message.sent_at))
            .col_expr(message::Column::SentOk, Expr::value(message.sent_ok))
            .col_expr(message::Column::Error, Expr::value(message.error.clone()))
            .filter(message::Column::Id.eq(message.id))
            .filter(message::Column::SentOk.is_null())
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return match self.find_by_id(message.id).await? {
                Some(_) => Err(AppError::conflict(format!(
                    "message {} is already resolved",
                    message.id
                ))),
                None => Err(AppError::NotFound),
            };
        }

        Ok(message.clone())
    }

    async fn for_child(&self, child_id: Uuid) -> AppResult<Vec<Message>> {
        let models = message::Entity::find()
            .filter(message::Column::ChildId.eq(child_id))
            .order_by_asc(message::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Message::from).collect())
    }

    async fn for_godparent(&self, godparent_id: Uuid) -> AppResult<Vec<Message>> {
        let models = message::Entity::find()
            .filter(message::Column::GodparentId.eq(godparent_id))
            .order_by_asc(message::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Message::from).collect())
    }

    async fn pending(&self) -> AppResult<Vec<Message>> {
        let models = message::Entity::find()
            .filter(message::Column::SentOk.is_null())
            .order_by_asc(message::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Message::from).collect())
    }
}
