//! Message service - compose messages to godparents and record dispatch outcomes.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use common::{AppResult, OptionExt};
use domain::{Message, NewMessage};

use crate::repository::MessageRepository;

#[async_trait]
pub trait MessageService: Send + Sync {
    /// Store a new pending message. A missing child or godparent is
    /// rejected by storage as a constraint violation.
    async fn compose(&self, data: NewMessage) -> AppResult<Message>;

    async fn get_message(&self, id: Uuid) -> AppResult<Message>;

    async fn record_sent(&self, id: Uuid) -> AppResult<Message>;

    async fn record_failure(&self, id: Uuid, error: &str) -> AppResult<Message>;

    async fn pending(&self) -> AppResult<Vec<Message>>;

    async fn for_child(&self, child_id: Uuid) -> AppResult<Vec<Message>>;

    async fn for_godparent(&self, godparent_id: Uuid) -> AppResult<Vec<Message>>;
}

pub struct MessageManager {
    messages: Arc<dyn MessageRepository>,
}

impl MessageManager {
    pub fn new(messages: Arc<dyn MessageRepository>) -> Self {
        Self { messages }
    }
}

#[async_trait]
impl MessageService for MessageManager {
    async fn compose(&self, data: NewMessage) -> AppResult<Message> {
        let message = Message::new(data)?;
        let message = self.messages.create(&message).await?;

        tracing::info!(
            message_id = %message.id,
            child_id = %message.child_id,
            godparent_id = %message.godparent_id,
            "Message queued"
        );
        Ok(message)
    }

    async fn get_message(&self, id: Uuid) -> AppResult<Message> {
        self.messages.find_by_id(id).await?.ok_or_not_found()
    }

    async fn record_sent(&self, id: Uuid) -> AppResult<Message> {
        let mut message = self.get_message(id).await?;
        message.record_sent(Utc::now())?;

        let message = self.messages.save_outcome(&message).await?;
        tracing::info!(message_id = %id, "Message sent");
        Ok(message)
    }

    async fn record_failure(&self, id: Uuid, error: &str) -> AppResult<Message> {
        let mut message = self.get_message(id).await?;
        message.record_failure(Utc::now(), error)?;

        let message = self.messages.save_outcome(&message).await?;
        tracing::warn!(message_id = %id, error, "Message dispatch failed");
        Ok(message)
    }

    async fn pending(&self) -> AppResult<Vec<Message>> {
        self.messages.pending().await
    }

    async fn for_child(&self, child_id: Uuid) -> AppResult<Vec<Message>> {
        self.messages.for_child(child_id).await
    }

    async fn for_godparent(&self, godparent_id: Uuid) -> AppResult<Vec<Message>> {
        self.messages.for_godparent(godparent_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::AppError;
    use domain::MessageStatus;
    use mockall::predicate::eq;

    use crate::repository::MockMessageRepository;

    fn new_message() -> NewMessage {
        NewMessage {
            godparent_id: Uuid::new_v4(),
            child_id: Uuid::new_v4(),
            subject: Some("Birthday".to_string()),
            text_content: "Lucia turned ten today.".to_string(),
        }
    }

    #[tokio::test]
    async fn test_compose_stores_pending_message() {
        let mut repo = MockMessageRepository::new();
        repo.expect_create()
            .withf(|m| m.is_pending())
            .times(1)
            .returning(|m| Ok(m.clone()));

        let message = MessageManager::new(Arc::new(repo))
            .compose(new_message())
            .await
            .unwrap();
        assert_eq!(message.status(), MessageStatus::Pending);
    }

    #[tokio::test]
    async fn test_compose_rejects_empty_text() {
        let mut repo = MockMessageRepository::new();
        repo.expect_create().never();

        let mut data = new_message();
        data.text_content = String::new();

        let result = MessageManager::new(Arc::new(repo)).compose(data).await;
        assert!(matches!(result, Err(AppError::ConstraintViolation(_))));
    }

    #[tokio::test]
    async fn test_record_failure_saves_error_text() {
        let stored = Message::new(new_message()).unwrap();
        let id = stored.id;

        let mut repo = MockMessageRepository::new();
        repo.expect_find_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(stored.clone())));
        repo.expect_save_outcome()
            .withf(|m| m.sent_ok == Some(false) && m.sent_at.is_some())
            .times(1)
            .returning(|m| Ok(m.clone()));

        let message = MessageManager::new(Arc::new(repo))
            .record_failure(id, "mailbox unavailable")
            .await
            .unwrap();
        assert_eq!(message.error.as_deref(), Some("mailbox unavailable"));
        assert_eq!(message.status(), MessageStatus::Failed);
    }

    #[tokio::test]
    async fn test_record_sent_twice_is_conflict() {
        let mut stored = Message::new(new_message()).unwrap();
        stored.record_sent(Utc::now()).unwrap();
        let id = stored.id;

        let mut repo = MockMessageRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(stored.clone())));
        repo.expect_save_outcome().never();

        let result = MessageManager::new(Arc::new(repo)).record_sent(id).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_record_sent_unknown_message() {
        let mut repo = MockMessageRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let result = MessageManager::new(Arc::new(repo))
            .record_sent(Uuid::new_v4())
            .await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }
}
