//! Messages to godparents about a child.
//!
//! A message is created pending and resolved exactly once, either as sent or
//! as failed with the error text. Nothing here retries a failed send.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::TEXT_CONTENT_MAX_LEN;
use crate::constraints::{max_len, required};
use crate::error::{DomainError, DomainResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub godparent_id: Uuid,
    pub child_id: Uuid,
    pub subject: Option<String>,
    pub text_content: String,
    pub created_at: DateTime<Utc>,
    pub sent_at: Option<DateTime<Utc>>,
    pub sent_ok: Option<bool>,
    pub error: Option<String>,
}

/// Dispatch state derived from `sent_at`, `sent_ok` and `error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Pending,
    Sent,
    Failed,
}

impl Message {
    /// Create a pending message with a fresh id.
    pub fn new(data: NewMessage) -> DomainResult<Self> {
        data.check_constraints()?;
        Ok(Self {
            id: Uuid::new_v4(),
            godparent_id: data.godparent_id,
            child_id: data.child_id,
            subject: data.subject,
            text_content: data.text_content,
            created_at: Utc::now(),
            sent_at: None,
            sent_ok: None,
            error: None,
        })
    }

    pub fn status(&self) -> MessageStatus {
        match self.sent_ok {
            None => MessageStatus::Pending,
            Some(true) => MessageStatus::Sent,
            Some(false) => MessageStatus::Failed,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status() == MessageStatus::Pending
    }

    /// Record a successful dispatch.
    pub fn record_sent(&mut self, at: DateTime<Utc>) -> DomainResult<()> {
        self.ensure_pending()?;
        self.sent_at = Some(at);
        self.sent_ok = Some(true);
        Ok(())
    }

    /// Record a failed dispatch attempt with its error detail.
    pub fn record_failure(&mut self, at: DateTime<Utc>, error: impl Into<String>) -> DomainResult<()> {
        self.ensure_pending()?;
        self.sent_at = Some(at);
        self.sent_ok = Some(false);
        self.error = Some(error.into());
        Ok(())
    }

    fn ensure_pending(&self) -> DomainResult<()> {
        if !self.is_pending() {
            return Err(DomainError::conflict(format!(
                "message {} is already resolved",
                self.id
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewMessage {
    pub godparent_id: Uuid,
    pub child_id: Uuid,
    pub subject: Option<String>,
    pub text_content: String,
}

impl NewMessage {
    pub fn check_constraints(&self) -> DomainResult<()> {
        required("text_content", &self.text_content)?;
        max_len("text_content", &self.text_content, TEXT_CONTENT_MAX_LEN)
    }
}
