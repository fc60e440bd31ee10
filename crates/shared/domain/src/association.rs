//! Join records for the child ↔ guardian and child ↔ godparent links.
//!
//! The pair is the identity: storage holds at most one row per pair and
//! rejects a second insert with a constraint violation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildToGuardian {
    pub child_id: Uuid,
    pub guardian_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl ChildToGuardian {
    pub fn new(child_id: Uuid, guardian_id: Uuid) -> Self {
        Self {
            child_id,
            guardian_id,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildToGodparent {
    pub child_id: Uuid,
    pub godparent_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl ChildToGodparent {
    pub fn new(child_id: Uuid, godparent_id: Uuid) -> Self {
        Self {
            child_id,
            godparent_id,
            created_at: Utc::now(),
        }
    }
}
