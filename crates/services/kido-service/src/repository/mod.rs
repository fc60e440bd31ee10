//! Repository layer for data access.
//!
//! One trait per aggregate. Related collections are never loaded with their
//! parent; each is its own query, run when asked for.

pub mod entities;
mod child_repository;
mod godparent_repository;
mod guardian_repository;
mod message_repository;
mod user_repository;

pub use child_repository::{ChildRepository, ChildStore};
pub use godparent_repository::{GodparentRepository, GodparentStore};
pub use guardian_repository::{GuardianRepository, GuardianStore};
pub use message_repository::{MessageRepository, MessageStore};
pub use user_repository::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use child_repository::MockChildRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use godparent_repository::MockGodparentRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use guardian_repository::MockGuardianRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use message_repository::MockMessageRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
