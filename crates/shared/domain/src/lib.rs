//! Domain layer - Core entities and value objects for Kid-O.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.

pub mod association;
pub mod child;
pub mod constants;
pub mod constraints;
pub mod error;
pub mod guardian;
pub mod message;
pub mod password;
pub mod user;

pub use association::{ChildToGodparent, ChildToGuardian};
pub use child::{Child, ChildSnapshot, NewChild};
pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use guardian::{Godparent, Guardian, NewGodparent, NewGuardian};
pub use message::{Message, MessageStatus, NewMessage};
pub use password::Password;
pub use user::{NewUser, User, UserResponse};
