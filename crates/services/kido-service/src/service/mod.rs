//! Service layer - use cases over the repositories.

mod account_service;
mod child_service;
mod message_service;

pub use account_service::{AccountManager, AccountService};
pub use child_service::{ChildManager, ChildService};
pub use message_service::{MessageManager, MessageService};
