//! SeaORM entities, one module per table.

pub mod child;
pub mod child_to_godparent;
pub mod child_to_guardian;
pub mod godparent;
pub mod guardian;
pub mod message;
pub mod user;
