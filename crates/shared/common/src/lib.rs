//! Common utilities shared across the Kid-O crates.
//!
//! This crate provides:
//! - Unified application error type with storage-error translation
//! - Configuration structures

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult, FieldErrors, OptionExt};
