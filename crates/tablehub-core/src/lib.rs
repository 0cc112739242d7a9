//! # tablehub-core
//!
//! Core crate for TableHub. Contains configuration schemas, typed
//! identifiers, time-of-day and slot window types, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other TableHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
