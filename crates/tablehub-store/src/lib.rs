//! # tablehub-store
//!
//! Reservation store and game catalog backends for TableHub. Supports two
//! modes:
//!
//! - **memory**: in-process store guarded by Tokio locks
//! - **redis**: Redis-backed store using Lua scripts for conditional appends
//!
//! The backend is selected at runtime based on configuration.

pub mod dataset;
pub mod keys;
pub mod memory;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;
pub mod traits;

pub use dataset::Dataset;
pub use provider::StoreManager;
pub use traits::{CapacityOutcome, GameCatalog, ReservationStore};
