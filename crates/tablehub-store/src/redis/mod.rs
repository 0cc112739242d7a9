//! Redis store backends.

pub mod catalog;
pub mod client;
pub mod operations;
mod scripts;

pub use catalog::RedisGameCatalog;
pub use client::RedisClient;
pub use operations::RedisReservationStore;
