//! In-memory store backends.

pub mod catalog;
pub mod store;

pub use catalog::MemoryGameCatalog;
pub use store::MemoryReservationStore;
