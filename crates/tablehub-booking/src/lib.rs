//! # tablehub-booking
//!
//! Booking logic for TableHub. The availability checker answers whether a
//! resource has a free copy for a window; the admission controller turns a
//! positive answer into a stored reservation without over-booking under
//! concurrent requests. Policy and service layers sit on top.
//!
//! Services follow constructor injection: stores are provided at
//! construction time via `Arc` references.

pub mod admin;
pub mod admission;
pub mod checker;
pub mod lock;
pub mod policy;
pub mod service;
mod timeout;

#[cfg(test)]
pub(crate) mod test_support;

pub use admin::AdminService;
pub use admission::AdmissionController;
pub use checker::AvailabilityChecker;
pub use lock::KeyedLock;
pub use policy::BookingPolicy;
pub use service::BookingService;
