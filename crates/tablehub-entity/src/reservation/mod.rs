//! Reservation entities, availability queries, and admission outcomes.

pub mod admission;
pub mod document;
pub mod model;
pub mod overlap;
pub mod query;

pub use admission::{Admission, Rejection, RejectionReason};
pub use document::ReservationDocument;
pub use model::Reservation;
pub use overlap::count_overlaps;
pub use query::AvailabilityQuery;
