//! Admission outcomes.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::model::Reservation;

/// Result of an admission request that reached a decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Admission {
    /// The reservation was written.
    Admitted(Reservation),
    /// The reservation was refused; nothing was written.
    Rejected(Rejection),
}

impl Admission {
    /// The admitted reservation, if any.
    pub fn reservation(&self) -> Option<&Reservation> {
        match self {
            Self::Admitted(reservation) => Some(reservation),
            Self::Rejected(_) => None,
        }
    }

    /// Whether the request was admitted.
    pub fn is_admitted(&self) -> bool {
        matches!(self, Self::Admitted(_))
    }
}

/// Why a request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// Every copy is already booked for an overlapping window.
    NoCapacity,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCapacity => write!(f, "no capacity"),
        }
    }
}

/// A refused admission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rejection {
    /// Reason for refusal.
    pub reason: RejectionReason,
    /// Overlapping reservations seen when the decision was made.
    pub overlapping: u32,
    /// Stock the request was checked against.
    pub stock: u32,
}

impl Rejection {
    /// Refusal for want of a free copy.
    pub fn no_capacity(overlapping: u32, stock: u32) -> Self {
        Self {
            reason: RejectionReason::NoCapacity,
            overlapping,
            stock,
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} overlapping of {} available)",
            self.reason, self.overlapping, self.stock
        )
    }
}
