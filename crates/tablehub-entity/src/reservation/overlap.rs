//! Overlap counting against existing reservations.

use tracing::debug;

use tablehub_core::types::SlotWindow;

use super::document::ReservationDocument;

/// Count the documents whose window overlaps `requested`.
///
/// Documents without a usable time and duration are skipped.
pub fn count_overlaps<'a, I>(requested: &SlotWindow, documents: I) -> u32
where
    I: IntoIterator<Item = &'a ReservationDocument>,
{
    let mut overlapping = 0;
    for document in documents {
        match document.window() {
            Some(window) if window.overlaps(requested) => overlapping += 1,
            Some(_) => {}
            None => debug!(id = ?document.id, "Skipping reservation without a usable time window"),
        }
    }
    overlapping
}
