//! Reservation listing and cancellation.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use tablehub_core::error::AppError;
use tablehub_core::types::ReservationId;
use tablehub_entity::reservation::Reservation;

use super::Context;
use crate::output;

/// Arguments for the cancel command
#[derive(Debug, Args)]
pub struct CancelArgs {
    /// Reservation id
    pub id: String,
}

/// Reservation display row for table output
#[derive(Debug, Serialize, Tabled)]
pub(crate) struct ReservationRow {
    /// Reservation ID
    id: String,
    /// Booking user
    user: String,
    /// Game or table
    game: String,
    /// Party size
    players: u32,
    /// Day
    day: String,
    /// Start time
    time: String,
    /// Length
    duration: String,
}

impl From<&Reservation> for ReservationRow {
    fn from(r: &Reservation) -> Self {
        Self {
            id: r.id.to_string(),
            user: r.user_id.to_string(),
            game: r.resource_id.clone(),
            players: r.players,
            day: r.day.format("%Y-%m-%d").to_string(),
            time: r.time.to_string(),
            duration: r
                .duration_minutes
                .map(|d| format!("{d} min"))
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// List stored reservations
pub async fn list(ctx: &Context) -> Result<(), AppError> {
    let reservations = ctx.admin.list_reservations().await?;
    let rows: Vec<ReservationRow> = reservations.iter().map(ReservationRow::from).collect();
    output::print_list(&rows, ctx.format);
    Ok(())
}

/// Cancel a reservation by id
pub async fn cancel(args: &CancelArgs, ctx: &Context) -> Result<(), AppError> {
    let id: ReservationId = args
        .id
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid reservation id '{}'", args.id)))?;
    ctx.admin.delete_reservation(&id).await?;
    output::print_success(&format!("Reservation {id} cancelled"));
    Ok(())
}
