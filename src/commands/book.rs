//! Booking commands.

use clap::Args;

use tablehub_core::error::AppError;
use tablehub_core::types::UserId;
use tablehub_entity::reservation::Admission;

use super::Context;
use super::reservations::ReservationRow;
use crate::output::{self, OutputFormat};

/// Arguments for the book command
#[derive(Debug, Args)]
pub struct BookArgs {
    /// Booking user
    pub user: String,
    /// Game name
    pub game: String,
    /// Party size
    pub players: u32,
    /// Day, `YYYY-MM-DD`
    pub day: String,
    /// Start time, `HH:MM`
    pub time: String,
}

/// Arguments for the book-table command
#[derive(Debug, Args)]
pub struct BookTableArgs {
    /// Booking user
    pub user: String,
    /// Party size
    pub players: u32,
    /// Day, `YYYY-MM-DD`
    pub day: String,
    /// Start time, `HH:MM`
    pub time: String,
}

/// Book a game
pub async fn execute(args: &BookArgs, ctx: &Context) -> Result<(), AppError> {
    let outcome = ctx
        .booking
        .book_game(
            UserId::new(args.user.as_str()),
            &args.game,
            args.players,
            &args.day,
            &args.time,
        )
        .await?;
    report(&outcome, ctx.format);
    Ok(())
}

/// Book a table without a game
pub async fn execute_table(args: &BookTableArgs, ctx: &Context) -> Result<(), AppError> {
    let outcome = ctx
        .booking
        .book_table(
            UserId::new(args.user.as_str()),
            args.players,
            &args.day,
            &args.time,
        )
        .await?;
    report(&outcome, ctx.format);
    Ok(())
}

fn report(outcome: &Admission, format: OutputFormat) {
    if format == OutputFormat::Json {
        output::print_json(outcome, "{}");
        return;
    }

    match outcome {
        Admission::Admitted(reservation) => {
            output::print_success("Reservation confirmed");
            output::print_item(&ReservationRow::from(reservation), format);
        }
        Admission::Rejected(rejection) => {
            output::print_warning(&format!("Reservation refused: {rejection}"));
            output::print_kv("Overlapping", &rejection.overlapping.to_string());
            output::print_kv("Stock", &rejection.stock.to_string());
        }
    }
}
