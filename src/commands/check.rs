//! Availability check command.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use tablehub_core::error::AppError;

use super::Context;
use crate::output;

/// Arguments for the check command
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Game name
    pub game: String,
    /// Day, `YYYY-MM-DD`
    pub day: String,
    /// Start time, `HH:MM`
    pub time: String,
}

/// Check result for output
#[derive(Debug, Serialize, Tabled)]
struct CheckRow {
    game: String,
    day: String,
    time: String,
    available: bool,
}

/// Execute the check command
pub async fn execute(args: &CheckArgs, ctx: &Context) -> Result<(), AppError> {
    let available = ctx
        .booking
        .availability(&args.game, &args.day, &args.time)
        .await?;

    let row = CheckRow {
        game: args.game.clone(),
        day: args.day.clone(),
        time: args.time.clone(),
        available,
    };
    output::print_item(&row, ctx.format);
    Ok(())
}
