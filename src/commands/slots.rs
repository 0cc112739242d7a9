//! Bookable slot listing.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use tablehub_core::error::AppError;

use super::Context;
use crate::output;

/// Arguments for the slots command
#[derive(Debug, Args)]
pub struct SlotsArgs {
    /// Show availability of this game on `--day`
    #[arg(long, requires = "day")]
    pub game: Option<String>,
    /// Day to check, `YYYY-MM-DD`
    #[arg(long, requires = "game")]
    pub day: Option<String>,
}

/// Slot display row for table output
#[derive(Debug, Serialize, Tabled)]
struct SlotRow {
    /// Start time
    time: String,
    /// Free copy available
    available: String,
}

/// Execute the slots command
pub async fn execute(args: &SlotsArgs, ctx: &Context) -> Result<(), AppError> {
    let slots = ctx.booking.policy().time_slots();

    let mut rows = Vec::with_capacity(slots.len());
    for slot in slots {
        let time = slot.to_string();
        let available = match (&args.game, &args.day) {
            (Some(game), Some(day)) => {
                let free = ctx.booking.availability(game, day, &time).await?;
                if free { "yes" } else { "no" }.to_string()
            }
            _ => "-".to_string(),
        };
        rows.push(SlotRow { time, available });
    }

    output::print_list(&rows, ctx.format);
    Ok(())
}
