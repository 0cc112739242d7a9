//! CLI command definitions and dispatch.

pub mod book;
pub mod check;
pub mod game;
pub mod reservations;
pub mod slots;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use tablehub_booking::{AdminService, BookingService};
use tablehub_core::config::AppConfig;
use tablehub_core::error::AppError;
use tablehub_store::{Dataset, StoreManager};

use crate::output::OutputFormat;

/// TableHub: board game and table reservations
#[derive(Debug, Parser)]
#[command(name = "tablehub", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (without extension)
    #[arg(short, long, default_value = "config/default")]
    pub config: String,

    /// JSON dataset seeded into the in-memory store
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Write the dataset back after a mutating command
    #[arg(long, requires = "data")]
    pub save: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the game catalog
    Games,
    /// Game catalog management
    Game(game::GameArgs),
    /// List bookable start times, optionally with availability
    Slots(slots::SlotsArgs),
    /// Check whether a game has a free copy
    Check(check::CheckArgs),
    /// Book a game
    Book(book::BookArgs),
    /// Book a table without a game
    BookTable(book::BookTableArgs),
    /// List stored reservations
    Reservations,
    /// Cancel a reservation
    Cancel(reservations::CancelArgs),
}

impl Commands {
    fn mutates(&self) -> bool {
        matches!(
            self,
            Self::Game(_) | Self::Book(_) | Self::BookTable(_) | Self::Cancel(_)
        )
    }
}

/// Services and settings shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    /// Selected store backends.
    pub stores: StoreManager,
    /// Booking use cases.
    pub booking: BookingService,
    /// Catalog and reservation administration.
    pub admin: AdminService,
    /// Output format.
    pub format: OutputFormat,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        let stores = self.open_stores(&config).await?;
        let ctx = Context {
            booking: BookingService::from_config(&stores, &config),
            admin: AdminService::new(&stores, config.store.timeout()),
            stores,
            format: self.format,
        };

        match &self.command {
            Commands::Games => game::list(&ctx).await?,
            Commands::Game(args) => game::execute(args, &ctx).await?,
            Commands::Slots(args) => slots::execute(args, &ctx).await?,
            Commands::Check(args) => check::execute(args, &ctx).await?,
            Commands::Book(args) => book::execute(args, &ctx).await?,
            Commands::BookTable(args) => book::execute_table(args, &ctx).await?,
            Commands::Reservations => reservations::list(&ctx).await?,
            Commands::Cancel(args) => reservations::cancel(args, &ctx).await?,
        }

        if self.save && self.command.mutates() {
            if let Some(path) = &self.data {
                Dataset::capture(&ctx.stores).await?.save(path).await?;
            }
        }
        Ok(())
    }

    async fn open_stores(&self, config: &AppConfig) -> Result<StoreManager, AppError> {
        match &self.data {
            Some(path) => {
                info!(path = %path.display(), "Seeding in-memory store from dataset");
                Ok(Dataset::load(path).await?.into_stores())
            }
            None => StoreManager::new(&config.store).await,
        }
    }
}
