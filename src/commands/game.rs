//! Game catalog CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use tablehub_core::error::AppError;
use tablehub_entity::board_game::{BoardGame, NewBoardGame};

use super::Context;
use crate::output;

/// Arguments for game commands
#[derive(Debug, Args)]
pub struct GameArgs {
    /// Game subcommand
    #[command(subcommand)]
    pub command: GameCommand,
}

/// Game subcommands
#[derive(Debug, Subcommand)]
pub enum GameCommand {
    /// Add a game to the catalog
    Add {
        /// Game name
        name: String,
        /// Fewest players
        #[arg(long)]
        min_players: u32,
        /// Most players
        #[arg(long)]
        max_players: u32,
        /// Length of one session in minutes
        #[arg(long)]
        duration: u32,
        /// Physical copies
        #[arg(long, default_value_t = 1)]
        stock: u32,
    },
    /// Remove a game from the catalog
    Remove {
        /// Game name
        name: String,
    },
    /// Set the number of copies of a game
    Stock {
        /// Game name
        name: String,
        /// New stock
        stock: u32,
    },
}

/// Game display row for table output
#[derive(Debug, Serialize, Tabled)]
struct GameRow {
    /// Game name
    name: String,
    /// Player range
    players: String,
    /// Session length
    duration: String,
    /// Copies
    stock: u32,
}

impl From<&BoardGame> for GameRow {
    fn from(game: &BoardGame) -> Self {
        Self {
            name: game.name.clone(),
            players: format!("{}-{}", game.min_players, game.max_players),
            duration: format!("{} min", game.duration_minutes),
            stock: game.stock,
        }
    }
}

/// List the catalog
pub async fn list(ctx: &Context) -> Result<(), AppError> {
    let games = ctx.admin.list_games().await?;
    let rows: Vec<GameRow> = games.iter().map(GameRow::from).collect();
    output::print_list(&rows, ctx.format);
    Ok(())
}

/// Execute game commands
pub async fn execute(args: &GameArgs, ctx: &Context) -> Result<(), AppError> {
    match &args.command {
        GameCommand::Add {
            name,
            min_players,
            max_players,
            duration,
            stock,
        } => {
            let game = ctx
                .admin
                .add_game(NewBoardGame {
                    name: name.clone(),
                    min_players: *min_players,
                    max_players: *max_players,
                    duration_minutes: *duration,
                    stock: *stock,
                })
                .await?;
            output::print_success(&format!("Game '{}' added", game.name));
            output::print_item(&GameRow::from(&game), ctx.format);
        }
        GameCommand::Remove { name } => {
            let game = find(ctx, name).await?;
            ctx.admin.remove_game(&game.id).await?;
            output::print_success(&format!("Game '{name}' removed"));
        }
        GameCommand::Stock { name, stock } => {
            let game = find(ctx, name).await?;
            let game = ctx.admin.update_stock(&game.id, *stock).await?;
            output::print_success(&format!("Game '{name}' now has {} copies", game.stock));
        }
    }

    Ok(())
}

async fn find(ctx: &Context, name: &str) -> Result<BoardGame, AppError> {
    ctx.admin
        .list_games()
        .await?
        .into_iter()
        .find(|g| g.name == name)
        .ok_or_else(|| AppError::not_found(format!("Game '{name}' not found")))
}
