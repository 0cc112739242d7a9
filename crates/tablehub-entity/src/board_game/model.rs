//! Board game entity and its validated creation form.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use tablehub_core::types::BoardGameId;

/// A board game title in the catalog.
///
/// `name` is the natural key reservations refer to. `stock` is the number
/// of interchangeable physical copies, i.e. how many overlapping bookings
/// the game can hold at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardGame {
    /// Catalog document id.
    pub id: BoardGameId,
    /// Title, used as the resource id on reservations.
    pub name: String,
    /// Fewest players the game supports.
    pub min_players: u32,
    /// Most players the game supports.
    pub max_players: u32,
    /// Fixed length of one play session.
    pub duration_minutes: u32,
    /// Physical copies available.
    pub stock: u32,
}

impl BoardGame {
    /// Whether a party of `players` fits the game's player range.
    pub fn accepts_players(&self, players: u32) -> bool {
        (self.min_players..=self.max_players).contains(&players)
    }
}

/// Input for adding a board game to the catalog.
#[derive(Debug, Clone, Validate, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_player_range"))]
pub struct NewBoardGame {
    /// Title of the game.
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    /// Fewest players the game supports.
    #[validate(range(min = 1))]
    pub min_players: u32,
    /// Most players the game supports.
    pub max_players: u32,
    /// Fixed length of one play session.
    #[validate(range(min = 1, max = 1440))]
    pub duration_minutes: u32,
    /// Physical copies available.
    #[serde(default)]
    pub stock: u32,
}

impl NewBoardGame {
    /// Assign a fresh catalog id.
    pub fn into_board_game(self) -> BoardGame {
        BoardGame {
            id: BoardGameId::new(),
            name: self.name.trim().to_string(),
            min_players: self.min_players,
            max_players: self.max_players,
            duration_minutes: self.duration_minutes,
            stock: self.stock,
        }
    }
}

fn validate_player_range(game: &NewBoardGame) -> Result<(), ValidationError> {
    if game.min_players > game.max_players {
        let mut err = ValidationError::new("player_range");
        err.message = Some("minPlayers must not exceed maxPlayers".into());
        return Err(err);
    }
    if game.name.trim().is_empty() {
        let mut err = ValidationError::new("blank_name");
        err.message = Some("name must not be blank".into());
        return Err(err);
    }
    Ok(())
}
