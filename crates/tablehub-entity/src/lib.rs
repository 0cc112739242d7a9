//! # tablehub-entity
//!
//! Domain entity models for TableHub. Every struct in this crate is either
//! a stored record (board games, reservations), the raw document form a
//! store hands back, or a transient value of the admission flow. All
//! entities derive `Debug`, `Clone`, `Serialize` and `Deserialize`.

pub mod board_game;
pub mod reservation;
