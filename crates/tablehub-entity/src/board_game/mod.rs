//! Board game catalog entities.

pub mod model;

pub use model::{BoardGame, NewBoardGame};
