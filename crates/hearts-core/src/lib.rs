#![deny(warnings)]
//! Rules engine for four-seat Hearts: dealing, passing, trick play and countdown scoring.

pub mod config;
pub mod error;
pub mod game;
pub mod model;

pub use config::GameConfig;
pub use error::GameError;
pub use game::match_state::MatchState;
pub use game::moves::Move;
pub use game::phase::Phase;
pub use model::card::Card;
pub use model::player::Seat;
