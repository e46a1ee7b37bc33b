use crate::model::card::Card;
use crate::model::player::Seat;
use crate::model::suit::Suit;
use thiserror::Error;

/// Every way the engine can refuse a call.
///
/// All variants except [`GameError::StateCorrupted`] reject the attempted call and leave
/// the game untouched. `StateCorrupted` means a phase transition whose completion flag was
/// set could not be carried out; the instance must be discarded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("not all cards have been played")]
    SetupNotReady,
    #[error("it is not {seat}'s turn")]
    OutOfTurn { seat: Seat },
    #[error("expected exactly {expected} card(s) but got {actual}")]
    InvalidCardCount { expected: usize, actual: usize },
    #[error("{0} was selected more than once")]
    DuplicateCard(Card),
    #[error("{seat} does not hold {card}")]
    CardNotHeld { seat: Seat, card: Card },
    #[error("{opener} must be played before any other card")]
    MustPlayOpener { opener: Card },
    #[error("must follow suit: {}", .0.name())]
    MustFollowSuit(Suit),
    #[error("cannot lead a heart until hearts are broken")]
    HeartsNotBrokenYet,
    #[error("cannot play a heart on the first trick")]
    NoHeartsOnFirstTrick,
    #[error("invalid move: {reason}")]
    InvalidMove { reason: &'static str },
    #[error("the current phase has not ended")]
    PhaseNotReady,
    #[error("the game is finished")]
    GameFinished,
    #[error("game state corrupted: {0}")]
    StateCorrupted(String),
}

impl GameError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, GameError::StateCorrupted(_))
    }
}
