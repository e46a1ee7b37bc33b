use crate::error::GameError;
use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::player::Seat;
use core::fmt;
use serde::Serialize;

pub const PASS_SIZE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PassingDirection {
    Hold,
    Left,
    Right,
    Across,
}

impl PassingDirection {
    /// Indexed by `round % 4`.
    pub const CYCLE: [PassingDirection; 4] = [
        PassingDirection::Hold,
        PassingDirection::Left,
        PassingDirection::Right,
        PassingDirection::Across,
    ];

    pub const fn for_round(round: u32) -> PassingDirection {
        Self::CYCLE[(round % 4) as usize]
    }

    pub const fn requires_selection(self) -> bool {
        !matches!(self, PassingDirection::Hold)
    }

    pub const fn target(self, seat: Seat) -> Seat {
        match self {
            PassingDirection::Left => seat.left(),
            PassingDirection::Right => seat.right(),
            PassingDirection::Across => seat.across(),
            PassingDirection::Hold => seat,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            PassingDirection::Hold => "hold",
            PassingDirection::Left => "left",
            PassingDirection::Right => "right",
            PassingDirection::Across => "across",
        }
    }
}

impl fmt::Display for PassingDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checks a pass selection against the round's direction and the passer's hand, returning
/// the three cards on success.
pub fn validate_pass(
    direction: PassingDirection,
    seat: Seat,
    hand: &Hand,
    cards: &[Card],
) -> Result<[Card; PASS_SIZE], GameError> {
    if !direction.requires_selection() {
        return Err(GameError::InvalidMove {
            reason: "cards cannot be passed on a hold round",
        });
    }

    let selection: [Card; PASS_SIZE] =
        cards.try_into().map_err(|_| GameError::InvalidCardCount {
            expected: PASS_SIZE,
            actual: cards.len(),
        })?;

    for (i, card) in selection.iter().enumerate() {
        if selection[i + 1..].contains(card) {
            return Err(GameError::DuplicateCard(*card));
        }
    }

    if let Some(card) = selection.iter().find(|card| !hand.contains(**card)) {
        return Err(GameError::CardNotHeld { seat, card: *card });
    }

    Ok(selection)
}
