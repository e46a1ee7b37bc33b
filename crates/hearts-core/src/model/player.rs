use crate::model::card::Card;
use crate::model::hand::Hand;
use core::fmt;
use serde::{Deserialize, Serialize};

/// One of the four fixed positions at the table, in seating order.
///
/// Play and the left pass both move toward the start of the seating order, wrapping from
/// `One` to `Four`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Seat {
    One = 0,
    Two = 1,
    Three = 2,
    Four = 3,
}

impl Seat {
    pub const LOOP: [Seat; 4] = [Seat::One, Seat::Two, Seat::Three, Seat::Four];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn left(self) -> Seat {
        match self {
            Seat::One => Seat::Four,
            Seat::Two => Seat::One,
            Seat::Three => Seat::Two,
            Seat::Four => Seat::Three,
        }
    }

    pub const fn right(self) -> Seat {
        match self {
            Seat::One => Seat::Two,
            Seat::Two => Seat::Three,
            Seat::Three => Seat::Four,
            Seat::Four => Seat::One,
        }
    }

    pub const fn across(self) -> Seat {
        match self {
            Seat::One => Seat::Three,
            Seat::Two => Seat::Four,
            Seat::Three => Seat::One,
            Seat::Four => Seat::Two,
        }
    }

    /// The seat that acts after this one within a trick.
    pub const fn next(self) -> Seat {
        self.left()
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.index() + 1)
    }
}

/// Per-seat round state. Game scores live on the [`ScoreBoard`](crate::model::score::ScoreBoard).
#[derive(Debug, Clone, Default)]
pub struct Player {
    pub(crate) hand: Hand,
    pub(crate) taken: Vec<Card>,
    pub(crate) receiving: Vec<Card>,
    pub(crate) has_passed: bool,
    pub(crate) round_score: u32,
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    /// Penalty cards won in tricks this round.
    pub fn taken(&self) -> &[Card] {
        &self.taken
    }

    pub fn has_passed(&self) -> bool {
        self.has_passed
    }

    pub fn round_score(&self) -> u32 {
        self.round_score
    }

    pub(crate) fn reset_for_deal(&mut self, hand: Hand) {
        self.hand = hand;
        self.taken.clear();
        self.receiving.clear();
        self.has_passed = false;
        self.round_score = 0;
    }

    pub(crate) fn take_receiving(&mut self) {
        let incoming = std::mem::take(&mut self.receiving);
        self.hand = self.hand.merged(&incoming);
        self.has_passed = false;
    }
}
