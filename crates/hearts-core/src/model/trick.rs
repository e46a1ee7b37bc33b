use crate::model::card::Card;
use crate::model::player::Seat;
use crate::model::suit::Suit;
use serde::Serialize;

/// Points for taking the high-penalty card, on top of any penalty-suit point it carries.
pub const HIGH_PENALTY_POINTS: u32 = 13;

/// The cards on the table for the trick in progress, in the order they were played.
#[derive(Debug, Clone, Default)]
pub struct Trick {
    plays: Vec<Play>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Play {
    pub seat: Seat,
    pub card: Card,
}

/// A resolved trick, kept so that the table can still show it after it is cleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletedTrick {
    pub plays: Vec<Play>,
    pub winner: Seat,
    pub points: u32,
}

impl Trick {
    pub fn new() -> Self {
        Self {
            plays: Vec::with_capacity(4),
        }
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.plays.len() == 4
    }

    /// Suit of the first card played into the trick.
    pub fn led_suit(&self) -> Option<Suit> {
        self.plays.first().map(|play| play.card.suit())
    }

    /// Seat that most recently played into this trick.
    pub fn last_player(&self) -> Option<Seat> {
        self.plays.last().map(|play| play.seat)
    }

    pub fn played_by(&self, seat: Seat) -> Option<Card> {
        self.plays
            .iter()
            .find(|play| play.seat == seat)
            .map(|play| play.card)
    }

    pub(crate) fn push(&mut self, seat: Seat, card: Card) {
        debug_assert!(!self.is_complete());
        debug_assert!(self.played_by(seat).is_none());
        self.plays.push(Play { seat, card });
    }

    /// Highest card of the led suit. Off-suit cards never win.
    pub fn winner(&self) -> Option<Seat> {
        let led = self.led_suit()?;
        self.plays
            .iter()
            .filter(|play| play.card.suit() == led)
            .max_by(|a, b| a.card.compare(b.card).cmp(&0))
            .map(|play| play.seat)
    }

    pub fn points(&self, high_penalty: Card) -> u32 {
        self.plays
            .iter()
            .map(|play| card_points(play.card, high_penalty))
            .sum()
    }

    /// Clears the table and returns the resolved trick, or `None` if it is not complete.
    pub(crate) fn resolve(&mut self, high_penalty: Card) -> Option<CompletedTrick> {
        if !self.is_complete() {
            return None;
        }
        let winner = self.winner()?;
        let points = self.points(high_penalty);
        let plays = std::mem::take(&mut self.plays);
        Some(CompletedTrick {
            plays,
            winner,
            points,
        })
    }
}

impl CompletedTrick {
    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.plays.iter().map(|play| play.card)
    }
}

pub fn card_points(card: Card, high_penalty: Card) -> u32 {
    let mut points = 0;
    if card.is_penalty_suit() {
        points += 1;
    }
    if card == high_penalty {
        points += HIGH_PENALTY_POINTS;
    }
    points
}
