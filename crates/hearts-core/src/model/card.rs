use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A card encoded as its ordinal in `0..52`.
///
/// Ordinals are laid out in four blocks of thirteen, one per [`Suit`], with the Two at the
/// bottom of each block and the Ace at the top. Within a suit a larger ordinal is a
/// stronger card; across suits the ordinal carries no meaning for trick resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Card(u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("card ordinal {0} is outside 0..52")]
pub struct InvalidCard(pub u8);

impl Card {
    pub const COUNT: u8 = 52;

    /// Opener of the first trick of every round.
    pub const TWO_OF_CLUBS: Card = Card::new(Rank::Two, Suit::Clubs);

    pub const QUEEN_OF_SPADES: Card = Card::new(Rank::Queen, Suit::Spades);

    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self(suit as u8 * 13 + rank.offset())
    }

    pub const fn from_ordinal(ordinal: u8) -> Option<Self> {
        if ordinal < Self::COUNT {
            Some(Self(ordinal))
        } else {
            None
        }
    }

    pub const fn ordinal(self) -> u8 {
        self.0
    }

    pub const fn suit(self) -> Suit {
        Suit::ALL[(self.0 / 13) as usize]
    }

    pub const fn rank(self) -> Rank {
        Rank::ORDERED[(self.0 % 13) as usize]
    }

    /// Display name of the rank. Not suitable for comparing cards.
    pub const fn rank_name(self) -> &'static str {
        self.rank().name()
    }

    /// Signed ordinal difference: negative when `other` is bigger, zero when equal and
    /// positive when `other` is smaller. Only meaningful for cards of the same suit.
    pub const fn compare(self, other: Card) -> i32 {
        self.0 as i32 - other.0 as i32
    }

    pub const fn is_penalty_suit(self) -> bool {
        self.suit().is_penalty()
    }

    pub fn name(self) -> String {
        format!("{} of {}", self.rank_name(), self.suit().name())
    }
}

impl TryFrom<u8> for Card {
    type Error = InvalidCard;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Card::from_ordinal(value).ok_or(InvalidCard(value))
    }
}

impl From<Card> for u8 {
    fn from(card: Card) -> Self {
        card.0
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank(), self.suit())
    }
}

#[cfg(test)]
mod tests {
    use super::{Card, InvalidCard};
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    fn card(ordinal: u8) -> Card {
        Card::from_ordinal(ordinal).unwrap()
    }

    #[test]
    fn names_follow_ordinal_layout() {
        assert_eq!(card(51).name(), "Ace of Spades");
        assert_eq!(card(0).name(), "Two of Diamonds");
        assert_eq!(card(12).name(), "Ace of Diamonds");
        assert_eq!(card(13).name(), "Two of Clubs");
        assert_eq!(card(14).name(), "Three of Clubs");
        assert_eq!(card(28).name(), "Four of Hearts");
        assert_eq!(card(48).name(), "Jack of Spades");
    }

    #[test]
    fn named_constants_land_on_expected_ordinals() {
        assert_eq!(Card::TWO_OF_CLUBS.ordinal(), 13);
        assert_eq!(Card::QUEEN_OF_SPADES.ordinal(), 49);
        assert_eq!(Card::new(Rank::Ace, Suit::Hearts).ordinal(), 38);
    }

    #[test]
    fn compare_uses_ordinal_difference() {
        assert!(card(51).compare(card(48)) > 0);
        assert_eq!(card(0).compare(card(0)), 0);
        assert!(card(13).compare(card(14)) < 0);
    }

    #[test]
    fn out_of_range_ordinals_are_rejected() {
        assert_eq!(Card::from_ordinal(52), None);
        assert_eq!(Card::try_from(60), Err(InvalidCard(60)));
    }

    #[test]
    fn serde_uses_the_ordinal() {
        let json = serde_json::to_string(&Card::QUEEN_OF_SPADES).unwrap();
        assert_eq!(json, "49");
        let back: Card = serde_json::from_str("13").unwrap();
        assert_eq!(back, Card::TWO_OF_CLUBS);
        assert!(serde_json::from_str::<Card>("52").is_err());
    }

    #[test]
    fn only_hearts_are_penalty_suit_cards() {
        assert!(card(26).is_penalty_suit());
        assert!(!Card::QUEEN_OF_SPADES.is_penalty_suit());
        assert_eq!(Card::QUEEN_OF_SPADES.to_string(), "QS");
    }
}
