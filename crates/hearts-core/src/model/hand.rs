use crate::model::card::Card;
use crate::model::suit::Suit;

/// A player's holdings, always sorted ascending by ordinal with no duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn with_cards(mut cards: Vec<Card>) -> Self {
        sort_cards(&mut cards);
        cards.dedup();
        Self { cards }
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.binary_search(&card).is_ok()
    }

    pub fn contains_all(&self, cards: &[Card]) -> bool {
        cards.iter().all(|card| self.contains(*card))
    }

    pub fn has_suit(&self, suit: Suit) -> bool {
        self.cards.iter().any(|card| card.suit() == suit)
    }

    /// True when every card held belongs to a penalty suit (vacuously true when empty).
    pub fn only_penalty_suit(&self) -> bool {
        self.cards.iter().all(|card| card.is_penalty_suit())
    }

    pub fn remove(&mut self, card: Card) -> bool {
        match self.cards.binary_search(&card) {
            Ok(index) => {
                self.cards.remove(index);
                true
            }
            Err(_) => false,
        }
    }

    /// Returns a new hand without the given cards; cards not held are ignored.
    pub fn without(&self, removed: &[Card]) -> Hand {
        let cards = self
            .cards
            .iter()
            .copied()
            .filter(|card| !removed.contains(card))
            .collect();
        Hand { cards }
    }

    /// Returns a new hand with `incoming` merged in, preserving the sort order.
    pub fn merged(&self, incoming: &[Card]) -> Hand {
        Hand {
            cards: merge_sorted(&self.cards, incoming),
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

/// Sorts `incoming` and merges it into the already sorted `hand` with a linear
/// two-pointer walk.
pub fn merge_sorted(hand: &[Card], incoming: &[Card]) -> Vec<Card> {
    let mut incoming = incoming.to_vec();
    sort_cards(&mut incoming);

    let mut merged = Vec::with_capacity(hand.len() + incoming.len());
    let (mut i, mut j) = (0, 0);
    while i < hand.len() && j < incoming.len() {
        if hand[i].compare(incoming[j]) <= 0 {
            merged.push(hand[i]);
            i += 1;
        } else {
            merged.push(incoming[j]);
            j += 1;
        }
    }
    merged.extend_from_slice(&hand[i..]);
    merged.extend_from_slice(&incoming[j..]);
    merged
}

fn sort_cards(cards: &mut [Card]) {
    cards.sort_unstable_by(|a, b| a.compare(*b).cmp(&0));
}
