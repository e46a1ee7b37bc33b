use crate::model::card::Card;
use crate::model::hand::Hand;
use rand::Rng;
use std::array;

#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn standard() -> Self {
        let cards = (0..Card::COUNT).filter_map(Card::from_ordinal).collect();
        Self { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Deals the whole deck round-robin across four seats, drawing a uniformly random
    /// remaining card each time (a partial Fisher-Yates by swap-removal). Each returned
    /// hand is sorted.
    pub fn deal<R: Rng + ?Sized>(mut self, rng: &mut R) -> [Hand; 4] {
        let mut piles: [Vec<Card>; 4] = array::from_fn(|_| Vec::with_capacity(13));
        let mut seat = 0;
        while !self.cards.is_empty() {
            let pick = rng.gen_range(0..self.cards.len());
            piles[seat].push(self.cards.swap_remove(pick));
            seat = (seat + 1) % piles.len();
        }
        piles.map(Hand::with_cards)
    }
}

#[cfg(test)]
mod tests {
    use super::Deck;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn standard_deck_has_52_unique_cards() {
        let deck = Deck::standard();
        assert_eq!(deck.len(), 52);
        let unique: HashSet<_> = deck.cards().iter().collect();
        assert_eq!(unique.len(), 52);
    }

    #[test]
    fn deal_gives_thirteen_sorted_cards_to_each_seat() {
        let mut rng = StdRng::seed_from_u64(7);
        let hands = Deck::standard().deal(&mut rng);

        let mut seen = HashSet::new();
        for hand in &hands {
            assert_eq!(hand.len(), 13);
            assert!(hand.cards().windows(2).all(|w| w[0] < w[1]));
            for card in hand.iter() {
                assert!(seen.insert(*card), "{card} dealt twice");
            }
        }
        assert_eq!(seen.len(), 52);
    }

    #[test]
    fn deal_with_same_seed_is_deterministic() {
        let a = Deck::standard().deal(&mut StdRng::seed_from_u64(42));
        let b = Deck::standard().deal(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn deal_with_different_seeds_differs() {
        let a = Deck::standard().deal(&mut StdRng::seed_from_u64(1));
        let b = Deck::standard().deal(&mut StdRng::seed_from_u64(2));
        assert_ne!(a, b);
    }
}
