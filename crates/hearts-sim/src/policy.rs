use hearts_core::model::card::Card;
use hearts_core::model::hand::Hand;
use hearts_core::model::passing::PASS_SIZE;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::{IteratorRandom, SliceRandom};

/// What a seat can see when it has to decide.
pub struct PolicyContext<'a> {
    pub hand: &'a Hand,
    /// Cards the engine would accept; empty while passing.
    pub legal: &'a [Card],
}

/// Decision-making interface for simulated seats.
pub trait Policy: Send {
    /// Choose the cards to pass, or `None` when the hand cannot supply them.
    fn choose_pass(&mut self, ctx: &PolicyContext) -> Option<[Card; PASS_SIZE]>;

    /// Choose one of `ctx.legal`, or `None` when nothing is legal.
    fn choose_play(&mut self, ctx: &PolicyContext) -> Option<Card>;
}

/// Uniformly random choices among whatever the rules allow.
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn choose_pass(&mut self, ctx: &PolicyContext) -> Option<[Card; PASS_SIZE]> {
        let mut picked = ctx
            .hand
            .iter()
            .copied()
            .choose_multiple(&mut self.rng, PASS_SIZE);
        picked.shuffle(&mut self.rng);
        picked.try_into().ok()
    }

    fn choose_play(&mut self, ctx: &PolicyContext) -> Option<Card> {
        ctx.legal.choose(&mut self.rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::{Policy, PolicyContext, RandomPolicy};
    use hearts_core::model::card::Card;
    use hearts_core::model::hand::Hand;

    fn hand(ordinals: &[u8]) -> Hand {
        Hand::with_cards(
            ordinals
                .iter()
                .map(|&o| Card::from_ordinal(o).unwrap())
                .collect(),
        )
    }

    #[test]
    fn pass_picks_three_distinct_held_cards() {
        let hand = hand(&[0, 5, 13, 27, 40, 49]);
        let ctx = PolicyContext {
            hand: &hand,
            legal: &[],
        };
        let mut policy = RandomPolicy::new(7);
        for _ in 0..20 {
            let cards = policy.choose_pass(&ctx).unwrap();
            assert!(hand.contains_all(&cards));
            assert!(cards[0] != cards[1] && cards[1] != cards[2] && cards[0] != cards[2]);
        }
    }

    #[test]
    fn short_hand_cannot_pass() {
        let hand = hand(&[0, 5]);
        let ctx = PolicyContext {
            hand: &hand,
            legal: &[],
        };
        assert_eq!(RandomPolicy::new(1).choose_pass(&ctx), None);
    }

    #[test]
    fn play_stays_within_legal_cards() {
        let hand = hand(&[14, 20, 30]);
        let legal: Vec<Card> = hand.cards()[..2].to_vec();
        let ctx = PolicyContext {
            hand: &hand,
            legal: &legal,
        };
        let mut policy = RandomPolicy::new(3);
        for _ in 0..20 {
            assert!(legal.contains(&policy.choose_play(&ctx).unwrap()));
        }
    }
}
