use crate::game::phase::Phase;
use crate::model::card::Card;
use crate::model::passing::PASS_SIZE;

/// A single action a seat can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Pass([Card; PASS_SIZE]),
    PlayCard(Card),
}

impl Move {
    pub const fn phase(&self) -> Phase {
        match self {
            Move::Pass(_) => Phase::Pass,
            Move::PlayCard(_) => Phase::Play,
        }
    }

    pub fn cards(&self) -> &[Card] {
        match self {
            Move::Pass(cards) => cards,
            Move::PlayCard(card) => std::slice::from_ref(card),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Move;
    use crate::game::phase::Phase;
    use crate::model::card::Card;

    #[test]
    fn moves_know_their_phase_and_cards() {
        let play = Move::PlayCard(Card::TWO_OF_CLUBS);
        assert_eq!(play.phase(), Phase::Play);
        assert_eq!(play.cards(), &[Card::TWO_OF_CLUBS]);

        let cards = [0, 1, 2].map(|o| Card::from_ordinal(o).unwrap());
        let pass = Move::Pass(cards);
        assert_eq!(pass.phase(), Phase::Pass);
        assert_eq!(pass.cards().len(), 3);
    }
}
