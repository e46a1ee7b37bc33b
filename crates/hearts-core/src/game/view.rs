use crate::game::match_state::MatchState;
use crate::game::phase::Phase;
use crate::model::card::Card;
use crate::model::passing::PassingDirection;
use crate::model::player::Seat;
use crate::model::suit::Suit;
use crate::model::trick::{CompletedTrick, Play};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub ordinal: u8,
    pub suit: Suit,
    pub value: &'static str,
}

impl From<Card> for CardView {
    fn from(card: Card) -> Self {
        Self {
            ordinal: card.ordinal(),
            suit: card.suit(),
            value: card.rank_name(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlayView {
    pub seat: Seat,
    pub card: CardView,
}

impl From<&Play> for PlayView {
    fn from(play: &Play) -> Self {
        Self {
            seat: play.seat,
            card: play.card.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrickView {
    pub plays: Vec<PlayView>,
    pub winner: Seat,
    pub points: u32,
}

impl From<&CompletedTrick> for TrickView {
    fn from(trick: &CompletedTrick) -> Self {
        Self {
            plays: trick.plays.iter().map(PlayView::from).collect(),
            winner: trick.winner,
            points: trick.points,
        }
    }
}

/// What a single seat is allowed to see: its own hand plus the public table state.
/// Other seats' hands and cards in transit are never included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatView {
    pub seat: Seat,
    pub hand: Vec<CardView>,
    pub legal: Vec<CardView>,
    pub phase: Phase,
    pub phase_ended: bool,
    pub round: u32,
    pub trick: u32,
    pub pass_direction: PassingDirection,
    pub hearts_broken: bool,
    pub turn: Vec<Seat>,
    pub passed: Vec<Seat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub led_suit: Option<Suit>,
    pub table: Vec<PlayView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_trick: Option<TrickView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub took: Option<Seat>,
    pub round_points: [u32; 4],
    pub scores: [i32; 4],
    pub finished: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub winners: Vec<Seat>,
}

impl SeatView {
    pub fn capture(game: &MatchState, seat: Seat) -> Self {
        let cards = |cards: &[Card]| cards.iter().copied().map(CardView::from).collect();

        Self {
            seat,
            hand: cards(game.hand(seat).cards()),
            legal: cards(&game.legal_cards(seat)),
            phase: game.phase(),
            phase_ended: game.phase_ended(),
            round: game.round_number(),
            trick: game.trick_number(),
            pass_direction: game.passing_direction(),
            hearts_broken: game.hearts_broken(),
            turn: game.players_turn(),
            passed: Seat::LOOP
                .iter()
                .copied()
                .filter(|other| game.player(*other).has_passed())
                .collect(),
            led_suit: game.led_suit(),
            table: game.current_trick().plays().iter().map(PlayView::from).collect(),
            last_trick: game.last_trick().map(TrickView::from),
            took: game.last_taken(),
            round_points: Seat::LOOP.map(|other| game.player(other).round_score()),
            scores: *game.scores().standings(),
            finished: game.is_finished(),
            winners: game.winners(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl MatchState {
    /// Snapshot of the game from `seat`'s point of view.
    pub fn view(&self, seat: Seat) -> SeatView {
        SeatView::capture(self, seat)
    }
}

#[cfg(test)]
mod tests {
    use super::SeatView;
    use crate::config::GameConfig;
    use crate::game::match_state::MatchState;
    use crate::model::player::Seat;
    use serde_json::Value;

    fn dealt() -> MatchState {
        let mut game = MatchState::new(GameConfig {
            seed: Some(21),
            ..GameConfig::default()
        })
        .unwrap();
        game.setup().unwrap();
        game
    }

    #[test]
    fn view_only_shows_own_hand() {
        let game = dealt();
        let view = game.view(Seat::Three);
        let own: Vec<u8> = game.hand(Seat::Three).iter().map(|c| c.ordinal()).collect();
        let shown: Vec<u8> = view.hand.iter().map(|c| c.ordinal).collect();
        assert_eq!(shown, own);

        let json: Value = serde_json::from_str(&view.to_json().unwrap()).unwrap();
        let hand = json["hand"].as_array().unwrap();
        assert_eq!(hand.len(), 13);
        assert!(json.get("hands").is_none());
        assert!(json.get("receiving").is_none());
    }

    #[test]
    fn json_uses_readable_names() {
        let game = dealt();
        let json: Value =
            serde_json::from_str(&SeatView::capture(&game, Seat::One).to_json().unwrap()).unwrap();
        assert_eq!(json["phase"], "pass");
        assert_eq!(json["pass_direction"], "left");
        assert_eq!(json["round"], 1);
        assert_eq!(json["scores"], serde_json::json!([100, 100, 100, 100]));
        let first = &json["hand"][0];
        assert!(first["suit"].is_string());
        assert!(first["value"].is_string());
        assert!(json.get("winners").is_none());
        assert!(json.get("last_trick").is_none());
    }

    #[test]
    fn legal_cards_are_empty_while_passing() {
        let game = dealt();
        assert!(game.view(Seat::Two).legal.is_empty());
        assert_eq!(game.view(Seat::Two).turn.len(), 4);
    }
}
