use crate::config::{GameConfig, ValidationError};
use crate::error::GameError;
use crate::game::moves::Move;
use crate::game::phase::Phase;
use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::hand::Hand;
use crate::model::passing::{PassingDirection, validate_pass};
use crate::model::player::{Player, Seat};
use crate::model::score::{RoundSummary, ScoreBoard};
use crate::model::suit::Suit;
use crate::model::trick::{CompletedTrick, Trick, card_points};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::array;
use tracing::{Level, event};

const HAND_SIZE: usize = 13;

/// Authoritative state of one game of Hearts, from the first deal until a seat's
/// countdown score reaches zero.
///
/// Every mutation goes through [`setup`](Self::setup), [`play`](Self::play),
/// [`apply`](Self::apply) or [`next_phase`](Self::next_phase). Rejected calls leave the
/// state untouched. Callers must serialize access; the engine has no internal locking.
#[derive(Debug, Clone)]
pub struct MatchState {
    config: GameConfig,
    seed: u64,
    rng: StdRng,
    players: [Player; 4],
    scores: ScoreBoard,
    phase: Phase,
    round_number: u32,
    trick_number: u32,
    trick: Trick,
    last_trick: Option<CompletedTrick>,
    last_taken: Option<Seat>,
    hearts_broken: bool,
    phase_ended: bool,
    finished: bool,
    corrupted: Option<String>,
    history: Vec<RoundSummary>,
}

impl MatchState {
    /// A fresh game: round 1, pass phase, empty hands, every seat at the target score.
    pub fn new(config: GameConfig) -> Result<Self, ValidationError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);

        Ok(Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
            players: array::from_fn(|_| Player::new()),
            scores: ScoreBoard::new(config.target_score),
            phase: Phase::Pass,
            round_number: 1,
            trick_number: 1,
            trick: Trick::new(),
            last_trick: None,
            last_taken: None,
            hearts_broken: false,
            phase_ended: false,
            finished: false,
            corrupted: None,
            history: Vec::new(),
            config,
        })
    }

    pub fn with_target_score(target_score: i32) -> Result<Self, ValidationError> {
        Self::new(GameConfig::with_target_score(target_score))
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn trick_number(&self) -> u32 {
        self.trick_number
    }

    pub fn passing_direction(&self) -> PassingDirection {
        PassingDirection::for_round(self.round_number)
    }

    pub fn hearts_broken(&self) -> bool {
        self.hearts_broken
    }

    pub fn led_suit(&self) -> Option<Suit> {
        self.trick.led_suit()
    }

    pub fn current_trick(&self) -> &Trick {
        &self.trick
    }

    pub fn last_trick(&self) -> Option<&CompletedTrick> {
        self.last_trick.as_ref()
    }

    pub fn last_taken(&self) -> Option<Seat> {
        self.last_taken
    }

    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }

    pub fn hand(&self, seat: Seat) -> &Hand {
        &self.players[seat.index()].hand
    }

    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    pub fn score(&self, seat: Seat) -> i32 {
        self.scores.score(seat)
    }

    pub fn round_history(&self) -> &[RoundSummary] {
        &self.history
    }

    /// True once the current phase's completion condition holds and the transition has
    /// not yet been made.
    pub fn phase_ended(&self) -> bool {
        self.phase_ended
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Seats tied on the highest remaining score once the game is over; empty before.
    pub fn winners(&self) -> Vec<Seat> {
        if !self.finished {
            return Vec::new();
        }
        self.scores.leaders()
    }

    /// Seats allowed to act right now.
    ///
    /// While passing, every seat that has not yet passed. While playing, the seat after
    /// the last card played this trick, else the last trick's taker, else whoever holds
    /// the opener.
    pub fn players_turn(&self) -> Vec<Seat> {
        if self.finished || self.corrupted.is_some() {
            return Vec::new();
        }

        match self.phase {
            Phase::Pass => Seat::LOOP
                .iter()
                .copied()
                .filter(|seat| !self.players[seat.index()].has_passed)
                .collect(),
            Phase::Play if self.phase_ended => Vec::new(),
            Phase::Play => {
                if let Some(last) = self.trick.last_player() {
                    vec![last.next()]
                } else if let Some(taker) = self.last_taken {
                    vec![taker]
                } else {
                    self.opener_holder().into_iter().collect()
                }
            }
        }
    }

    /// Cards `seat` could legally play right now.
    pub fn legal_cards(&self, seat: Seat) -> Vec<Card> {
        if self.phase != Phase::Play || !self.players_turn().contains(&seat) {
            return Vec::new();
        }
        self.hand(seat)
            .iter()
            .copied()
            .filter(|card| self.check_play(seat, *card).is_ok())
            .collect()
    }

    /// Deals a new round. Every hand must be empty and the previous round scored.
    pub fn setup(&mut self) -> Result<(), GameError> {
        self.ensure_playable()?;
        if self.players.iter().any(|player| !player.hand.is_empty()) {
            return Err(GameError::SetupNotReady);
        }
        if self.phase == Phase::Play && self.phase_ended {
            return Err(GameError::SetupNotReady);
        }
        self.deal_round()
    }

    /// Passes three cards or plays one, depending on the phase.
    pub fn play(&mut self, seat: Seat, cards: &[Card]) -> Result<(), GameError> {
        self.ensure_playable()?;
        if !self.players_turn().contains(&seat) {
            return Err(GameError::OutOfTurn { seat });
        }

        match self.phase {
            Phase::Pass => self.pass_cards(seat, cards),
            Phase::Play => match cards {
                [card] => self.play_card(seat, *card),
                _ => Err(GameError::InvalidCardCount {
                    expected: 1,
                    actual: cards.len(),
                }),
            },
        }
    }

    pub fn apply(&mut self, seat: Seat, action: Move) -> Result<(), GameError> {
        self.ensure_playable()?;
        if action.phase() != self.phase {
            let reason = match action {
                Move::Pass(_) => "cards can only be passed during the pass phase",
                Move::PlayCard(_) => "cards can only be played during the play phase",
            };
            return Err(GameError::InvalidMove { reason });
        }
        self.play(seat, action.cards())
    }

    /// Moves from pass to play once every seat has passed, or from play to the next
    /// round's pass once every card has been played.
    pub fn next_phase(&mut self) -> Result<(), GameError> {
        self.ensure_playable()?;
        if !self.phase_ended {
            return Err(GameError::PhaseNotReady);
        }

        match self.phase {
            Phase::Pass => self.begin_play(),
            Phase::Play => self.finish_round(),
        }
    }

    fn ensure_playable(&self) -> Result<(), GameError> {
        if let Some(reason) = &self.corrupted {
            return Err(GameError::StateCorrupted(reason.clone()));
        }
        if self.finished {
            return Err(GameError::GameFinished);
        }
        Ok(())
    }

    fn opener_holder(&self) -> Option<Seat> {
        Seat::LOOP
            .iter()
            .copied()
            .find(|seat| self.hand(*seat).contains(Card::TWO_OF_CLUBS))
    }

    fn deal_round(&mut self) -> Result<(), GameError> {
        let hands = Deck::standard().deal(&mut self.rng);
        for (player, hand) in self.players.iter_mut().zip(hands) {
            player.reset_for_deal(hand);
        }

        self.phase = Phase::Pass;
        self.trick = Trick::new();
        self.trick_number = 1;
        self.last_trick = None;
        self.last_taken = None;
        self.hearts_broken = false;

        let direction = self.passing_direction();
        self.phase_ended = !direction.requires_selection();
        event!(
            target: "hearts_core::round",
            Level::INFO,
            round = self.round_number,
            direction = %direction,
            "dealt new round"
        );

        self.advance_if_ready()
    }

    fn advance_if_ready(&mut self) -> Result<(), GameError> {
        if !self.phase_ended || !self.config.auto_advance {
            return Ok(());
        }
        let phase = self.phase;
        match self.next_phase() {
            Ok(()) => Ok(()),
            Err(err) if err.is_fatal() => Err(err),
            Err(err) => Err(self.corrupt(format!("{phase} phase ended but could not advance: {err}"))),
        }
    }

    fn corrupt(&mut self, reason: String) -> GameError {
        tracing::error!(
            target: "hearts_core::game",
            round = self.round_number,
            phase = %self.phase,
            reason = %reason,
            "game state corrupted"
        );
        self.corrupted = Some(reason.clone());
        GameError::StateCorrupted(reason)
    }

    fn pass_cards(&mut self, seat: Seat, cards: &[Card]) -> Result<(), GameError> {
        let direction = self.passing_direction();
        let selection = validate_pass(direction, seat, self.hand(seat), cards)?;
        let target = direction.target(seat);

        let passer = &mut self.players[seat.index()];
        passer.hand = passer.hand.without(&selection);
        passer.has_passed = true;
        self.players[target.index()]
            .receiving
            .extend_from_slice(&selection);

        event!(
            target: "hearts_core::pass",
            Level::DEBUG,
            round = self.round_number,
            seat = %seat,
            to = %target,
            cards = %format_cards(&selection)
        );

        if self.players.iter().all(|player| player.has_passed) {
            self.phase_ended = true;
            self.advance_if_ready()?;
        }
        Ok(())
    }

    fn begin_play(&mut self) -> Result<(), GameError> {
        if let Some(seat) = Seat::LOOP.iter().copied().find(|seat| {
            let player = &self.players[seat.index()];
            player.hand.len() + player.receiving.len() != HAND_SIZE
        }) {
            return Err(self.corrupt(format!("{seat} would not hold {HAND_SIZE} cards after passing")));
        }

        for player in self.players.iter_mut() {
            player.take_receiving();
        }
        self.phase = Phase::Play;
        self.phase_ended = false;
        self.trick = Trick::new();
        self.trick_number = 1;

        event!(
            target: "hearts_core::round",
            Level::INFO,
            round = self.round_number,
            "passing complete, play begins"
        );
        Ok(())
    }

    /// Validation for a single card, in the order the rules are reported.
    fn check_play(&self, seat: Seat, card: Card) -> Result<(), GameError> {
        let hand = self.hand(seat);
        if !hand.contains(card) {
            return Err(GameError::CardNotHeld { seat, card });
        }

        let opener = Card::TWO_OF_CLUBS;
        if hand.contains(opener) && card != opener {
            return Err(GameError::MustPlayOpener { opener });
        }

        match self.trick.led_suit() {
            Some(led) if card.suit() != led => {
                if hand.has_suit(led) {
                    return Err(GameError::MustFollowSuit(led));
                }
                if self.trick_number == 1 && card.is_penalty_suit() && !hand.only_penalty_suit()
                {
                    return Err(GameError::NoHeartsOnFirstTrick);
                }
            }
            Some(_) => {}
            None => {
                if card.is_penalty_suit() && !self.hearts_broken && !hand.only_penalty_suit() {
                    return Err(GameError::HeartsNotBrokenYet);
                }
            }
        }

        Ok(())
    }

    fn play_card(&mut self, seat: Seat, card: Card) -> Result<(), GameError> {
        self.check_play(seat, card)?;

        self.players[seat.index()].hand.remove(card);
        self.trick.push(seat, card);
        if card.is_penalty_suit() {
            self.hearts_broken = true;
        }

        event!(
            target: "hearts_core::play",
            Level::DEBUG,
            round = self.round_number,
            trick = self.trick_number,
            seat = %seat,
            card = %card
        );

        if self.trick.is_complete() {
            self.resolve_trick()?;
        }
        Ok(())
    }

    fn resolve_trick(&mut self) -> Result<(), GameError> {
        let high_penalty = self.config.high_penalty_card;
        let Some(done) = self.trick.resolve(high_penalty) else {
            return Err(self.corrupt("a complete trick had no winner".to_string()));
        };

        let winner = &mut self.players[done.winner.index()];
        winner.round_score += done.points;
        winner
            .taken
            .extend(done.cards().filter(|card| card_points(*card, high_penalty) > 0));

        event!(
            target: "hearts_core::play",
            Level::DEBUG,
            round = self.round_number,
            trick = self.trick_number,
            winner = %done.winner,
            points = done.points,
            "trick taken"
        );

        self.last_taken = Some(done.winner);
        self.last_trick = Some(done);
        self.trick_number += 1;

        if self.players.iter().all(|player| player.hand.is_empty()) {
            self.phase_ended = true;
            self.advance_if_ready()?;
        }
        Ok(())
    }

    fn finish_round(&mut self) -> Result<(), GameError> {
        let round_points: [u32; 4] = array::from_fn(|i| self.players[i].round_score);
        let shooter = self.scores.apply_round(round_points);
        let summary = RoundSummary {
            round: self.round_number,
            round_points,
            moon_shooter: shooter,
            scores_after: *self.scores.standings(),
        };
        self.history.push(summary);

        if let Some(shooter) = shooter {
            event!(
                target: "hearts_core::round",
                Level::INFO,
                round = self.round_number,
                seat = %shooter,
                "shot the moon"
            );
        }
        event!(
            target: "hearts_core::round",
            Level::INFO,
            round = self.round_number,
            points = ?round_points,
            scores = ?summary.scores_after,
            "round scored"
        );

        for player in self.players.iter_mut() {
            player.round_score = 0;
        }
        self.round_number += 1;
        self.last_taken = None;
        self.phase = Phase::Pass;
        self.phase_ended = false;

        if self.scores.is_game_over() {
            self.finished = true;
            event!(
                target: "hearts_core::game",
                Level::INFO,
                rounds = summary.round,
                winners = ?self.scores.leaders(),
                "game finished"
            );
            return Ok(());
        }

        self.deal_round()
    }
}

fn format_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|card| card.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
