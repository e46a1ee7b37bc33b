use crate::model::player::Seat;
use serde::Serialize;

/// Total points available in one round: thirteen hearts plus the high-penalty card.
pub const MOON_POINTS: u32 = 26;

/// Countdown game scores. Every seat starts at the target score and loses the points it
/// takes; the game is over once any seat reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBoard {
    totals: [i32; 4],
}

/// The outcome of scoring one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoundSummary {
    pub round: u32,
    pub round_points: [u32; 4],
    pub moon_shooter: Option<Seat>,
    pub scores_after: [i32; 4],
}

impl ScoreBoard {
    pub const fn new(target: i32) -> Self {
        Self { totals: [target; 4] }
    }

    pub fn score(&self, seat: Seat) -> i32 {
        self.totals[seat.index()]
    }

    pub fn standings(&self) -> &[i32; 4] {
        &self.totals
    }

    /// Applies one round's points and returns the moon shooter, if any. A seat that took
    /// every point keeps its score while every other seat loses the full pool.
    pub fn apply_round(&mut self, round_points: [u32; 4]) -> Option<Seat> {
        let shooter = Seat::LOOP
            .iter()
            .copied()
            .find(|seat| round_points[seat.index()] == MOON_POINTS);

        for seat in Seat::LOOP.iter().copied() {
            let lost = match shooter {
                Some(shooter) if shooter == seat => 0,
                Some(_) => MOON_POINTS,
                None => round_points[seat.index()],
            };
            self.totals[seat.index()] -= lost as i32;
        }

        shooter
    }

    pub fn is_game_over(&self) -> bool {
        self.totals.iter().any(|&score| score <= 0)
    }

    /// Seats sharing the highest remaining score.
    pub fn leaders(&self) -> Vec<Seat> {
        let best = self.totals.iter().copied().max().unwrap_or_default();
        Seat::LOOP
            .iter()
            .copied()
            .filter(|seat| self.score(*seat) == best)
            .collect()
    }
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self::new(100)
    }
}
