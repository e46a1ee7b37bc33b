use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use hearts_core::config::{GameConfig, ValidationError as RulesError};
use hearts_core::error::GameError;
use hearts_core::game::match_state::MatchState;
use hearts_core::game::moves::Move;
use hearts_core::game::phase::Phase;
use hearts_core::model::player::Seat;
use rand::{RngCore, SeedableRng, rngs::StdRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

use crate::config::{ResolvedOutputs, SimConfig};
use crate::policy::{Policy, PolicyContext, RandomPolicy};

/// Plays complete games through the engine's public API and records one row per game.
pub struct SimRunner {
    config: SimConfig,
    outputs: ResolvedOutputs,
    logging_enabled: bool,
}

/// Summary details returned after a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub games_played: usize,
    pub rounds_played: u32,
    pub moon_shots: usize,
    pub rows_written: usize,
    pub jsonl_path: PathBuf,
}

#[derive(Debug, Serialize)]
struct GameLogRow<'a> {
    run_id: &'a str,
    game_index: usize,
    game_seed: u64,
    rounds: u32,
    final_scores: [i32; 4],
    winners: Vec<Seat>,
    moon_shots: Vec<MoonShot>,
}

#[derive(Debug, Clone, Copy, Serialize)]
struct MoonShot {
    round: u32,
    seat: Seat,
}

struct GameOutcome {
    rounds: u32,
    final_scores: [i32; 4],
    winners: Vec<Seat>,
    moon_shots: Vec<MoonShot>,
}

impl SimRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: SimConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        config.game.validate()?;
        Ok(Self {
            logging_enabled: config.logging.enable_structured,
            config,
            outputs,
        })
    }

    /// Execute every game, streaming JSONL rows to disk.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut rng = StdRng::seed_from_u64(self.config.seed.unwrap_or(0));

        let mut rows_written = 0usize;
        let mut rounds_played = 0u32;
        let mut moon_shots = 0usize;

        for game_index in 0..self.config.games {
            let game_seed = rng.next_u64();
            let outcome = self.play_game(game_index, game_seed)?;

            rounds_played += outcome.rounds;
            moon_shots += outcome.moon_shots.len();

            if self.logging_enabled && tracing::enabled!(Level::INFO) {
                event!(
                    target: "hearts_sim::game",
                    Level::INFO,
                    run_id = %self.config.run_id,
                    game_index = game_index as u32,
                    game_seed,
                    rounds = outcome.rounds,
                    winners = ?outcome.winners
                );
            }

            let row = GameLogRow {
                run_id: &self.config.run_id,
                game_index,
                game_seed,
                rounds: outcome.rounds,
                final_scores: outcome.final_scores,
                winners: outcome.winners,
                moon_shots: outcome.moon_shots,
            };
            serde_json::to_writer(&mut writer, &row)?;
            writer.write_all(b"\n")?;
            rows_written += 1;
        }

        writer.flush()?;

        Ok(RunSummary {
            games_played: self.config.games,
            rounds_played,
            moon_shots,
            rows_written,
            jsonl_path: self.outputs.jsonl.clone(),
        })
    }

    fn play_game(&self, game_index: usize, game_seed: u64) -> Result<GameOutcome, RunnerError> {
        let mut game = MatchState::new(GameConfig {
            seed: Some(game_seed),
            ..self.config.game.clone()
        })?;
        let mut policies: Vec<RandomPolicy> = Seat::LOOP
            .iter()
            .map(|seat| RandomPolicy::new(game_seed.rotate_left(8 * seat.index() as u32 + 1)))
            .collect();

        game.setup()?;

        while !game.is_finished() {
            if game.round_number() > self.config.max_rounds {
                return Err(RunnerError::RoundLimit {
                    game_index,
                    limit: self.config.max_rounds,
                });
            }

            if game.phase_ended() {
                game.next_phase()?;
                continue;
            }

            let Some(seat) = game.players_turn().first().copied() else {
                return Err(RunnerError::game(
                    game_index,
                    format!("no seat can act in round {}", game.round_number()),
                ));
            };

            let legal = game.legal_cards(seat);
            let ctx = PolicyContext {
                hand: game.hand(seat),
                legal: &legal,
            };
            let policy = &mut policies[seat.index()];
            let action = match game.phase() {
                Phase::Pass => policy.choose_pass(&ctx).map(Move::Pass),
                Phase::Play => policy.choose_play(&ctx).map(Move::PlayCard),
            };
            let Some(action) = action else {
                return Err(RunnerError::game(
                    game_index,
                    format!("{seat} had no move in the {} phase", game.phase()),
                ));
            };

            game.apply(seat, action)?;
        }

        let moon_shots = game
            .round_history()
            .iter()
            .filter_map(|summary| {
                summary.moon_shooter.map(|seat| MoonShot {
                    round: summary.round,
                    seat,
                })
            })
            .collect();

        Ok(GameOutcome {
            rounds: game.round_history().len() as u32,
            final_scores: *game.scores().standings(),
            winners: game.winners(),
            moon_shots,
        })
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize log row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("invalid game rules: {0}")]
    Rules(#[from] RulesError),
    #[error("engine rejected a move: {0}")]
    Engine(#[from] GameError),
    #[error("game {game_index} failed: {message}")]
    Game { game_index: usize, message: String },
    #[error("game {game_index} did not finish within {limit} rounds")]
    RoundLimit { game_index: usize, limit: u32 },
}

impl RunnerError {
    fn game(game_index: usize, message: String) -> Self {
        RunnerError::Game {
            game_index,
            message,
        }
    }
}
