use hearts_core::config::GameConfig;
use hearts_core::error::GameError;
use hearts_core::game::match_state::MatchState;
use hearts_core::game::phase::Phase;
use hearts_core::model::passing::PassingDirection;
use hearts_core::model::player::Seat;
use hearts_core::model::score::MOON_POINTS;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

const MAX_STEPS: usize = 200_000;

fn new_game(seed: u64, target_score: i32) -> MatchState {
    let mut game = MatchState::new(GameConfig {
        target_score,
        seed: Some(seed),
        ..GameConfig::default()
    })
    .expect("valid config");
    game.setup().expect("first deal");
    game
}

/// Makes one random legal move for whichever seat is due to act.
fn step(game: &mut MatchState, rng: &mut StdRng) {
    let turn = game.players_turn();
    let seat = *turn.choose(rng).expect("someone can act");
    match game.phase() {
        Phase::Pass => {
            let mut cards = game.hand(seat).cards().to_vec();
            cards.shuffle(rng);
            game.play(seat, &cards[..3]).expect("pass accepted");
        }
        Phase::Play => {
            let legal = game.legal_cards(seat);
            let card = *legal.choose(rng).expect("seat to act always has a legal card");
            game.play(seat, &[card]).expect("legal card accepted");
        }
    }
}

fn cards_in_play(game: &MatchState) -> usize {
    let held: usize = Seat::LOOP.iter().map(|s| game.hand(*s).len()).sum();
    match game.phase() {
        Phase::Pass => {
            let passed = Seat::LOOP
                .iter()
                .filter(|s| game.player(**s).has_passed())
                .count();
            held + passed * 3
        }
        Phase::Play => {
            let completed = (game.trick_number() as usize - 1) * 4;
            held + completed + game.current_trick().plays().len()
        }
    }
}

fn play_out(game: &mut MatchState, seed: u64) -> usize {
    let mut rng = StdRng::seed_from_u64(seed ^ 0x5eed);
    let mut steps = 0;
    while !game.is_finished() {
        assert!(steps < MAX_STEPS, "game did not finish");
        step(game, &mut rng);
        if !game.is_finished() {
            assert_eq!(cards_in_play(game), 52, "cards lost at step {steps}");
        }
        steps += 1;
    }
    steps
}

#[test]
fn random_games_run_to_completion() {
    for seed in [1_u64, 7, 42, 2024, 99_999] {
        let mut game = new_game(seed, 100);
        play_out(&mut game, seed);

        let winners = game.winners();
        assert!(!winners.is_empty());
        let best = winners.iter().map(|s| game.score(*s)).max().unwrap();
        assert!(Seat::LOOP.iter().all(|s| game.score(*s) <= best));
        assert!(Seat::LOOP.iter().any(|s| game.score(*s) <= 0));
        assert_eq!(game.setup(), Err(GameError::GameFinished));
    }
}

#[test]
fn every_round_distributes_all_points() {
    let mut game = new_game(314, 100);
    play_out(&mut game, 314);

    let mut previous = [100; 4];
    for summary in game.round_history() {
        assert_eq!(summary.round_points.iter().sum::<u32>(), MOON_POINTS);
        for seat in Seat::LOOP {
            let i = seat.index();
            let expected = match summary.moon_shooter {
                Some(shooter) if shooter == seat => previous[i],
                Some(_) => previous[i] - MOON_POINTS as i32,
                None => previous[i] - summary.round_points[i] as i32,
            };
            assert_eq!(summary.scores_after[i], expected);
        }
        previous = summary.scores_after;
    }
    assert_eq!(&previous, game.scores().standings());
    assert_eq!(
        game.round_history().len() as u32,
        game.round_number() - 1
    );
}

#[test]
fn directions_cycle_across_rounds() {
    let mut game = new_game(8, 1_000);
    let mut rng = StdRng::seed_from_u64(8);
    let mut seen = Vec::new();
    while game.round_number() <= 5 {
        let direction = game.passing_direction();
        if seen.last() != Some(&(game.round_number(), direction)) {
            seen.push((game.round_number(), direction));
            if direction == PassingDirection::Hold {
                assert_eq!(game.phase(), Phase::Play);
            }
        }
        step(&mut game, &mut rng);
    }
    let directions: Vec<_> = seen.iter().map(|(_, d)| *d).collect();
    assert_eq!(
        directions,
        vec![
            PassingDirection::Left,
            PassingDirection::Right,
            PassingDirection::Across,
            PassingDirection::Hold,
            PassingDirection::Left,
        ]
    );
}

#[test]
fn same_seed_replays_the_same_game() {
    let mut first = new_game(77, 100);
    let mut second = new_game(77, 100);
    let steps = play_out(&mut first, 77);
    assert_eq!(play_out(&mut second, 77), steps);
    assert_eq!(first.round_history(), second.round_history());
}
