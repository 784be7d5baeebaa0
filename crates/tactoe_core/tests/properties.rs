//! Property-based tests for the rules, the move selector and the controller.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;
use tactoe_core::{
    Board, GameController, Host, LINES, Outcome, Phase, Player, Position, Square, Timer,
    choose_move, evaluate, heuristic_move, winning_move,
};

// =============================================================================
// Strategies
// =============================================================================

fn arb_square() -> impl Strategy<Value = Square> {
    prop_oneof![
        Just(Square::Empty),
        Just(Square::Occupied(Player::X)),
        Just(Square::Occupied(Player::O)),
    ]
}

/// Any nine squares, including positions unreachable in real play.
fn arb_board() -> impl Strategy<Value = Board> {
    prop::array::uniform9(arb_square()).prop_map(Board::from_squares)
}

/// Boards that still have a move to make.
fn arb_undecided_board() -> impl Strategy<Value = Board> {
    arb_board().prop_filter("board must be undecided", |b| {
        evaluate(b).outcome == Outcome::Undecided
    })
}

fn complete_lines(board: &Board) -> Vec<usize> {
    LINES
        .iter()
        .enumerate()
        .filter(|(_, line)| {
            let [a, b, c] = line.positions();
            board.get(a) != Square::Empty
                && board.get(a) == board.get(b)
                && board.get(a) == board.get(c)
        })
        .map(|(i, _)| i)
        .collect()
}

#[derive(Default)]
struct Recorder {
    pending: Vec<Timer>,
    celebrations: usize,
}

impl Host for Recorder {
    fn schedule(&mut self, _delay: Duration, timer: Timer) {
        self.pending.push(timer);
    }

    fn celebrate(&mut self) {
        self.celebrations += 1;
    }
}

// =============================================================================
// Win detector
// =============================================================================

proptest! {
    #[test]
    fn prop_draw_only_when_full_without_line(board in arb_board()) {
        let eval = evaluate(&board);
        let lines = complete_lines(&board);
        match eval.outcome {
            Outcome::Draw => {
                prop_assert!(board.is_full());
                prop_assert!(lines.is_empty());
            }
            Outcome::Undecided => {
                prop_assert!(!board.is_full());
                prop_assert!(lines.is_empty());
            }
            Outcome::Won(_) => {
                prop_assert!(!lines.is_empty());
            }
        }
        prop_assert_eq!(eval.winning_line.is_some(), eval.outcome.winner().is_some());
    }

    #[test]
    fn prop_winner_matches_first_complete_line(board in arb_board()) {
        let lines = complete_lines(&board);
        prop_assume!(!lines.is_empty());

        let first = LINES[lines[0]];
        let eval = evaluate(&board);
        prop_assert_eq!(eval.winning_line, Some(first));
        let owner = board.get(first.positions()[0]).player();
        prop_assert_eq!(eval.outcome.winner(), owner);
    }
}

// =============================================================================
// Move selector
// =============================================================================

proptest! {
    #[test]
    fn prop_move_is_always_empty(board in arb_undecided_board(), seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let pos = choose_move(&board, &mut rng);
        prop_assert!(board.is_empty(pos));
    }

    #[test]
    fn prop_heuristic_wins_then_blocks(board in arb_undecided_board(), seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let pos = heuristic_move(&board, &mut rng);
        prop_assert!(board.is_empty(pos));

        if winning_move(&board, Player::O).is_some() {
            prop_assert_eq!(
                evaluate(&board.with(pos, Player::O)).outcome,
                Outcome::Won(Player::O)
            );
        } else if let Some(block) = winning_move(&board, Player::X) {
            prop_assert_eq!(pos, block);
        } else if board.is_empty(Position::Center) {
            prop_assert_eq!(pos, Position::Center);
        } else if Position::CORNERS.iter().any(|&c| board.is_empty(c)) {
            prop_assert!(Position::CORNERS.contains(&pos));
        }
    }
}

// =============================================================================
// Controller
// =============================================================================

proptest! {
    #[test]
    fn prop_random_games_respect_turn_order(
        seed in any::<u64>(),
        clicks in prop::collection::vec(0usize..9, 1..40),
    ) {
        let mut game = GameController::new(ChaCha8Rng::seed_from_u64(seed));
        let mut host = Recorder::default();

        for index in clicks {
            let before = game.snapshot();
            let accepted = game.on_cell_click(index, &mut host);

            if before.outcome.is_decided() || before.phase != Phase::WaitingForHuman {
                prop_assert!(!accepted);
            }
            if accepted {
                prop_assert_eq!(game.snapshot().history.len(), before.history.len() + 1);
                // A second click before the reply lands changes nothing.
                let blocked = game.snapshot();
                prop_assert!(!game.on_cell_click(index, &mut host));
                prop_assert_eq!(game.snapshot(), blocked);
            }

            while let Some(timer) = host.pending.pop() {
                game.on_timer(timer, &mut host);
            }

            let snapshot = game.snapshot();
            let marks = snapshot.board.occupied_mask().iter().filter(|m| **m).count();
            prop_assert_eq!(marks, snapshot.history.len());
            prop_assert_eq!(snapshot.outcome, evaluate(&snapshot.board).outcome);
            prop_assert!(host.celebrations <= 1);
            prop_assert_eq!(
                host.celebrations == 1,
                snapshot.outcome == Outcome::Won(Player::X)
            );
        }
    }
}
