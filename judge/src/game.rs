use std::time::{Duration, Instant};

use quarto::{IllegalMove, State};
use rand::rngs::StdRng;
use rand::Rng;
use tracing::trace;

use crate::player::{Player, Turn};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GameSettings {
    /// Maximum time for answering one request.
    pub time_limit: Option<Duration>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForfeitReason {
    Resigned,
    TimeLimitExceeded,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    WonByPlayer { player_idx: usize },
    Tie,
    Forfeited { player_idx: usize, reason: ForfeitReason },
    IllegalMoveByPlayer { player_idx: usize, err: IllegalMove },
    /// The player wants to stop playing altogether.
    Quit { player_idx: usize },
}

impl GameResult {
    /// One line telling the players how the game ended.
    pub fn announcement(&self, player_names: &[String; 2]) -> String {
        match *self {
            GameResult::WonByPlayer { player_idx } => format!("{} wins!", player_names[player_idx]),
            GameResult::Tie => String::from("Draw!"),
            GameResult::Forfeited { player_idx, reason } => {
                let what = match reason {
                    ForfeitReason::Resigned => "forfeits",
                    ForfeitReason::TimeLimitExceeded => "ran out of time",
                };
                format!(
                    "{} {}, {} wins!",
                    player_names[player_idx],
                    what,
                    player_names[1 - player_idx]
                )
            }
            GameResult::IllegalMoveByPlayer { player_idx, err } => format!(
                "{} made an illegal move ({}), {} wins!",
                player_names[player_idx],
                err,
                player_names[1 - player_idx]
            ),
            GameResult::Quit { player_idx } => format!("{} quit.", player_names[player_idx]),
        }
    }
}

enum Answer<T> {
    Move(T),
    GameOver(GameResult),
}

/// Asks one player and applies the time limit to the answer.
fn ask<T>(
    player_idx: usize,
    settings: &GameSettings,
    request: impl FnOnce() -> anyhow::Result<Turn<T>>,
) -> anyhow::Result<Answer<T>> {
    let started = Instant::now();
    let turn = request()?;
    if let Some(time_limit) = settings.time_limit {
        if started.elapsed() > time_limit {
            return Ok(Answer::GameOver(GameResult::Forfeited {
                player_idx,
                reason: ForfeitReason::TimeLimitExceeded,
            }));
        }
    }
    Ok(match turn {
        Turn::Continue(mv) => Answer::Move(mv),
        Turn::Forfeit => Answer::GameOver(GameResult::Forfeited {
            player_idx,
            reason: ForfeitReason::Resigned,
        }),
        Turn::HardQuit => Answer::GameOver(GameResult::Quit { player_idx }),
    })
}

/// Plays one game, starting with a random player.
///
/// Each turn, one player picks a piece and the other one places it. Whoever
/// completes a line wins. Both players are told about every placement and
/// about the result.
///
/// Returns an error only when a player can't answer, not when an
/// illegal move is played.
pub fn play_game(
    rng: &mut StdRng,
    player_1: &mut Player,
    player_2: &mut Player,
    settings: &GameSettings,
) -> anyhow::Result<GameResult> {
    let mut players = [player_1, player_2];
    let mut state = State::new();
    let result = play_turns(rng, &mut players, settings, &mut state)?;

    let player_names = [players[0].name.clone(), players[1].name.clone()];
    for player in players.iter_mut() {
        player.game_over(&state, &result, &player_names)?;
    }
    Ok(result)
}

fn play_turns(
    rng: &mut StdRng,
    players: &mut [&mut Player; 2],
    settings: &GameSettings,
    state: &mut State,
) -> anyhow::Result<GameResult> {
    // Randomly pick a starting player
    let mut current_player_idx = if rng.gen::<bool>() { 1 } else { 0 };

    loop {
        let piece = match ask(current_player_idx, settings, || {
            players[current_player_idx].choose_piece(state)
        })? {
            Answer::Move(piece) => piece,
            Answer::GameOver(result) => return Ok(result),
        };
        if let Err(err) = state.pick_piece(piece) {
            return Ok(GameResult::IllegalMoveByPlayer {
                player_idx: current_player_idx,
                err,
            });
        }

        // The opponent places the piece
        current_player_idx = 1 - current_player_idx;
        let square = match ask(current_player_idx, settings, || {
            players[current_player_idx].choose_square(state)
        })? {
            Answer::Move(square) => square,
            Answer::GameOver(result) => return Ok(result),
        };
        if let Err(err) = state.place_at(square) {
            return Ok(GameResult::IllegalMoveByPlayer {
                player_idx: current_player_idx,
                err,
            });
        }
        let placed_by = players[current_player_idx].name.clone();
        trace!(player = &placed_by, %piece, %square, "Placed piece");
        for player in players.iter_mut() {
            player.piece_placed(state, &placed_by, piece, square)?;
        }

        if state.has_winner() {
            return Ok(GameResult::WonByPlayer {
                player_idx: current_player_idx,
            });
        }
        if state.is_draw() {
            return Ok(GameResult::Tie);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;
    use std::thread;

    use quarto::{piece, Difficulty, Piece, SearchEngine, Square};
    use rand::SeedableRng;

    use super::*;
    use crate::player::{AiPlayer, MoveSource};

    /// Replays fixed answers, then quits.
    struct Scripted {
        pieces: VecDeque<Turn<Piece>>,
        squares: VecDeque<Turn<Square>>,
        delay: Duration,
        /// Everything the game loop told this player.
        heard: Rc<RefCell<Vec<String>>>,
    }

    impl Scripted {
        fn boxed(pieces: &[Turn<u8>], squares: &[Turn<(u8, u8)>]) -> Box<Self> {
            let pieces = pieces
                .iter()
                .map(|turn| match *turn {
                    Turn::Continue(id) => Turn::Continue(piece!(id)),
                    Turn::Forfeit => Turn::Forfeit,
                    Turn::HardQuit => Turn::HardQuit,
                })
                .collect();
            let squares = squares
                .iter()
                .map(|turn| match *turn {
                    Turn::Continue((row, col)) => Turn::Continue(Square::new(row, col).unwrap()),
                    Turn::Forfeit => Turn::Forfeit,
                    Turn::HardQuit => Turn::HardQuit,
                })
                .collect();
            Box::new(Self {
                pieces,
                squares,
                delay: Duration::ZERO,
                heard: Rc::default(),
            })
        }
    }

    impl MoveSource for Scripted {
        fn choose_piece(&mut self, _state: &State) -> anyhow::Result<Turn<Piece>> {
            thread::sleep(self.delay);
            Ok(self.pieces.pop_front().unwrap_or(Turn::HardQuit))
        }

        fn choose_square(&mut self, _state: &State) -> anyhow::Result<Turn<Square>> {
            thread::sleep(self.delay);
            Ok(self.squares.pop_front().unwrap_or(Turn::HardQuit))
        }

        fn piece_placed(
            &mut self,
            _state: &State,
            player_name: &str,
            piece: Piece,
            square: Square,
        ) -> anyhow::Result<()> {
            let line = format!("{} placed {} on {}", player_name, piece.id(), square);
            self.heard.borrow_mut().push(line);
            Ok(())
        }

        fn game_over(
            &mut self,
            state: &State,
            result: &GameResult,
            player_names: &[String; 2],
        ) -> anyhow::Result<()> {
            assert!(state.has_winner() || !matches!(result, GameResult::WonByPlayer { .. }));
            self.heard.borrow_mut().push(result.announcement(player_names));
            Ok(())
        }
    }

    /// Finds a seed whose first draw lets player 1 start.
    fn rng_where_player_1_starts() -> StdRng {
        (0..)
            .map(StdRng::seed_from_u64)
            .find(|rng| !rng.clone().gen::<bool>())
            .unwrap()
    }

    fn play(
        player_1: Box<dyn MoveSource>,
        player_2: Box<dyn MoveSource>,
        settings: GameSettings,
    ) -> GameResult {
        let mut player_1 = Player::new("one", player_1);
        let mut player_2 = Player::new("two", player_2);
        play_game(
            &mut rng_where_player_1_starts(),
            &mut player_1,
            &mut player_2,
            &settings,
        )
        .unwrap()
    }

    #[test]
    fn placer_of_the_winning_piece_wins() {
        use Turn::Continue as C;
        // Player 1 hands over tall pieces, player 2 lines them up in row 0
        let player_1 = Scripted::boxed(
            &[C(0), C(1), C(2), C(3)],
            &[C((1, 0)), C((1, 1)), C((1, 2))],
        );
        let player_2 = Scripted::boxed(
            &[C(12), C(13), C(14)],
            &[C((0, 0)), C((0, 1)), C((0, 2)), C((0, 3))],
        );
        let heard = [Rc::clone(&player_1.heard), Rc::clone(&player_2.heard)];
        let result = play(player_1, player_2, GameSettings::default());
        assert_eq!(result, GameResult::WonByPlayer { player_idx: 1 });

        // Both players were told about all seven placements and the winner
        for heard in heard {
            let heard = heard.borrow();
            assert_eq!(heard.len(), 8);
            assert_eq!(heard[0], "two placed 0 on 1A");
            assert_eq!(heard[1], "one placed 12 on 2A");
            assert_eq!(heard[6], "two placed 3 on 1D");
            assert_eq!(heard[7], "two wins!");
        }
    }

    #[test]
    fn announcements_name_the_winner() {
        let names = [String::from("Jeff"), String::from("HAL")];
        assert_eq!(GameResult::WonByPlayer { player_idx: 1 }.announcement(&names), "HAL wins!");
        assert_eq!(GameResult::Tie.announcement(&names), "Draw!");
        let resigned = GameResult::Forfeited {
            player_idx: 0,
            reason: ForfeitReason::Resigned,
        };
        assert_eq!(resigned.announcement(&names), "Jeff forfeits, HAL wins!");
        let too_slow = GameResult::Forfeited {
            player_idx: 1,
            reason: ForfeitReason::TimeLimitExceeded,
        };
        assert_eq!(too_slow.announcement(&names), "HAL ran out of time, Jeff wins!");
        let illegal = GameResult::IllegalMoveByPlayer {
            player_idx: 0,
            err: IllegalMove::NothingHeld,
        };
        assert!(illegal.announcement(&names).starts_with("Jeff made an illegal move ("));
        assert_eq!(GameResult::Quit { player_idx: 0 }.announcement(&names), "Jeff quit.");
    }

    #[test]
    fn game_over_is_announced_for_every_result() {
        use Turn::Continue as C;
        let player_1 = Scripted::boxed(&[C(5)], &[]);
        let player_2 = Scripted::boxed(&[], &[Turn::Forfeit]);
        let heard = Rc::clone(&player_1.heard);
        play(player_1, player_2, GameSettings::default());
        assert_eq!(*heard.borrow(), vec![String::from("two forfeits, one wins!")]);
    }

    #[test]
    fn full_board_without_line_is_a_tie() {
        use Turn::Continue as C;
        // Pieces in the order they are placed, on a board without a line
        let board = [
            [12, 8, 2, 7],
            [5, 0, 10, 4],
            [11, 14, 9, 3],
            [1, 13, 6, 15],
        ];
        let mut moves = Vec::new();
        for (row, ids) in board.iter().enumerate() {
            for (col, &id) in ids.iter().enumerate() {
                moves.push((id, (row as u8, col as u8)));
            }
        }
        // Player 1 picks on even turns and places on odd ones
        let (mut pieces_1, mut squares_1, mut pieces_2, mut squares_2) =
            (Vec::new(), Vec::new(), Vec::new(), Vec::new());
        for (turn, (id, square)) in moves.into_iter().enumerate() {
            if turn % 2 == 0 {
                pieces_1.push(C(id));
                squares_2.push(C(square));
            } else {
                pieces_2.push(C(id));
                squares_1.push(C(square));
            }
        }
        let result = play(
            Scripted::boxed(&pieces_1, &squares_1),
            Scripted::boxed(&pieces_2, &squares_2),
            GameSettings::default(),
        );
        assert_eq!(result, GameResult::Tie);
    }

    #[test]
    fn illegal_moves_are_reported() {
        use Turn::Continue as C;
        // Player 2 hands back the piece that was already placed
        let result = play(
            Scripted::boxed(&[C(5)], &[]),
            Scripted::boxed(&[C(5)], &[C((2, 2))]),
            GameSettings::default(),
        );
        assert_eq!(
            result,
            GameResult::IllegalMoveByPlayer {
                player_idx: 1,
                err: IllegalMove::PieceUnavailable { piece: piece!(5) },
            }
        );

        // Player 1 places on an occupied square
        let result = play(
            Scripted::boxed(&[C(5)], &[C((2, 2))]),
            Scripted::boxed(&[C(6)], &[C((2, 2))]),
            GameSettings::default(),
        );
        assert!(matches!(
            result,
            GameResult::IllegalMoveByPlayer {
                player_idx: 0,
                err: IllegalMove::SquareOccupied { row: 2, col: 2, .. },
            }
        ));
    }

    #[test]
    fn forfeit_and_quit_end_the_game() {
        use Turn::Continue as C;
        let result = play(
            Scripted::boxed(&[C(5)], &[]),
            Scripted::boxed(&[], &[Turn::Forfeit]),
            GameSettings::default(),
        );
        assert_eq!(
            result,
            GameResult::Forfeited {
                player_idx: 1,
                reason: ForfeitReason::Resigned,
            }
        );

        let result = play(
            Scripted::boxed(&[Turn::HardQuit], &[]),
            Scripted::boxed(&[], &[]),
            GameSettings::default(),
        );
        assert_eq!(result, GameResult::Quit { player_idx: 0 });
    }

    #[test]
    fn slow_answers_forfeit() {
        use Turn::Continue as C;
        let mut slow = Scripted::boxed(&[C(5)], &[]);
        slow.delay = Duration::from_millis(50);
        let settings = GameSettings {
            time_limit: Some(Duration::from_millis(10)),
        };
        let result = play(slow, Scripted::boxed(&[], &[]), settings);
        assert_eq!(
            result,
            GameResult::Forfeited {
                player_idx: 0,
                reason: ForfeitReason::TimeLimitExceeded,
            }
        );
    }

    #[test]
    fn ai_players_finish_their_games() {
        let mut rng = StdRng::seed_from_u64(5);
        for seed in 0..3 {
            let mut player_1 = Player::new(
                "low",
                Box::new(AiPlayer::new(SearchEngine::new(
                    Difficulty::Low,
                    StdRng::seed_from_u64(seed),
                ))),
            );
            let mut player_2 = Player::new(
                "medium",
                Box::new(AiPlayer::new(SearchEngine::new(
                    Difficulty::Medium,
                    StdRng::seed_from_u64(seed + 100),
                ))),
            );
            let settings = GameSettings::default();
            let result = play_game(&mut rng, &mut player_1, &mut player_2, &settings).unwrap();
            assert!(matches!(
                result,
                GameResult::WonByPlayer { .. } | GameResult::Tie
            ));
        }
    }
}
