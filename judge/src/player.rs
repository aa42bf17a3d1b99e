use quarto::{Piece, SearchEngine, Square, State};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use crate::config::{PlayerConfig, PlayerKind};
use crate::game::GameResult;
use crate::human::HumanPlayer;

/// What a contestant answers to a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Turn<T> {
    Continue(T),
    /// Give up the current game.
    Forfeit,
    /// Stop playing altogether.
    HardQuit,
}

/// Something that can play one side of a game.
///
/// Answers are not checked here, the game loop rejects illegal ones.
/// An `Err` means the contestant could not answer at all, e.g. because
/// its input broke.
pub trait MoveSource {
    /// Chooses the piece the opponent has to place next.
    fn choose_piece(&mut self, state: &State) -> anyhow::Result<Turn<Piece>>;

    /// Chooses where to place the held piece.
    fn choose_square(&mut self, state: &State) -> anyhow::Result<Turn<Square>>;

    /// Called after either player placed a piece.
    fn piece_placed(
        &mut self,
        _state: &State,
        _player_name: &str,
        _piece: Piece,
        _square: Square,
    ) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called once the game is over, with the final position.
    fn game_over(
        &mut self,
        _state: &State,
        _result: &GameResult,
        _player_names: &[String; 2],
    ) -> anyhow::Result<()> {
        Ok(())
    }
}

pub struct Player {
    pub name: String,
    source: Box<dyn MoveSource>,
}

impl Player {
    pub fn new(name: &str, source: Box<dyn MoveSource>) -> Self {
        Self {
            name: String::from(name),
            source,
        }
    }

    /// AI contestants without a configured seed get one from `rng`.
    pub fn from_config(config: &PlayerConfig, rng: &mut StdRng) -> anyhow::Result<Self> {
        let source: Box<dyn MoveSource> = match config.kind {
            PlayerKind::Ai {
                difficulty, seed, ..
            } => {
                let seed = seed.unwrap_or_else(|| rng.gen());
                trace!(player = &config.nick, %difficulty, seed, "Creating AI player");
                let options = config.kind.search_options().unwrap_or_default();
                Box::new(AiPlayer::new(SearchEngine::with_options(
                    difficulty,
                    options,
                    StdRng::seed_from_u64(seed),
                )))
            }
            PlayerKind::Human => Box::new(HumanPlayer::console(&config.nick)),
        };
        Ok(Self::new(&config.nick, source))
    }

    pub fn choose_piece(&mut self, state: &State) -> anyhow::Result<Turn<Piece>> {
        let turn = self.source.choose_piece(state)?;
        trace!(name: "Chose piece", player = &self.name, turn = ?turn);
        Ok(turn)
    }

    pub fn choose_square(&mut self, state: &State) -> anyhow::Result<Turn<Square>> {
        let turn = self.source.choose_square(state)?;
        trace!(name: "Chose square", player = &self.name, turn = ?turn);
        Ok(turn)
    }

    pub fn piece_placed(
        &mut self,
        state: &State,
        player_name: &str,
        piece: Piece,
        square: Square,
    ) -> anyhow::Result<()> {
        self.source.piece_placed(state, player_name, piece, square)
    }

    pub fn game_over(
        &mut self,
        state: &State,
        result: &GameResult,
        player_names: &[String; 2],
    ) -> anyhow::Result<()> {
        self.source.game_over(state, result, player_names)
    }
}

/// A contestant that asks a [`SearchEngine`]. It never forfeits.
pub struct AiPlayer {
    engine: SearchEngine<StdRng>,
}

impl AiPlayer {
    pub fn new(engine: SearchEngine<StdRng>) -> Self {
        Self { engine }
    }
}

impl MoveSource for AiPlayer {
    fn choose_piece(&mut self, state: &State) -> anyhow::Result<Turn<Piece>> {
        Ok(Turn::Continue(self.engine.choose_piece(state)?))
    }

    fn choose_square(&mut self, state: &State) -> anyhow::Result<Turn<Square>> {
        Ok(Turn::Continue(self.engine.choose_square(state)?))
    }
}

#[cfg(test)]
mod tests {
    use quarto::{piece, Difficulty};

    use super::*;

    #[test]
    fn ai_player_answers_legally() {
        let config = PlayerConfig {
            nick: String::from("HAL"),
            kind: PlayerKind::Ai {
                difficulty: Difficulty::High,
                leaf_evaluation: Default::default(),
                depth: None,
                seed: Some(3),
            },
        };
        let mut player = Player::from_config(&config, &mut StdRng::seed_from_u64(0)).unwrap();
        assert_eq!(player.name, "HAL");

        let mut state = State::new();
        let Turn::Continue(piece) = player.choose_piece(&state).unwrap() else {
            panic!("AI player did not continue");
        };
        state.pick_piece(piece).unwrap();
        let Turn::Continue(square) = player.choose_square(&state).unwrap() else {
            panic!("AI player did not continue");
        };
        state.place_at(square).unwrap();
    }

    #[test]
    fn engine_misuse_is_an_error() {
        let engine = SearchEngine::new(Difficulty::Low, StdRng::seed_from_u64(0));
        let mut player = Player::new("HAL", Box::new(AiPlayer::new(engine)));
        let mut state = State::new();
        state.pick_piece(piece!(0)).unwrap();
        assert!(player.choose_piece(&state).is_err());
    }

    #[test]
    fn configured_seed_makes_ai_reproducible() {
        let config = PlayerConfig {
            nick: String::from("HAL"),
            kind: PlayerKind::Ai {
                difficulty: Difficulty::Medium,
                leaf_evaluation: Default::default(),
                depth: Some(1),
                seed: Some(99),
            },
        };
        let state = State::new();
        let choices: Vec<Turn<Piece>> = (0..2)
            .map(|judge_seed| {
                // The judge's RNG is not used when the seed is configured
                let mut rng = StdRng::seed_from_u64(judge_seed);
                let mut player = Player::from_config(&config, &mut rng).unwrap();
                player.choose_piece(&state).unwrap()
            })
            .collect();
        assert_eq!(choices[0], choices[1]);
    }
}
