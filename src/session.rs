use crate::game::{Dir, Game, GameOver, Step};
use crate::input::parse_key;
use crate::scores::ScoreBoard;
use crate::store::ScoreStore;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Directions shown, waiting for the first movement key.
    Ready,
    Playing,
    /// Final score shown, waiting for a movement key to restart.
    GameOver,
}

/// Game flow around one `Game`: start screen, play, game over, restart.
/// Owns the score board and writes it back to the store whenever a game
/// ends.
pub struct Session {
    game: Game,
    phase: Phase,
    scores: ScoreBoard,
    store: Box<dyn ScoreStore>,
}

impl Session {
    pub fn new(game: Game, store: Box<dyn ScoreStore>) -> Self {
        let scores = ScoreBoard::load(store.as_ref());
        info!(best = scores.best, last = scores.last, "scores loaded");
        Self {
            game,
            phase: Phase::Ready,
            scores,
            store,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn scores(&self) -> ScoreBoard {
        self.scores
    }

    pub fn store(&self) -> &dyn ScoreStore {
        self.store.as_ref()
    }

    /// Feed a raw key identifier. Returns true when the key started a new
    /// game.
    pub fn handle_key(&mut self, key: &str) -> bool {
        match parse_key(key) {
            Some(dir) => self.handle_direction(dir),
            None => false,
        }
    }

    /// Steer while playing; from the start or game-over screen, any
    /// direction starts a fresh game heading that way. Returns true when a
    /// new game was started.
    pub fn handle_direction(&mut self, dir: Dir) -> bool {
        match self.phase {
            Phase::Playing => {
                if !self.game.set_direction(dir) {
                    debug!(?dir, "reversal ignored");
                }
                false
            }
            Phase::Ready | Phase::GameOver => {
                self.game.reset();
                self.game.set_direction(dir);
                self.phase = Phase::Playing;
                info!(?dir, head = ?self.game.head(), "game started");
                true
            }
        }
    }

    /// One scheduler tick. Only advances the game while playing.
    pub fn tick(&mut self) -> Option<Step> {
        if self.phase != Phase::Playing {
            return None;
        }
        let step = self.game.advance();
        if let Step::Over(reason) = step {
            self.finish(reason);
        }
        Some(step)
    }

    fn finish(&mut self, reason: GameOver) {
        self.phase = Phase::GameOver;
        let score = self.game.score;
        let new_best = self.scores.record(score);
        info!(%reason, score, best = self.scores.best, new_best, "game over");
        if let Err(err) = self.scores.save(self.store.as_mut(), new_best) {
            warn!("failed to persist scores: {err:#}");
        }
    }
}
