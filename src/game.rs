use crate::config::GameConfig;
use crate::pos::Pos;
use anyhow::Result;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Dir::Up => (0, -1),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
            Dir::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Dir {
        match self {
            Dir::Up => Dir::Down,
            Dir::Down => Dir::Up,
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

/// Why a game ended. Callers treat every variant the same way; the reason
/// is kept for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameOver {
    #[error("snake left the board")]
    OutOfBounds,
    #[error("snake ran into its own body")]
    SelfCollision,
    #[error("no free cell left for food")]
    BoardFull,
}

/// Result of one `advance()` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// No velocity yet; nothing moved.
    Idle,
    Moved,
    Ate,
    Over(GameOver),
}

pub struct Game {
    pub tiles: i32,
    pub snake: VecDeque<Pos>, // head first
    pub dir: Option<Dir>,
    pub food: Pos,
    pub score: u32,
    margin: i32,
    food_points: u32,
    last_moved: Option<Dir>,
    over: Option<GameOver>,
    rng: SmallRng,
}

impl Game {
    pub fn new(config: &GameConfig) -> Result<Self> {
        Self::with_rng(config, SmallRng::from_entropy())
    }

    pub fn with_seed(config: &GameConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(config: &GameConfig, rng: SmallRng) -> Result<Self> {
        config.validate()?;
        let mut g = Self {
            tiles: i32::from(config.tiles),
            snake: VecDeque::new(),
            dir: None,
            food: Pos::new(0, 0),
            score: 0,
            margin: i32::from(config.spawn_margin),
            food_points: config.food_points,
            last_moved: None,
            over: None,
            rng,
        };
        g.reset();
        Ok(g)
    }

    /// Start a fresh round: single-cell snake and food on distinct interior
    /// cells, no velocity, zero score.
    pub fn reset(&mut self) {
        let start = random_interior(&mut self.rng, self.tiles, self.margin);
        // A validated config always leaves a second interior cell.
        let food = place_cell(&mut self.rng, self.tiles, self.margin, |p| p == start)
            .unwrap_or(start);

        self.snake.clear();
        self.snake.push_back(start);
        self.food = food;
        self.dir = None;
        self.last_moved = None;
        self.score = 0;
        self.over = None;
        debug!(?start, ?food, "game reset");
    }

    pub fn head(&self) -> Pos {
        self.snake[0]
    }

    pub fn velocity(&self) -> (i32, i32) {
        self.dir.map_or((0, 0), Dir::delta)
    }

    pub fn is_alive(&self) -> bool {
        self.over.is_none()
    }

    pub fn game_over(&self) -> Option<GameOver> {
        self.over
    }

    pub fn snake_contains(&self, p: Pos) -> bool {
        self.snake.iter().any(|&s| s == p)
    }

    /// Change heading. A turn straight back onto the current heading, or onto
    /// the cell the head just came from, is ignored. Returns whether the new
    /// heading was taken.
    pub fn set_direction(&mut self, new_dir: Dir) -> bool {
        let reverses = |d: Option<Dir>| d.is_some_and(|d| d.opposite() == new_dir);
        if reverses(self.dir) || (self.snake.len() > 1 && reverses(self.last_moved)) {
            return false;
        }
        self.dir = Some(new_dir);
        true
    }

    /// Move the snake one cell. Collisions are checked against the next head
    /// before anything is mutated; once the game is over the state stays
    /// frozen and every later call reports the same reason.
    pub fn advance(&mut self) -> Step {
        if let Some(reason) = self.over {
            return Step::Over(reason);
        }
        let Some(dir) = self.dir else {
            return Step::Idle;
        };

        let next = self.head().offset(dir.delta());
        if let Err(reason) = self.check_move(next) {
            self.over = Some(reason);
            return Step::Over(reason);
        }

        self.snake.push_front(next);
        self.last_moved = Some(dir);

        if next != self.food {
            self.snake.pop_back();
            return Step::Moved;
        }

        self.score += self.food_points;
        let snake = &self.snake;
        match place_cell(&mut self.rng, self.tiles, self.margin, |p| snake.contains(&p)) {
            Some(food) => {
                debug!(?food, score = self.score, "food eaten");
                self.food = food;
                Step::Ate
            }
            None => {
                self.over = Some(GameOver::BoardFull);
                Step::Over(GameOver::BoardFull)
            }
        }
    }

    fn check_move(&self, next: Pos) -> Result<(), GameOver> {
        if !next.in_grid(self.tiles) {
            return Err(GameOver::OutOfBounds);
        }
        // The current tail still counts: it has not moved out yet.
        if self.snake.iter().skip(1).any(|&s| s == next) {
            return Err(GameOver::SelfCollision);
        }
        Ok(())
    }
}

fn random_interior(rng: &mut SmallRng, tiles: i32, margin: i32) -> Pos {
    Pos::new(
        rng.gen_range(margin..tiles - margin),
        rng.gen_range(margin..tiles - margin),
    )
}

/// Pick a cell for which `occupied` is false. Rejection-samples the interior
/// for a bounded number of attempts, then falls back to enumerating the free
/// interior cells, then the free cells of the whole grid. `None` only when
/// the grid is full.
fn place_cell(
    rng: &mut SmallRng,
    tiles: i32,
    margin: i32,
    occupied: impl Fn(Pos) -> bool,
) -> Option<Pos> {
    let span = (tiles - 2 * margin).max(0) as usize;
    for _ in 0..span * span * 4 {
        let p = random_interior(rng, tiles, margin);
        if !occupied(p) {
            return Some(p);
        }
    }

    let free_in = |lo: i32, hi: i32| -> Vec<Pos> {
        (lo..hi)
            .flat_map(|y| (lo..hi).map(move |x| Pos::new(x, y)))
            .filter(|&p| !occupied(p))
            .collect()
    };
    let mut cells = free_in(margin, tiles - margin);
    if cells.is_empty() {
        cells = free_in(0, tiles);
    }
    debug!(free = cells.len(), "rejection sampling exhausted, enumerating free cells");
    if cells.is_empty() {
        return None;
    }
    Some(cells[rng.gen_range(0..cells.len())])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> Game {
        Game::with_seed(&GameConfig::default(), 7).unwrap()
    }

    fn place(g: &mut Game, body: &[(i32, i32)], dir: Option<Dir>, food: (i32, i32)) {
        g.snake = body.iter().map(|&(x, y)| Pos::new(x, y)).collect();
        g.dir = dir;
        g.last_moved = dir;
        g.food = Pos::new(food.0, food.1);
    }

    #[test]
    fn reset_places_single_cell_in_margin() {
        let mut g = game();
        for _ in 0..200 {
            g.reset();
            assert_eq!(g.snake.len(), 1);
            let head = g.head();
            assert!((2..18).contains(&head.x) && (2..18).contains(&head.y));
            assert!((2..18).contains(&g.food.x) && (2..18).contains(&g.food.y));
            assert_ne!(g.food, head);
        }
    }

    #[test]
    fn reset_twice_yields_fresh_state() {
        let mut g = game();
        g.set_direction(Dir::Right);
        g.score = 40;
        g.reset();
        g.reset();
        assert_eq!(g.score, 0);
        assert_eq!(g.velocity(), (0, 0));
        assert!(g.is_alive());
        assert_eq!(g.snake.len(), 1);
        assert!(!g.snake_contains(g.food));
    }

    #[test]
    fn single_segment_moves_without_growing() {
        let mut g = game();
        place(&mut g, &[(5, 5)], Some(Dir::Right), (10, 10));
        assert_eq!(g.advance(), Step::Moved);
        assert_eq!(g.snake, VecDeque::from([Pos::new(6, 5)]));
    }

    #[test]
    fn idle_without_velocity() {
        let mut g = game();
        let before = g.snake.clone();
        assert_eq!(g.advance(), Step::Idle);
        assert_eq!(g.snake, before);
    }

    #[test]
    fn eating_grows_by_one_and_scores_ten() {
        let mut g = game();
        place(&mut g, &[(5, 5), (4, 5)], Some(Dir::Right), (6, 5));
        assert_eq!(g.advance(), Step::Ate);
        assert_eq!(g.snake.len(), 3);
        assert_eq!(g.score, 10);
        assert!(!g.snake_contains(g.food));
    }

    #[test]
    fn length_constant_unless_eating() {
        let mut g = game();
        place(&mut g, &[(5, 5), (4, 5), (3, 5)], Some(Dir::Right), (5, 10));
        for _ in 0..8 {
            let len = g.snake.len();
            match g.advance() {
                Step::Moved => assert_eq!(g.snake.len(), len),
                Step::Ate => assert_eq!(g.snake.len(), len + 1),
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn left_wall_ends_game() {
        let mut g = game();
        place(&mut g, &[(0, 7)], Some(Dir::Left), (10, 10));
        assert_eq!(g.advance(), Step::Over(GameOver::OutOfBounds));
        assert_eq!(g.head(), Pos::new(0, 7));
    }

    #[test]
    fn right_wall_ends_game() {
        let mut g = game();
        place(&mut g, &[(19, 3)], Some(Dir::Right), (10, 10));
        assert_eq!(g.advance(), Step::Over(GameOver::OutOfBounds));
    }

    #[test]
    fn top_wall_ends_game() {
        let mut g = game();
        place(&mut g, &[(4, 0)], Some(Dir::Up), (10, 10));
        assert_eq!(g.advance(), Step::Over(GameOver::OutOfBounds));
        assert_eq!(g.head(), Pos::new(4, 0));
    }

    #[test]
    fn bottom_wall_ends_game() {
        let mut g = game();
        place(&mut g, &[(4, 18), (4, 17)], Some(Dir::Down), (10, 10));
        assert_eq!(g.advance(), Step::Moved);
        assert_eq!(g.advance(), Step::Over(GameOver::OutOfBounds));
        assert_eq!(g.head(), Pos::new(4, 19));
    }

    #[test]
    fn self_collision_ends_game() {
        let mut g = game();
        // Head at (5,5) turning up into (5,4), which is body.
        place(
            &mut g,
            &[(5, 5), (6, 5), (6, 4), (5, 4), (4, 4)],
            Some(Dir::Up),
            (10, 10),
        );
        g.last_moved = Some(Dir::Left);
        assert_eq!(g.advance(), Step::Over(GameOver::SelfCollision));
    }

    #[test]
    fn tail_cell_counts_as_body() {
        let mut g = game();
        // Square loop: next head is the current tail.
        place(&mut g, &[(5, 5), (5, 6), (6, 6), (6, 5)], Some(Dir::Right), (10, 10));
        assert_eq!(g.advance(), Step::Over(GameOver::SelfCollision));
    }

    #[test]
    fn frozen_after_game_over() {
        let mut g = game();
        place(&mut g, &[(0, 7)], Some(Dir::Left), (10, 10));
        assert_eq!(g.game_over(), None);
        g.advance();
        assert_eq!(g.game_over(), Some(GameOver::OutOfBounds));
        g.set_direction(Dir::Down);
        assert_eq!(g.advance(), Step::Over(GameOver::OutOfBounds));
        assert_eq!(g.head(), Pos::new(0, 7));
        assert!(!g.is_alive());
    }

    #[test]
    fn reversal_is_ignored() {
        let mut g = game();
        place(&mut g, &[(5, 5)], Some(Dir::Right), (10, 10));
        assert!(!g.set_direction(Dir::Left));
        assert_eq!(g.dir, Some(Dir::Right));
        assert!(g.set_direction(Dir::Up));
        assert!(!g.set_direction(Dir::Down));
        assert_eq!(g.dir, Some(Dir::Up));
    }

    #[test]
    fn any_direction_from_rest() {
        let mut g = game();
        assert!(g.set_direction(Dir::Left));
        assert_eq!(g.velocity(), (-1, 0));
    }

    #[test]
    fn two_turns_in_one_tick_cannot_fold_back() {
        let mut g = game();
        place(&mut g, &[(5, 5), (4, 5)], Some(Dir::Right), (10, 10));
        assert!(g.set_direction(Dir::Up));
        assert!(!g.set_direction(Dir::Left));
        assert_eq!(g.advance(), Step::Moved);
        assert_eq!(g.head(), Pos::new(5, 4));
    }

    #[test]
    fn food_never_lands_on_snake() {
        let mut g = game();
        // Fill most of the interior so rejection sampling has to work.
        let body: Vec<(i32, i32)> = (2..18)
            .flat_map(|y| (2..18).map(move |x| (x, y)))
            .filter(|&(x, y)| !(x == 17 && y == 17))
            .collect();
        place(&mut g, &body, None, (0, 0));
        let snake = &g.snake;
        let p = place_cell(&mut g.rng, 20, 2, |p| snake.contains(&p)).unwrap();
        assert_eq!(p, Pos::new(17, 17));
    }

    #[test]
    fn falls_back_to_outer_ring_then_gives_up() {
        let mut rng = SmallRng::seed_from_u64(1);
        let p = place_cell(&mut rng, 6, 2, |p| (2..4).contains(&p.x) && (2..4).contains(&p.y))
            .unwrap();
        assert!(!((2..4).contains(&p.x) && (2..4).contains(&p.y)));
        assert_eq!(place_cell(&mut rng, 6, 2, |_| true), None);
    }
}
