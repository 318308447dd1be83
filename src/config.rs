use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Largest board side in pixels; keeps frame sizes well inside `u32`.
pub const MAX_BOARD_PX: u64 = 8192;

/// Tunables for one game. Defaults reproduce the classic 20×20 board with a
/// 100 ms tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Side length of the square grid, in cells
    pub tiles: u16,
    /// Side length of one cell on screen, in pixels
    pub cell_px: u32,
    /// Period of the simulation tick, in milliseconds
    pub tick_ms: u64,
    /// Points awarded per food eaten
    pub food_points: u32,
    /// Cells kept free along every edge when spawning snake and food
    pub spawn_margin: u16,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tiles: 20,
            cell_px: 30,
            tick_ms: 100,
            food_points: 10,
            spawn_margin: 2,
        }
    }
}

impl GameConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn validate(&self) -> Result<()> {
        // Snake and food need two distinct cells inside the margin.
        if u32::from(self.tiles) < u32::from(self.spawn_margin) * 2 + 2 {
            bail!(
                "a {0}x{0} grid leaves too little spawn area inside a {1}-cell margin",
                self.tiles,
                self.spawn_margin
            );
        }
        if self.cell_px < 8 {
            bail!("cell size must be at least 8 px, got {}", self.cell_px);
        }
        let board_px = u64::from(self.tiles) * u64::from(self.cell_px);
        if board_px > MAX_BOARD_PX {
            bail!("board of {board_px} px exceeds the {MAX_BOARD_PX} px limit");
        }
        if self.tick_ms == 0 {
            bail!("tick period must be at least 1 ms");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config.tiles, 20);
        assert_eq!(config.tick(), Duration::from_millis(100));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn grid_must_leave_spawn_area() {
        let config = GameConfig { tiles: 5, ..Default::default() };
        assert!(config.validate().is_err());

        let config = GameConfig { tiles: 6, ..Default::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_zero_tick_and_tiny_cells() {
        let config = GameConfig { tick_ms: 0, ..Default::default() };
        assert!(config.validate().is_err());

        let config = GameConfig { cell_px: 4, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn huge_margin_is_rejected_not_overflowed() {
        let config = GameConfig { spawn_margin: u16::MAX, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn board_pixel_size_is_capped() {
        let config = GameConfig { tiles: 1000, cell_px: 1000, ..Default::default() };
        assert!(config.validate().is_err());

        let config = GameConfig { tiles: 256, cell_px: 32, ..Default::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn round_trips_through_json() {
        let config = GameConfig { tiles: 12, ..Default::default() };
        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
