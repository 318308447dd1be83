/// One grid cell. Coordinates are signed so a head that has just left the
/// board can still be represented and rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, (dx, dy): (i32, i32)) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// True when the cell lies in `[0, tiles)` on both axes.
    pub fn in_grid(self, tiles: i32) -> bool {
        self.x >= 0 && self.x < tiles && self.y >= 0 && self.y < tiles
    }
}
