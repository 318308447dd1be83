use crate::config::GameConfig;
use crate::game::Game;
use crate::pos::Pos;
use crate::session::{Phase, Session};

pub type Rgba = (u8, u8, u8, u8);

const BACKGROUND: Rgba = (0, 0, 0, 255);
const GRID_LINE: Rgba = (0x0f, 0x0f, 0x0f, 255);
const SNAKE: Rgba = (0x33, 0xff, 0x33, 255);
const SNAKE_EDGE: Rgba = (0x66, 0xff, 0x66, 255);
const EYE: Rgba = (0, 0, 0, 255);
const APPLE: Rgba = (0xff, 0, 0, 255);
const LEAF: Rgba = (0x2d, 0x5e, 0x1e, 255);
const STEM: Rgba = (0x4a, 0x37, 0x28, 255);
const HUD_BG: Rgba = (18, 18, 24, 255);
const HUD_TEXT: Rgba = (230, 230, 230, 255);
const PANEL: Rgba = (0, 0, 0, 170);
const TITLE: Rgba = (120, 255, 120, 255);
const ALERT: Rgba = (255, 100, 100, 255);
const BODY_TEXT: Rgba = (220, 220, 220, 255);

const TEXT_SCALE: u32 = 2;

/// Pixel geometry of the window: a square board with a score strip below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub tiles: u32,
    pub cell: u32,
    pub hud: u32,
}

impl Layout {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            tiles: u32::from(config.tiles),
            cell: config.cell_px,
            hud: 40,
        }
    }

    pub fn board_px(&self) -> u32 {
        self.tiles * self.cell
    }

    pub fn width(&self) -> u32 {
        self.board_px()
    }

    pub fn height(&self) -> u32 {
        self.board_px() + self.hud
    }
}

/// RGBA8 frame with bounds-checked, alpha-blended drawing.
pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut [u8], width: u32, height: u32) -> Self {
        Self { frame, width, height }
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y * self.width + x) * 4) as usize;
        (idx + 3 < self.frame.len()).then_some(idx)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        let idx = self.index(x, y)?;
        let px = &self.frame[idx..idx + 4];
        Some((px[0], px[1], px[2], px[3]))
    }

    pub fn clear(&mut self, (r, g, b, a): Rgba) {
        for px in self.frame.chunks_exact_mut(4) {
            px.copy_from_slice(&[r, g, b, a]);
        }
    }

    pub fn blend_pixel(&mut self, x: u32, y: u32, (r, g, b, a): Rgba) {
        let Some(idx) = self.index(x, y) else {
            return;
        };
        let ar = u16::from(a);
        let iar = 255 - ar;
        for (i, c) in [r, g, b].into_iter().enumerate() {
            let dst = u16::from(self.frame[idx + i]);
            self.frame[idx + i] = ((u16::from(c) * ar + dst * iar) / 255) as u8;
        }
        self.frame[idx + 3] = 255;
    }

    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, col: Rgba) {
        let x2 = (x + w).min(self.width);
        let y2 = (y + h).min(self.height);
        for py in y..y2 {
            for px in x..x2 {
                self.blend_pixel(px, py, col);
            }
        }
    }

    /// Filled ellipse with pixel-centre sampling.
    pub fn fill_ellipse(&mut self, cx: f32, cy: f32, rx: f32, ry: f32, col: Rgba) {
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }
        let x0 = (cx - rx).floor().max(0.0) as u32;
        let y0 = (cy - ry).floor().max(0.0) as u32;
        let x1 = (cx + rx).ceil().max(0.0) as u32;
        let y1 = (cy + ry).ceil().max(0.0) as u32;
        for py in y0..=y1 {
            for px in x0..=x1 {
                let dx = (px as f32 + 0.5 - cx) / rx;
                let dy = (py as f32 + 0.5 - cy) / ry;
                if dx * dx + dy * dy <= 1.0 {
                    self.blend_pixel(px, py, col);
                }
            }
        }
    }

    pub fn draw_text(&mut self, text: &str, x: u32, y: u32, scale: u32, col: Rgba) {
        let mut cx = x;
        for ch in text.chars() {
            if let Some(rows) = glyph_5x7(ch) {
                for (ry, row) in rows.iter().enumerate() {
                    for rx in 0..5u32 {
                        if (row >> (4 - rx)) & 1 == 1 {
                            let (px, py) = (cx + rx * scale, y + ry as u32 * scale);
                            self.fill_rect(px, py, scale, scale, col);
                        }
                    }
                }
            }
            cx += text_advance(scale);
        }
    }

    /// Text centred horizontally on the canvas.
    pub fn draw_text_centered(&mut self, text: &str, y: u32, scale: u32, col: Rgba) {
        let w = text.chars().count() as u32 * text_advance(scale);
        let x = self.width.saturating_sub(w) / 2;
        self.draw_text(text, x, y, scale, col);
    }
}

fn text_advance(scale: u32) -> u32 {
    6 * scale
}

/// Draw the whole frame for the session's current state.
pub fn render(frame: &mut [u8], layout: &Layout, session: &Session) {
    let mut canvas = Canvas::new(frame, layout.width(), layout.height());
    let game = session.game();

    canvas.clear(BACKGROUND);
    draw_grid(&mut canvas, layout);
    draw_food(&mut canvas, layout, game.food);
    for (i, &seg) in game.snake.iter().enumerate() {
        draw_segment(&mut canvas, layout, seg);
        if i == 0 {
            draw_eyes(&mut canvas, layout, seg, game);
        }
    }
    draw_hud(&mut canvas, layout, session);

    match session.phase() {
        Phase::Ready => draw_directions(&mut canvas, layout),
        Phase::GameOver => draw_game_over(&mut canvas, layout, session),
        Phase::Playing => {}
    }
}

fn cell_origin(layout: &Layout, p: Pos) -> (u32, u32) {
    (p.x.max(0) as u32 * layout.cell, p.y.max(0) as u32 * layout.cell)
}

fn draw_grid(canvas: &mut Canvas, layout: &Layout) {
    let board = layout.board_px();
    for i in 0..layout.tiles {
        let at = i * layout.cell;
        canvas.fill_rect(at, 0, 1, board, GRID_LINE);
        canvas.fill_rect(0, at, board, 1, GRID_LINE);
    }
}

fn draw_segment(canvas: &mut Canvas, layout: &Layout, p: Pos) {
    let (x, y) = cell_origin(layout, p);
    let inner = layout.cell.saturating_sub(2);
    canvas.fill_rect(x + 1, y + 1, inner, inner, SNAKE);
    // Lit top and left edges.
    canvas.fill_rect(x + 1, y + 1, inner, 2, SNAKE_EDGE);
    canvas.fill_rect(x + 1, y + 1, 2, inner, SNAKE_EDGE);
}

fn draw_eyes(canvas: &mut Canvas, layout: &Layout, head: Pos, game: &Game) {
    let (x, y) = cell_origin(layout, head);
    let c = layout.cell;
    let near = 6;
    let far = c.saturating_sub(10);
    let front = c.saturating_sub(8);
    let eyes = match game.velocity() {
        (1, _) => [(front, near), (front, far)],
        (-1, _) => [(near, near), (near, far)],
        (_, 1) => [(near, front), (far, front)],
        // Up, or not moving yet.
        _ => [(near, near), (far, near)],
    };
    for (ex, ey) in eyes {
        canvas.fill_rect(x + ex, y + ey, 4, 4, EYE);
    }
}

fn draw_food(canvas: &mut Canvas, layout: &Layout, food: Pos) {
    let (x, y) = cell_origin(layout, food);
    let half = layout.cell as f32 / 2.0;
    let (cx, top) = (x as f32 + half, y as f32);

    canvas.fill_ellipse(cx, top + half, (half - 4.0).max(1.0), (half - 4.0).max(1.0), APPLE);
    canvas.fill_ellipse(cx + 3.5, top + 4.5, 3.5, 1.5, LEAF);
    canvas.fill_rect((cx - 1.0) as u32, y + 2, 2, 4, STEM);
}

fn draw_hud(canvas: &mut Canvas, layout: &Layout, session: &Session) {
    let top = layout.board_px();
    canvas.fill_rect(0, top, layout.width(), layout.hud, HUD_BG);
    let scores = session.scores();
    let line = format!(
        "SCORE: {}  BEST: {}  LAST: {}",
        session.game().score,
        scores.best,
        scores.last
    );
    let text_h = 7 * TEXT_SCALE;
    canvas.draw_text(&line, 10, top + layout.hud.saturating_sub(text_h) / 2, TEXT_SCALE, HUD_TEXT);
}

fn draw_panel(canvas: &mut Canvas, layout: &Layout) -> u32 {
    let board = layout.board_px();
    canvas.fill_rect(0, 0, board, board, PANEL);
    board / 2
}

fn draw_directions(canvas: &mut Canvas, layout: &Layout) {
    let mid = draw_panel(canvas, layout);
    canvas.draw_text_centered("SNAKE", mid.saturating_sub(60), TEXT_SCALE * 2, TITLE);
    canvas.draw_text_centered("ARROWS OR WASD TO MOVE", mid, TEXT_SCALE, BODY_TEXT);
    canvas.draw_text_centered(
        "EAT FOOD - AVOID WALLS AND YOURSELF",
        mid + 24,
        TEXT_SCALE,
        BODY_TEXT,
    );
    canvas.draw_text_centered("PRESS A DIRECTION TO START", mid + 60, TEXT_SCALE, HUD_TEXT);
}

fn draw_game_over(canvas: &mut Canvas, layout: &Layout, session: &Session) {
    let mid = draw_panel(canvas, layout);
    let scores = session.scores();
    canvas.draw_text_centered("GAME OVER", mid.saturating_sub(60), TEXT_SCALE * 2, ALERT);
    canvas.draw_text_centered(&format!("SCORE: {}", scores.last), mid, TEXT_SCALE, BODY_TEXT);
    canvas.draw_text_centered(
        &format!("BEST: {}  LAST: {}", scores.best, scores.last),
        mid + 24,
        TEXT_SCALE,
        BODY_TEXT,
    );
    canvas.draw_text_centered("PRESS A DIRECTION TO RESTART", mid + 60, TEXT_SCALE, HUD_TEXT);
}

fn glyph_5x7(ch: char) -> Option<[u8; 7]> {
    Some(match ch.to_ascii_uppercase() {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b11110, 0b10001, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11100, 0b10010, 0b10001, 0b10001, 0b10001, 0b10010, 0b11100],
        'E' => [0b11111, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01110],
        'H' => [0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001, 0b10001],
        'I' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b11111],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b10010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b11011, 0b10001],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11110, 0b00001, 0b00001, 0b01110, 0b00001, 0b00001, 0b11110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        ':' => [0b00000, 0b00100, 0b00000, 0b00000, 0b00100, 0b00000, 0b00000],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        ' ' => [0; 7],
        _ => return None,
    })
}
