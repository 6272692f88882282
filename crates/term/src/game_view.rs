//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! The screen is a grid of tiles (25x20 for the default field, the 800x640
//! window divided into 32px cells). Each tile is `tile_w` terminal columns by
//! `tile_h` rows; 2x1 compensates for the usual glyph aspect ratio.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, SessionState, LAYOUT_COLUMNS, LAYOUT_ROWS, MAX_DISPLAY_NUMBER};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Digits shown by each counter.
const COUNTER_DIGITS: u16 = 6;

/// Tile positions of everything on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Top-left tile of the field.
    pub field: (u16, u16),
    pub field_size: (u16, u16),
    /// First tile column of the side panel.
    pub panel_x: u16,
    pub level_row: u16,
    pub lines_row: u16,
    pub score_row: u16,
    /// Anchor of the next-piece preview; layout cell (col, row) is drawn at
    /// `(preview.0 + row, preview.1 - col)`.
    pub preview: (u16, u16),
    /// Grid size in tiles.
    pub columns: u16,
    pub rows: u16,
}

impl Layout {
    pub fn for_field(width: u16, height: u16) -> Self {
        let field: (u16, u16) = (2, 0);
        let panel_x = field.0.saturating_add(width).saturating_add(4);
        Self {
            field,
            field_size: (width, height),
            panel_x,
            level_row: 2,
            lines_row: 6,
            score_row: 10,
            preview: (panel_x, 16),
            columns: LAYOUT_COLUMNS.max(panel_x.saturating_add(COUNTER_DIGITS + 1)),
            rows: LAYOUT_ROWS.max(field.1.saturating_add(height)),
        }
    }
}

/// Background of the playing area.
const FIELD_BG: Rgb = Rgb::new(30, 30, 40);

/// Foreground color of a kind.
pub fn kind_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::Z => Rgb::new(220, 80, 80),
    }
}

/// A lightweight tile renderer for the game.
pub struct GameView {
    /// Tile width in terminal columns.
    tile_w: u16,
    /// Tile height in terminal rows.
    tile_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(tile_w: u16, tile_h: u16) -> Self {
        Self {
            tile_w: tile_w.max(1),
            tile_h: tile_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Terminal size needed to show the whole grid for `snap`.
    pub fn required_size(&self, snap: &GameSnapshot) -> Viewport {
        let layout = Layout::for_field(snap.width, snap.height);
        Viewport::new(
            layout.columns.saturating_mul(self.tile_w),
            layout.rows.saturating_mul(self.tile_h),
        )
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames; it is only resized when
    /// the viewport changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let layout = Layout::for_field(snap.width, snap.height);
        let needed = self.required_size(snap);
        let origin = (
            viewport.width.saturating_sub(needed.width) / 2,
            match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(needed.height) / 2,
                AnchorY::Top => 0,
            },
        );
        let frame = Frame {
            view: self,
            origin,
        };

        self.draw_field(fb, &frame, &layout, snap);
        self.draw_panel(fb, &frame, &layout, snap);

        match snap.state {
            SessionState::Paused => self.draw_overlay_text(fb, &frame, &layout, "PAUSED"),
            SessionState::GameOver => self.draw_overlay_text(fb, &frame, &layout, "GAME OVER"),
            SessionState::Running => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_field(
        &self,
        fb: &mut FrameBuffer,
        frame: &Frame,
        layout: &Layout,
        snap: &GameSnapshot,
    ) {
        let (fx, fy) = layout.field;
        let (w, h) = layout.field_size;
        let empty = CellStyle::new(Rgb::new(90, 90, 100), FIELD_BG).dim();
        let wall = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        for y in 0..h {
            for x in 0..w {
                let id = snap.cell(x as i32, y as i32);
                match PieceKind::from_id(id) {
                    Some(kind) => frame.fill_tile(fb, fx + x, fy + y, '█', block_style(kind)),
                    None => frame.fill_tile(fb, fx + x, fy + y, '·', empty),
                }
            }
        }

        // Walls hug the field in the spare tile on either side.
        let (left, top) = frame.tile_origin(fx, fy);
        let (right, _) = frame.tile_origin(fx + w, fy);
        for row in 0..h.saturating_mul(self.tile_h) {
            if left > 0 {
                fb.put_char(left - 1, top + row, '│', wall);
            }
            fb.put_char(right, top + row, '│', wall);
        }

        if let Some(kind) = snap.active_kind {
            for &(x, y) in &snap.active {
                if x >= 0 && y >= 0 && x < w as i32 && y < h as i32 {
                    frame.fill_tile(fb, fx + x as u16, fy + y as u16, '█', block_style(kind));
                }
            }
        }
    }

    fn draw_panel(
        &self,
        fb: &mut FrameBuffer,
        frame: &Frame,
        layout: &Layout,
        snap: &GameSnapshot,
    ) {
        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let counters = [
            ("LEVEL", layout.level_row, snap.level),
            ("LINES", layout.lines_row, snap.lines),
            ("SCORE", layout.score_row, snap.score),
        ];
        for (name, row, n) in counters {
            if row > 0 {
                let (x, y) = frame.tile_origin(layout.panel_x, row - 1);
                fb.put_str(x, y, name, label);
            }
            self.draw_number(fb, frame, layout.panel_x, row, n, value);
        }

        let (px, py) = layout.preview;
        if py >= 3 {
            let (x, y) = frame.tile_origin(px, py - 2);
            fb.put_str(x, y, "NEXT", label);
        }
        let style = block_style(snap.next_kind);
        for (col, row) in snap.next_kind.layout() {
            let tx = px + row as u16;
            let ty = py.saturating_sub(col as u16);
            frame.fill_tile(fb, tx, ty, '█', style);
        }
    }

    /// Six-digit counter starting at tile `tx`, one digit per tile,
    /// right-aligned and clamped to [`MAX_DISPLAY_NUMBER`].
    fn draw_number(
        &self,
        fb: &mut FrameBuffer,
        frame: &Frame,
        tx: u16,
        ty: u16,
        n: u32,
        style: CellStyle,
    ) {
        let mut v = n.min(MAX_DISPLAY_NUMBER);
        for i in (0..COUNTER_DIGITS).rev() {
            let (x, y) = frame.tile_origin(tx + i, ty);
            fb.put_char(x, y, char::from(b'0' + (v % 10) as u8), style);
            v /= 10;
            if v == 0 {
                break;
            }
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, frame: &Frame, layout: &Layout, text: &str) {
        let (fx, fy) = layout.field;
        let (w, h) = layout.field_size;
        let (left, top) = frame.tile_origin(fx, fy + h / 2);
        let span = w.saturating_mul(self.tile_w);
        let text_w = text.chars().count() as u16;
        let x = left.saturating_add(span.saturating_sub(text_w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        fb.put_str(x, top, text, style);
    }
}

fn block_style(kind: PieceKind) -> CellStyle {
    CellStyle::new(kind_color(kind), FIELD_BG).bold()
}

/// Placement of the tile grid inside the viewport.
struct Frame<'a> {
    view: &'a GameView,
    origin: (u16, u16),
}

impl Frame<'_> {
    fn tile_origin(&self, tx: u16, ty: u16) -> (u16, u16) {
        (
            self.origin.0.saturating_add(tx.saturating_mul(self.view.tile_w)),
            self.origin.1.saturating_add(ty.saturating_mul(self.view.tile_h)),
        )
    }

    fn fill_tile(&self, fb: &mut FrameBuffer, tx: u16, ty: u16, ch: char, style: CellStyle) {
        let (x, y) = self.tile_origin(tx, ty);
        fb.fill_rect(x, y, self.view.tile_w, self.view.tile_h, ch, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Game;

    fn columns(fb: &FrameBuffer, y: u16, from: usize, to: usize) -> String {
        fb.row_string(y).chars().skip(from).take(to - from).collect()
    }

    fn snapshot() -> GameSnapshot {
        let mut snap = Game::new(1).snapshot();
        snap.active_kind = None;
        snap
    }

    #[test]
    fn test_default_layout_matches_window_grid() {
        let layout = Layout::for_field(10, 20);
        assert_eq!((layout.columns, layout.rows), (25, 20));
        assert_eq!(layout.panel_x, 16);
        assert_eq!(layout.preview, (16, 16));
    }

    #[test]
    fn test_locked_cell_is_two_columns_wide() {
        let mut snap = snapshot();
        snap.field[19 * 10] = PieceKind::Z.id();

        let fb = GameView::default().render(&snap, Viewport::new(50, 20));
        // Field starts at tile column 2 = terminal column 4.
        assert_eq!(fb.get(4, 19).unwrap().ch, '█');
        assert_eq!(fb.get(5, 19).unwrap().ch, '█');
        assert_eq!(fb.get(4, 19).unwrap().style.fg, kind_color(PieceKind::Z));
        assert_eq!(fb.get(6, 19).unwrap().ch, '·');
    }

    #[test]
    fn test_counters_are_right_aligned_and_clamped() {
        let mut snap = snapshot();
        snap.level = 3;
        snap.score = 1_234_567;

        let fb = GameView::default().render(&snap, Viewport::new(50, 20));
        // Six tiles from column 16: terminal columns 32..44, one digit per tile.
        assert_eq!(columns(&fb, 2, 32, 44), "          3 ");
        assert_eq!(columns(&fb, 10, 32, 44), "9 9 9 9 9 9 ");
    }

    #[test]
    fn test_overlay_shows_state() {
        let mut snap = snapshot();
        snap.state = SessionState::GameOver;
        let fb = GameView::default().render(&snap, Viewport::new(50, 20));
        assert!(fb.row_string(10).contains("GAME OVER"));

        snap.state = SessionState::Paused;
        let fb = GameView::default().render(&snap, Viewport::new(50, 20));
        assert!(fb.row_string(10).contains("PAUSED"));
    }
}
