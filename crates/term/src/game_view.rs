//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{style_for, GameSnapshot, GameStatus};
use crate::fb::{CellStyle, FrameBuffer};
use crate::types::{Difficulty, Rgb};

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

const PLAYFIELD_BG: Rgb = Rgb::new(30, 30, 40);
const EMPTY_DOT: Rgb = Rgb::new(90, 90, 100);
const BORDER_FG: Rgb = Rgb::new(0, 100, 200);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Minimum side panel width; narrower viewports skip the panel.
const PANEL_MIN_W: u16 = 12;

/// A lightweight terminal renderer for the tile grid.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // Five columns fit every value up to 16384.
        Self {
            cell_w: 5,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Size of the bordered board frame for a snapshot.
    pub fn frame_size(&self, snap: &GameSnapshot) -> (u16, u16) {
        (
            (snap.width as u16) * self.cell_w + 2,
            (snap.height as u16) * self.cell_h + 2,
        )
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when
    /// the terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let (frame_w, frame_h) = self.frame_size(snap);
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        let bg = CellStyle::new(EMPTY_DOT, PLAYFIELD_BG);
        fb.fill_rect(
            start_x + 1,
            start_y + 1,
            frame_w - 2,
            frame_h - 2,
            ' ',
            bg,
        );
        self.draw_border(fb, start_x, start_y, frame_w, frame_h);

        // Grid row 0 is the bottom; screen rows grow downward.
        for row in 0..snap.height {
            for col in 0..snap.width {
                let (x, y) = self.cell_origin(snap, start_x, start_y, row, col);
                match snap.visible_at(row, col) {
                    Some(value) => self.draw_tile(fb, x, y, value),
                    None => self.draw_empty(fb, x, y),
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, start_x, start_y, frame_w);

        match snap.status {
            GameStatus::NotStarted => {
                self.draw_menu(fb, snap.difficulty, start_x, start_y, frame_w, frame_h)
            }
            GameStatus::Paused => {
                self.draw_overlay(fb, start_x, start_y, frame_w, frame_h, &["PAUSED"])
            }
            GameStatus::Won => self.draw_overlay(
                fb,
                start_x,
                start_y,
                frame_w,
                frame_h,
                &["YOU WIN!", "R restart  M menu"],
            ),
            GameStatus::Lost => self.draw_overlay(
                fb,
                start_x,
                start_y,
                frame_w,
                frame_h,
                &["GAME OVER", "R restart  M menu"],
            ),
            GameStatus::Playing => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn cell_origin(
        &self,
        snap: &GameSnapshot,
        start_x: u16,
        start_y: u16,
        row: usize,
        col: usize,
    ) -> (u16, u16) {
        let screen_row = (snap.height - 1 - row) as u16;
        (
            start_x + 1 + (col as u16) * self.cell_w,
            start_y + 1 + screen_row * self.cell_h,
        )
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        if w < 2 || h < 2 {
            return;
        }
        let style = CellStyle::new(BORDER_FG, PANEL_BG);

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty(&self, fb: &mut FrameBuffer, x: u16, y: u16) {
        let style = CellStyle::new(EMPTY_DOT, PLAYFIELD_BG).dim();
        fb.put_char(x + self.cell_w / 2, y + self.cell_h / 2, '·', style);
    }

    /// Fill one cell with the tile's palette color and center its value.
    fn draw_tile(&self, fb: &mut FrameBuffer, x: u16, y: u16, value: u32) {
        let tile = style_for(value);
        let style = CellStyle::new(tile.foreground, tile.background).bold();
        fb.fill_rect(x, y, self.cell_w, self.cell_h, ' ', style);

        let digits = digit_count(value as u64);
        let tx = x + self.cell_w.saturating_sub(digits) / 2;
        let ty = y + self.cell_h / 2;
        if digits <= self.cell_w {
            fb.put_u64(tx, ty, value as u64, style);
        } else {
            fb.put_char(x, ty, '#', style);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < PANEL_MIN_W {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u64(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "MODE", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, snap.difficulty.as_str(), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "PIECES", label);
        y = y.saturating_add(1);
        fb.put_u64(panel_x, y, snap.pieces_locked as u64, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "NEXT", label);
        fb.put_str(panel_x + 5, y, snap.next_kind.as_str(), value.dim());
        y = y.saturating_add(1);

        // Preview positions are relative to the piece's bottom-left corner.
        let top = snap.next.iter().map(|(p, _)| p.y).max().unwrap_or(0);
        for &(p, v) in &snap.next {
            let px = panel_x + (p.x as u16) * self.cell_w;
            let py = y + ((top - p.y) as u16) * self.cell_h;
            if py < viewport.height {
                self.draw_tile(fb, px, py, v);
            }
        }
        y = y.saturating_add((top as u16 + 2) * self.cell_h);

        let help = CellStyle::new(Rgb::new(140, 140, 140), PANEL_BG).dim();
        for line in ["←→↓ move", "↑ rotate", "SPC drop", "P pause", "Q quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, help);
            y = y.saturating_add(1);
        }
    }

    fn draw_menu(
        &self,
        fb: &mut FrameBuffer,
        selected: Difficulty,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
    ) {
        let title = CellStyle::new(Rgb::new(242, 75, 12), PANEL_BG).bold();
        let normal = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let highlight = CellStyle::new(Rgb::new(255, 255, 255), BORDER_FG).bold();

        let rows = 2 + Difficulty::ALL.len() as u16 + 2;
        let mut y = start_y.saturating_add(frame_h.saturating_sub(rows) / 2);

        fb.put_centered(start_x, y, frame_w, "TETRIS 2048", title);
        y = y.saturating_add(2);

        for (i, difficulty) in Difficulty::ALL.iter().enumerate() {
            let style = if *difficulty == selected {
                highlight
            } else {
                normal
            };
            let x = start_x.saturating_add(frame_w.saturating_sub(10) / 2);
            fb.put_u64(x, y, i as u64 + 1, style);
            fb.put_char(x + 1, y, ' ', style);
            fb.put_str(x + 2, y, difficulty.as_str(), style);
            y = y.saturating_add(1);
        }

        y = y.saturating_add(1);
        fb.put_centered(start_x, y, frame_w, "ENTER to start", normal);
    }

    fn draw_overlay(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        lines: &[&str],
    ) {
        let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        let mid_y = start_y.saturating_add(frame_h / 2);
        for (i, text) in lines.iter().enumerate() {
            fb.put_centered(start_x, mid_y.saturating_add(i as u16), frame_w, text, style);
        }
    }
}

fn digit_count(mut n: u64) -> u16 {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameState;
    use crate::types::{BoardDims, Point};

    fn small_snapshot() -> GameSnapshot {
        let dims = BoardDims::new(4, 4).unwrap();
        let mut snap = GameState::new(dims, Difficulty::Normal, 1).snapshot();
        snap.status = GameStatus::Playing;
        snap
    }

    #[test]
    fn digit_count_handles_boundaries() {
        assert_eq!(digit_count(0), 1);
        assert_eq!(digit_count(9), 1);
        assert_eq!(digit_count(10), 2);
        assert_eq!(digit_count(16384), 5);
    }

    #[test]
    fn bottom_row_renders_at_bottom_of_frame() {
        let mut snap = small_snapshot();
        snap.board[0] = Some(2048);

        let view = GameView::default();
        // 4 cells * 5 cols + border = 22 wide, 4 rows + border = 6 tall.
        let fb = view.render(&snap, Viewport::new(22, 6));

        assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
        assert_eq!(fb.get(21, 5).unwrap().ch, '┘');
        assert_eq!(fb.row_text(4), "│2048   ·    ·    ·  │");

        let cell = fb.get(1, 4).unwrap();
        assert_eq!(cell.style.bg, style_for(2048).background);
        assert_eq!(cell.style.fg, style_for(2048).foreground);
    }

    #[test]
    fn active_piece_draws_over_board_and_skips_ceiling() {
        let mut snap = small_snapshot();
        snap.active = vec![(Point::new(1, 3), 4), (Point::new(1, 4), 2)];

        let fb = GameView::default().render(&snap, Viewport::new(22, 6));
        assert_eq!(fb.row_text(1), "│  ·    4    ·    ·  │");
    }
}
