/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. Compose the scene into the `front` buffer through `Surface`
///   2. Compare each cell with `back` buffer (previous frame)
///   3. Only emit terminal commands for cells that changed
///   4. All commands are batched with `queue!`, flushed once at the end
///   5. Swap front/back
///
/// Logical canvas units map to terminal cells at 10 columns and 4 rows per
/// board cell; the 50 × 30 board is centred in the terminal.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::board::{CANVAS_H, CANVAS_W, COL_W, ROW_H};
use crate::domain::sprite::{Sprite, Surface, TextStyle};
use crate::sim::world::WorldState;
use super::scene::compose_scene;
use super::sprites::{SpriteCache, GLYPH_H, GLYPH_W};

// ── Geometry ──

const UNITS_PER_COL: f32 = COL_W / GLYPH_W as f32;
const UNITS_PER_ROW: f32 = ROW_H / GLYPH_H as f32;
/// Sprite images carry transparent headroom above the artwork.
const SPRITE_HEADROOM: f32 = 50.0;
const BOARD_W: usize = 50;
const BOARD_H: usize = 30;

/// Logical position → board cell, rounded.
fn to_cell(x: f32, y: f32) -> (i32, i32) {
    ((x / UNITS_PER_COL).round() as i32, (y / UNITS_PER_ROW).round() as i32)
}

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    /// Canvas colour behind and around the board.
    const BASE_BG: Color = Color::Rgb { r: 22, g: 22, b: 35 };

    const BLANK: Cell = Cell { ch: ' ', fg: Color::White, bg: Cell::BASE_BG };

    /// Sentinel used to invalidate the back buffer so every cell is re-emitted.
    const INVALID: Cell = Cell { ch: '?', fg: Color::Magenta, bg: Color::Magenta };
}

// ── FrameBuffer: a 2D grid of Cells ──

#[derive(Debug)]
struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer { width: w, height: h, cells: vec![Cell::BLANK; w * h] }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color) {
        for (i, ch) in s.chars().enumerate() {
            let bg = self.get(x + i, y).bg;
            self.set(x + i, y, Cell { ch, fg, bg });
        }
    }
}

// ── Renderer ──

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    sprites: SpriteCache,
    term_w: usize,
    term_h: usize,
    /// Terminal cell of the board's top-left corner.
    origin: (usize, usize),
}

impl Renderer {
    pub fn new(sprites: SpriteCache) -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            sprites,
            term_w: 0,
            term_h: 0,
            origin: (0, 0),
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(Cell::BASE_BG),
            Clear(ClearType::All)
        )?;

        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.resize(tw as usize, th as usize);
        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    pub fn render(&mut self, world: &WorldState) -> io::Result<()> {
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize != self.term_w || th as usize != self.term_h {
            self.resize(tw as usize, th as usize);
            queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
        }

        self.front.clear();
        if self.term_w < BOARD_W || self.term_h < BOARD_H {
            let msg = format!("Terminal too small: need {BOARD_W}x{BOARD_H}");
            self.front.put_str(0, 0, &msg, Color::White);
        } else {
            compose_scene(world, self);
        }

        self.flush_diff()?;
        std::mem::swap(&mut self.front, &mut self.back);
        Ok(())
    }

    fn resize(&mut self, w: usize, h: usize) {
        self.term_w = w;
        self.term_h = h;
        self.front.resize(w, h);
        self.back.resize(w, h);
        // Force full repaint: back ≠ front for every cell.
        self.back.cells.fill(Cell::INVALID);
        self.origin = (w.saturating_sub(BOARD_W) / 2, h.saturating_sub(BOARD_H) / 2);
    }

    /// Board cell → terminal cell, clipped to the board rectangle.
    fn board_to_term(&self, bx: i32, by: i32) -> Option<(usize, usize)> {
        if bx < 0 || by < 0 || bx >= BOARD_W as i32 || by >= BOARD_H as i32 {
            return None;
        }
        Some((self.origin.0 + bx as usize, self.origin.1 + by as usize))
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = Cell::BASE_BG;

        queue!(self.writer,
            SetForegroundColor(Color::White),
            SetBackgroundColor(Cell::BASE_BG),
        )?;

        for y in 0..self.front.height {
            let mut need_move = true;
            for x in 0..self.front.width {
                let cell = self.front.get(x, y);
                if cell == self.back.get(x, y) {
                    need_move = true;
                    continue;
                }

                if need_move {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                    need_move = false;
                }
                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                if cell.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(cell.bg))?;
                    last_bg = cell.bg;
                }
                queue!(self.writer, Print(cell.ch))?;
            }
        }

        self.writer.flush()
    }
}

impl Surface for Renderer {
    fn draw_image(&mut self, sprite: Sprite, x: f32, y: f32) {
        let glyph = match self.sprites.get(sprite) {
            Some(g) => g.clone(),
            None => return,
        };
        let (col, row) = to_cell(x, y + SPRITE_HEADROOM);
        for (dy, line) in glyph.rows.iter().enumerate() {
            for (dx, ch) in line.chars().enumerate() {
                let Some((tx, ty)) = self.board_to_term(col + dx as i32, row + dy as i32) else {
                    continue;
                };
                match glyph.bg {
                    Some(bg) => self.front.set(tx, ty, Cell { ch, fg: glyph.fg, bg }),
                    None if ch != ' ' => {
                        let bg = self.front.get(tx, ty).bg;
                        self.front.set(tx, ty, Cell { ch, fg: glyph.fg, bg });
                    }
                    None => {}
                }
            }
        }
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle) {
        let fg = match style {
            TextStyle::Title | TextStyle::Caption => Color::Rgb { r: 255, g: 255, b: 153 },
            TextStyle::Hud => Color::White,
        };
        let (center, row) = to_cell(x.clamp(0.0, CANVAS_W), y.clamp(0.0, CANVAS_H));
        let start = center - text.chars().count() as i32 / 2;
        for (i, ch) in text.chars().enumerate() {
            if let Some((tx, ty)) = self.board_to_term(start + i as i32, row) {
                let bg = self.front.get(tx, ty).bg;
                self.front.set(tx, ty, Cell { ch, fg, bg });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiles_land_on_four_row_bands() {
        // Tile row r (drawn at r*83) starts at board row 4r+2.
        for r in 0..6 {
            let (_, row) = to_cell(0.0, r as f32 * ROW_H + SPRITE_HEADROOM);
            assert_eq!(row, 4 * r + 2);
        }
    }

    #[test]
    fn player_start_sits_on_the_grass() {
        let (col, row) = to_cell(202.0, 404.0 + SPRITE_HEADROOM);
        assert_eq!((col, row), (20, 22));
    }

    #[test]
    fn canvas_fits_board() {
        let (col, row) = to_cell(CANVAS_W, CANVAS_H);
        assert!(col as usize <= BOARD_W);
        assert!(row as usize <= BOARD_H);
    }

    #[test]
    fn framebuffer_put_str_keeps_background() {
        let mut fb = FrameBuffer::new(4, 1);
        let bg = Color::Blue;
        fb.set(1, 0, Cell { ch: ' ', fg: Color::White, bg });
        fb.put_str(0, 0, "ab", Color::Red);
        assert_eq!(fb.get(0, 0).bg, Cell::BASE_BG);
        assert_eq!(fb.get(1, 0), Cell { ch: 'b', fg: Color::Red, bg });
        assert_eq!(fb.get(9, 9), Cell::BLANK);
    }
}
