// WGF
// copyright zipxing@hotmail.com 2022～2025

//! Terminal backend. Every character cell shows two stacked pixels with the
//! upper half block glyph: foreground color is the top pixel, background
//! color the bottom one. The screen surface is sampled down to the terminal
//! grid, only cells that changed since the previous frame are written.

use crate::{
    config::{Settings, WindowMode},
    event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind},
    render::{
        adapter::{to_error, Adapter},
        style::Rgb,
        surface::Surface,
    },
    util::Size,
};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{
        DisableMouseCapture, EnableMouseCapture, Event as CEvent, KeyCode as CKeyCode,
        KeyEventKind as CKeyEventKind, KeyModifiers as CKeyModifiers, MouseButton as CMouseButton,
        MouseEventKind as CMouseEventKind,
    },
    execute, queue,
    style::{Color as CColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use log::{info, warn};
use std::any::Any;
use std::io::{self, Write};
use std::time::Duration;

const HALF_BLOCK: char = '▀';

/// Maps terminal cells to screen pixels and back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellGrid {
    pub cols: u16,
    pub rows: u16,
    pub screen: Size,
}

impl CellGrid {
    /// Screen pixel sampled for the top (`half == 0`) or bottom half of a cell
    pub fn sample_point(&self, col: u16, row: u16, half: u32) -> (u32, u32) {
        let pw = u64::from(self.cols.max(1));
        let ph = u64::from(self.rows.max(1)) * 2;
        let x = (2 * u64::from(col) + 1) * u64::from(self.screen.width) / (2 * pw);
        let y = (2 * (u64::from(row) * 2 + u64::from(half)) + 1) * u64::from(self.screen.height)
            / (2 * ph);
        (x as u32, y as u32)
    }

    /// Screen pixel at the center of a cell, used for mouse positions
    pub fn cell_to_pixel(&self, col: u16, row: u16) -> (i32, i32) {
        let pw = u64::from(self.cols.max(1));
        let ph = u64::from(self.rows.max(1));
        let x = (2 * u64::from(col) + 1) * u64::from(self.screen.width) / (2 * pw);
        let y = (2 * u64::from(row) + 1) * u64::from(self.screen.height) / (2 * ph);
        (x as i32, y as i32)
    }

    pub fn len(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct CrosstermAdapter {
    pub writer: Box<dyn Write>,
    grid: CellGrid,
    previous: Vec<(Rgb, Rgb)>,
    hidden: bool,
    opened: bool,
}

impl Default for CrosstermAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl CrosstermAdapter {
    pub fn new() -> Self {
        Self {
            writer: Box::new(io::stdout()),
            grid: CellGrid {
                cols: 0,
                rows: 0,
                screen: Size::default(),
            },
            previous: vec![],
            hidden: false,
            opened: false,
        }
    }

    pub fn grid(&self) -> CellGrid {
        self.grid
    }

    fn resize_grid(&mut self, cols: u16, rows: u16) {
        self.grid.cols = cols;
        self.grid.rows = rows;
        // force a full redraw
        self.previous.clear();
    }

    fn cells(&self, screen: &Surface) -> Vec<(Rgb, Rgb)> {
        let mut cells = Vec::with_capacity(self.grid.len());
        for row in 0..self.grid.rows {
            for col in 0..self.grid.cols {
                let pick = |half| {
                    let (x, y) = self.grid.sample_point(col, row, half);
                    screen.pixel(x, y).map(|p| p.rgb()).unwrap_or_default()
                };
                cells.push((pick(0), pick(1)));
            }
        }
        cells
    }
}

fn ccolor(c: Rgb) -> CColor {
    CColor::Rgb {
        r: c.red,
        g: c.green,
        b: c.blue,
    }
}

impl Adapter for CrosstermAdapter {
    fn init(&mut self, title: &str, settings: &Settings) -> Result<(), String> {
        self.grid.screen = settings.size;
        self.hidden = settings.window_modes.flags().contains(WindowMode::HIDDEN);
        if self.hidden {
            info!("{} runs hidden, nothing will be drawn", title);
            return Ok(());
        }
        let (cols, rows) = terminal::size().map_err(|e| e.to_string())?;
        self.resize_grid(cols, rows);
        if !self.opened {
            to_error(enable_raw_mode())?;
            to_error(execute!(
                self.writer,
                EnterAlternateScreen,
                EnableMouseCapture,
                terminal::SetTitle(title)
            ))?;
            self.opened = true;
        }
        to_error(execute!(self.writer, Clear(ClearType::All)))
    }

    fn poll_event(&mut self, timeout: Duration, es: &mut Vec<Event>) -> bool {
        let ready = match crossterm::event::poll(timeout) {
            Ok(r) => r,
            Err(e) => {
                warn!("poll event failed: {}", e);
                return false;
            }
        };
        if !ready {
            return false;
        }
        let e = match crossterm::event::read() {
            Ok(e) => e,
            Err(e) => {
                warn!("read event failed: {}", e);
                return false;
            }
        };
        if let CEvent::Resize(cols, rows) = e {
            self.resize_grid(cols, rows);
        }
        match input_events_from_cross(&e, &self.grid) {
            Some(Event::Quit) => {
                es.push(Event::Quit);
                true
            }
            Some(et) => {
                es.push(et);
                false
            }
            None => false,
        }
    }

    fn present(&mut self, screen: &Surface) -> Result<(), String> {
        if self.hidden || !self.opened {
            return Ok(());
        }
        self.grid.screen = screen.size();
        let cells = self.cells(screen);
        let full = self.previous.len() != cells.len();

        let mut last_pos: Option<(u16, u16)> = None;
        let mut fg: Option<Rgb> = None;
        let mut bg: Option<Rgb> = None;
        for (i, cell) in cells.iter().enumerate() {
            if !full && self.previous[i] == *cell {
                continue;
            }
            let x = (i % self.grid.cols as usize) as u16;
            let y = (i / self.grid.cols as usize) as u16;
            // Move the cursor if the previous location was not (x - 1, y)
            if !matches!(last_pos, Some(p) if x == p.0 + 1 && y == p.1) {
                to_error(queue!(self.writer, MoveTo(x, y)))?;
            }
            last_pos = Some((x, y));
            if fg != Some(cell.0) {
                to_error(queue!(self.writer, SetForegroundColor(ccolor(cell.0))))?;
                fg = Some(cell.0);
            }
            if bg != Some(cell.1) {
                to_error(queue!(self.writer, SetBackgroundColor(ccolor(cell.1))))?;
                bg = Some(cell.1);
            }
            to_error(queue!(self.writer, Print(HALF_BLOCK)))?;
        }
        self.previous = cells;
        to_error(queue!(self.writer, ResetColor))?;
        self.writer.flush().map_err(|e| e.to_string())
    }

    fn set_cursor_visible(&mut self, visible: bool) -> Result<(), String> {
        if visible {
            to_error(execute!(self.writer, Show))
        } else {
            to_error(execute!(self.writer, Hide))
        }
    }

    fn reset(&mut self) {
        if !self.opened {
            return;
        }
        if let Err(e) = disable_raw_mode() {
            warn!("disable raw mode failed: {}", e);
        }
        if let Err(e) = execute!(self.writer, LeaveAlternateScreen, DisableMouseCapture, Show) {
            warn!("restore terminal failed: {}", e);
        }
        self.opened = false;
    }

    fn as_any(&mut self) -> &mut dyn Any {
        self
    }
}

fn button_from_cross(b: CMouseButton) -> MouseButton {
    match b {
        CMouseButton::Left => MouseButton::Left,
        CMouseButton::Right => MouseButton::Right,
        CMouseButton::Middle => MouseButton::Middle,
    }
}

fn modifiers_from_cross(m: CKeyModifiers) -> KeyModifiers {
    let mut km = KeyModifiers::NONE;
    if m.contains(CKeyModifiers::SHIFT) {
        km |= KeyModifiers::SHIFT;
    }
    if m.contains(CKeyModifiers::CONTROL) {
        km |= KeyModifiers::CONTROL;
    }
    if m.contains(CKeyModifiers::ALT) {
        km |= KeyModifiers::ALT;
    }
    if m.contains(CKeyModifiers::SUPER) {
        km |= KeyModifiers::SUPER;
    }
    km
}

/// Convert crossterm I/O events to WGF event, for the sake of unified event processing.
/// `q`, Esc and Ctrl-C become [`Event::Quit`].
pub fn input_events_from_cross(e: &CEvent, grid: &CellGrid) -> Option<Event> {
    match e {
        CEvent::Key(key) => {
            if key.kind != CKeyEventKind::Press {
                return None;
            }
            let modifiers = modifiers_from_cross(key.modifiers);
            let kc = match key.code {
                CKeyCode::Char('q') => return Some(Event::Quit),
                CKeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    return Some(Event::Quit)
                }
                CKeyCode::Esc => return Some(Event::Quit),
                CKeyCode::Char(cc) => KeyCode::Char(cc),
                CKeyCode::Backspace => KeyCode::Backspace,
                CKeyCode::Enter => KeyCode::Enter,
                CKeyCode::Up => KeyCode::Up,
                CKeyCode::Down => KeyCode::Down,
                CKeyCode::Left => KeyCode::Left,
                CKeyCode::Right => KeyCode::Right,
                CKeyCode::Home => KeyCode::Home,
                CKeyCode::End => KeyCode::End,
                CKeyCode::Tab => KeyCode::Tab,
                CKeyCode::Delete => KeyCode::Delete,
                CKeyCode::F(n) => KeyCode::F(n),
                _ => {
                    return None;
                }
            };
            Some(Event::Key(KeyEvent::new(kc, modifiers)))
        }
        CEvent::Mouse(mouse) => {
            let kind = match mouse.kind {
                CMouseEventKind::Down(b) => MouseEventKind::Down(button_from_cross(b)),
                CMouseEventKind::Up(b) => MouseEventKind::Up(button_from_cross(b)),
                CMouseEventKind::Drag(b) => MouseEventKind::Drag(button_from_cross(b)),
                CMouseEventKind::ScrollUp => MouseEventKind::ScrollUp,
                CMouseEventKind::ScrollDown => MouseEventKind::ScrollDown,
                _ => MouseEventKind::Moved,
            };
            let (x, y) = grid.cell_to_pixel(mouse.column, mouse.row);
            Some(Event::Mouse(MouseEvent {
                kind,
                x,
                y,
                modifiers: modifiers_from_cross(mouse.modifiers),
            }))
        }
        CEvent::Resize(cols, rows) => Some(Event::Resize(u32::from(*cols), u32::from(*rows) * 2)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent as CKeyEvent, MouseEvent as CMouseEvent};

    fn grid() -> CellGrid {
        CellGrid {
            cols: 80,
            rows: 24,
            screen: Size::new(160, 96),
        }
    }

    #[test]
    fn sampling_maps_cells_to_pixels() {
        let g = grid();
        // each cell is 2x4 pixels, halves are 2x2
        assert_eq!(g.sample_point(0, 0, 0), (1, 1));
        assert_eq!(g.sample_point(0, 0, 1), (1, 3));
        assert_eq!(g.sample_point(79, 23, 1), (159, 95));
        assert_eq!(g.cell_to_pixel(10, 5), (21, 22));
    }

    #[test]
    fn quit_keys() {
        let g = grid();
        let q = CEvent::Key(CKeyEvent::new(CKeyCode::Char('q'), CKeyModifiers::NONE));
        assert_eq!(input_events_from_cross(&q, &g), Some(Event::Quit));
        let ctrl_c = CEvent::Key(CKeyEvent::new(CKeyCode::Char('c'), CKeyModifiers::CONTROL));
        assert_eq!(input_events_from_cross(&ctrl_c, &g), Some(Event::Quit));
        let c = CEvent::Key(CKeyEvent::new(CKeyCode::Char('c'), CKeyModifiers::NONE));
        assert_eq!(
            input_events_from_cross(&c, &g),
            Some(Event::Key(KeyCode::Char('c').into()))
        );
    }

    #[test]
    fn mouse_in_pixels() {
        let g = grid();
        let m = CEvent::Mouse(CMouseEvent {
            kind: CMouseEventKind::Down(CMouseButton::Left),
            column: 10,
            row: 5,
            modifiers: CKeyModifiers::NONE,
        });
        assert_eq!(
            input_events_from_cross(&m, &g),
            Some(Event::Mouse(MouseEvent::new(
                MouseEventKind::Down(MouseButton::Left),
                21,
                22
            )))
        );
    }
}
