// WGF
// copyright zipxing@hotmail.com 2022～2025

//! This module provides a unified input Event, describing quit requests,
//! keyboard and mouse events. Input events triggered by render adapters
//! such as cross or headless are converted here to unified Event and
//! stored in the context for the frame they were received in.

use bitflags::bitflags;

#[derive(Debug, PartialOrd, PartialEq, Eq, Clone, Hash)]
pub enum Event {
    /// Window closed or quit key pressed.
    Quit,
    /// A single key event with additional pressed modifiers.
    Key(KeyEvent),
    /// A single mouse event with additional pressed modifiers.
    Mouse(MouseEvent),
    /// Display resized, new size in pixels.
    Resize(u32, u32),
}

#[derive(Debug, PartialOrd, PartialEq, Eq, Clone, Copy, Hash)]
pub struct MouseEvent {
    /// The kind of mouse event that was caused.
    pub kind: MouseEventKind,
    /// Horizontal position in screen pixels.
    pub x: i32,
    /// Vertical position in screen pixels.
    pub y: i32,
    /// The key modifiers active when the event occurred.
    pub modifiers: KeyModifiers,
}

impl MouseEvent {
    pub const fn new(kind: MouseEventKind, x: i32, y: i32) -> Self {
        Self {
            kind,
            x,
            y,
            modifiers: KeyModifiers::NONE,
        }
    }
}

#[derive(Debug, PartialOrd, PartialEq, Eq, Clone, Copy, Hash)]
pub enum MouseEventKind {
    /// Pressed mouse button. Contains the button that was pressed.
    Down(MouseButton),
    /// Released mouse button. Contains the button that was released.
    Up(MouseButton),
    /// Moved the mouse cursor while pressing the contained mouse button.
    Drag(MouseButton),
    /// Moved the mouse cursor while not pressing a mouse button.
    Moved,
    ScrollUp,
    ScrollDown,
}

#[derive(Debug, PartialOrd, PartialEq, Eq, Clone, Copy, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

bitflags! {
    /// Represents key modifiers (shift, control, alt, etc.).
    #[derive(Debug, PartialOrd, PartialEq, Eq, Clone, Copy, Hash)]
    pub struct KeyModifiers: u8 {
        const SHIFT = 0b0000_0001;
        const CONTROL = 0b0000_0010;
        const ALT = 0b0000_0100;
        const SUPER = 0b0000_1000;
        const NONE = 0b0000_0000;
    }
}

/// Represents a key event.
#[derive(Debug, PartialOrd, PartialEq, Eq, Clone, Copy, Hash)]
pub struct KeyEvent {
    /// The key itself.
    pub code: KeyCode,
    /// Additional key modifiers.
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent { code, modifiers }
    }
}

impl From<KeyCode> for KeyEvent {
    fn from(code: KeyCode) -> Self {
        KeyEvent::new(code, KeyModifiers::NONE)
    }
}

/// Represents a key.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd)]
pub enum KeyCode {
    Backspace,
    Enter,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Tab,
    Delete,
    /// F key, `KeyCode::F(1)` represents F1.
    F(u8),
    /// A character, `KeyCode::Char('c')` represents `c` character.
    Char(char),
    Esc,
}

impl Event {
    /// Mouse position carried by this event, if any
    pub fn mouse_pos(&self) -> Option<(i32, i32)> {
        match self {
            Event::Mouse(m) => Some((m.x, m.y)),
            _ => None,
        }
    }

    pub fn is_mouse_down(&self, button: MouseButton) -> bool {
        matches!(self, Event::Mouse(m) if m.kind == MouseEventKind::Down(button))
    }

    pub fn is_mouse_up(&self, button: MouseButton) -> bool {
        matches!(self, Event::Mouse(m) if m.kind == MouseEventKind::Up(button))
    }

    pub fn is_key(&self, code: KeyCode) -> bool {
        matches!(self, Event::Key(k) if k.code == code)
    }
}
