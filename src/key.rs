//! Key names and their Win32 virtual-key codes.

use anyhow::{anyhow, Result};

/// The primary key of a hotkey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A letter or digit. Stored uppercase; its virtual-key code is its ASCII code.
    Char(char),
    /// Function key `F1`..=`F24`.
    F(u8),
    Space,
    Enter,
    Tab,
    Escape,
    Backspace,
    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    Left,
    Up,
    Right,
    Down,
    Pause,
    ScrollLock,
    PrintScreen,
}

impl Key {
    /// Parse a key from a string like "A", "7", "F8" or "PageUp".
    pub fn parse(s: &str) -> Result<Self> {
        let upper = s.trim().to_uppercase();

        let mut chars = upper.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if c.is_ascii_alphanumeric() {
                return Ok(Key::Char(c));
            }
        }

        if let Some(n) = upper.strip_prefix('F').and_then(|n| n.parse::<u8>().ok()) {
            if (1..=24).contains(&n) {
                return Ok(Key::F(n));
            }
        }

        match upper.as_str() {
            "SPACE" => Ok(Key::Space),
            "ENTER" | "RETURN" => Ok(Key::Enter),
            "TAB" => Ok(Key::Tab),
            "ESCAPE" | "ESC" => Ok(Key::Escape),
            "BACKSPACE" => Ok(Key::Backspace),
            "INSERT" => Ok(Key::Insert),
            "DELETE" | "DEL" => Ok(Key::Delete),
            "HOME" => Ok(Key::Home),
            "END" => Ok(Key::End),
            "PAGEUP" | "PAGE_UP" => Ok(Key::PageUp),
            "PAGEDOWN" | "PAGE_DOWN" => Ok(Key::PageDown),
            "LEFT" => Ok(Key::Left),
            "UP" => Ok(Key::Up),
            "RIGHT" => Ok(Key::Right),
            "DOWN" => Ok(Key::Down),
            "PAUSE" => Ok(Key::Pause),
            "SCROLLLOCK" | "SCROLL_LOCK" => Ok(Key::ScrollLock),
            "PRINTSCREEN" | "PRINT_SCREEN" => Ok(Key::PrintScreen),
            _ => Err(anyhow!("Unknown key: {}", s)),
        }
    }

    /// Map a virtual-key code back to a named key, if it is one we know.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0x30..=0x39 | 0x41..=0x5A => char::from_u32(code).map(Key::Char),
            0x70..=0x87 => Some(Key::F((code - 0x6F) as u8)),
            0x20 => Some(Key::Space),
            0x0D => Some(Key::Enter),
            0x09 => Some(Key::Tab),
            0x1B => Some(Key::Escape),
            0x08 => Some(Key::Backspace),
            0x2D => Some(Key::Insert),
            0x2E => Some(Key::Delete),
            0x24 => Some(Key::Home),
            0x23 => Some(Key::End),
            0x21 => Some(Key::PageUp),
            0x22 => Some(Key::PageDown),
            0x25 => Some(Key::Left),
            0x26 => Some(Key::Up),
            0x27 => Some(Key::Right),
            0x28 => Some(Key::Down),
            0x13 => Some(Key::Pause),
            0x91 => Some(Key::ScrollLock),
            0x2C => Some(Key::PrintScreen),
            _ => None,
        }
    }

    /// The Win32 virtual-key code passed to `RegisterHotKey`.
    pub fn code(&self) -> u32 {
        match self {
            Key::Char(c) => *c as u32,
            Key::F(n) => 0x6F + u32::from(*n),
            Key::Space => 0x20,
            Key::Enter => 0x0D,
            Key::Tab => 0x09,
            Key::Escape => 0x1B,
            Key::Backspace => 0x08,
            Key::Insert => 0x2D,
            Key::Delete => 0x2E,
            Key::Home => 0x24,
            Key::End => 0x23,
            Key::PageUp => 0x21,
            Key::PageDown => 0x22,
            Key::Left => 0x25,
            Key::Up => 0x26,
            Key::Right => 0x27,
            Key::Down => 0x28,
            Key::Pause => 0x13,
            Key::ScrollLock => 0x91,
            Key::PrintScreen => 0x2C,
        }
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{}", c),
            Key::F(n) => write!(f, "F{}", n),
            Key::Space => write!(f, "Space"),
            Key::Enter => write!(f, "Enter"),
            Key::Tab => write!(f, "Tab"),
            Key::Escape => write!(f, "Escape"),
            Key::Backspace => write!(f, "Backspace"),
            Key::Insert => write!(f, "Insert"),
            Key::Delete => write!(f, "Delete"),
            Key::Home => write!(f, "Home"),
            Key::End => write!(f, "End"),
            Key::PageUp => write!(f, "PageUp"),
            Key::PageDown => write!(f, "PageDown"),
            Key::Left => write!(f, "Left"),
            Key::Up => write!(f, "Up"),
            Key::Right => write!(f, "Right"),
            Key::Down => write!(f, "Down"),
            Key::Pause => write!(f, "Pause"),
            Key::ScrollLock => write!(f, "ScrollLock"),
            Key::PrintScreen => write!(f, "PrintScreen"),
        }
    }
}
