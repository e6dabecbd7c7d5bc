//! Hotkey definition, modifier mask and the human-readable label.

use crate::key::Key;
use anyhow::{anyhow, Result};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::sync::mpsc::SyncSender;
use std::sync::Arc;

/// Modifier mask passed to the OS alongside the key code.
///
/// Bit values follow the Win32 `MOD_*` layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u32);

impl Modifiers {
    /// Either ALT key must be held down.
    pub const ALT: Modifiers = Modifiers(0x0001);
    /// Either CTRL key must be held down.
    pub const CTRL: Modifiers = Modifiers(0x0002);
    /// Either SHIFT key must be held down.
    pub const SHIFT: Modifiers = Modifiers(0x0004);
    /// Either WINDOWS key must be held down. Shortcuts involving it are mostly reserved by the OS.
    pub const WIN: Modifiers = Modifiers(0x0008);
    /// Keyboard auto-repeat does not yield multiple notifications.
    pub const NO_REPEAT: Modifiers = Modifiers(0x4000);

    pub const fn empty() -> Self {
        Modifiers(0)
    }

    /// Wrap a raw mask. Unknown bits are kept and handed to the OS untouched.
    pub const fn from_bits(bits: u32) -> Self {
        Modifiers(bits)
    }

    pub const fn bits(&self) -> u32 {
        self.0
    }

    pub const fn contains(&self, other: Modifiers) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Modifiers) -> Modifiers {
        Modifiers(self.0 | rhs.0)
    }
}

impl BitOrAssign for Modifiers {
    fn bitor_assign(&mut self, rhs: Modifiers) {
        self.0 |= rhs.0;
    }
}

/// Renders the label prefix, always in the order NoRepeat, Ctrl, Alt, Shift, Win.
impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.contains(Modifiers::NO_REPEAT) {
            f.write_str("NoRepeat ")?;
        }
        if self.contains(Modifiers::CTRL) {
            f.write_str("Ctrl+")?;
        }
        if self.contains(Modifiers::ALT) {
            f.write_str("Alt+")?;
        }
        if self.contains(Modifiers::SHIFT) {
            f.write_str("Shift+")?;
        }
        if self.contains(Modifiers::WIN) {
            f.write_str("Win+")?;
        }
        Ok(())
    }
}

/// Callback run on its own thread each time the hotkey fires.
pub type HotkeyCallback = Box<dyn Fn(&Hotkey) + Send + Sync + 'static>;

/// A global hotkey and the consumers it notifies.
///
/// A hotkey with neither a callback nor a channel can still be registered,
/// it just never reports anything.
pub struct Hotkey {
    /// Caller-assigned id, unique within a registry.
    pub id: i32,
    pub modifiers: Modifiers,
    /// Virtual-key code of the primary key, e.g. `'A' as u32`.
    pub key_code: u32,
    pub callback: Option<HotkeyCallback>,
    /// Bounded channel; a full channel drops the notification.
    pub channel: Option<SyncSender<Arc<Hotkey>>>,
}

impl Hotkey {
    /// Create a hotkey with no consumers attached.
    pub fn new(id: i32, modifiers: Modifiers, key_code: u32) -> Self {
        Self {
            id,
            modifiers,
            key_code,
            callback: None,
            channel: None,
        }
    }

    /// Attach a callback.
    pub fn with_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Hotkey) + Send + Sync + 'static,
    {
        self.callback = Some(Box::new(callback));
        self
    }

    /// Attach a delivery channel, usually the sender half of `mpsc::sync_channel`.
    pub fn with_channel(mut self, channel: SyncSender<Arc<Hotkey>>) -> Self {
        self.channel = Some(channel);
        self
    }

    /// Human-readable label such as `Hotkey[ID: 1, Ctrl+Alt+A]`.
    pub fn describe(&self) -> String {
        self.to_string()
    }

    /// The primary key, if the key code is one [`Key`] knows by name.
    ///
    /// The label always shows the raw code as a character; use this for a
    /// name like `F4` or `PageUp`.
    pub fn key(&self) -> Option<Key> {
        Key::from_code(self.key_code)
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hotkey[ID: {}, {}", self.id, self.modifiers)?;
        match char::from_u32(self.key_code) {
            Some(c) => write!(f, "{}", c)?,
            None => write!(f, "0x{:X}", self.key_code)?,
        }
        f.write_str("]")
    }
}

impl fmt::Debug for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hotkey")
            .field("id", &self.id)
            .field("modifiers", &self.modifiers)
            .field("key_code", &self.key_code)
            .field("callback", &self.callback.is_some())
            .field("channel", &self.channel.is_some())
            .finish()
    }
}

/// Parse an accelerator like "Ctrl+Shift+A" or "NoRepeat Alt+F4" into a hotkey with the given id.
pub fn parse_hotkey(id: i32, s: &str) -> Result<Hotkey> {
    let parts: Vec<&str> = s
        .split(|c: char| c == '+' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect();

    let Some((key_str, modifier_parts)) = parts.split_last() else {
        return Err(anyhow!("Empty hotkey string"));
    };

    let mut modifiers = Modifiers::empty();
    for part in modifier_parts {
        modifiers |= match part.to_uppercase().as_str() {
            "CTRL" | "CONTROL" => Modifiers::CTRL,
            "ALT" => Modifiers::ALT,
            "SHIFT" => Modifiers::SHIFT,
            "WIN" | "SUPER" | "META" => Modifiers::WIN,
            "NOREPEAT" => Modifiers::NO_REPEAT,
            _ => return Err(anyhow!("Unknown modifier: {}", part)),
        };
    }

    let key = Key::parse(key_str)?;
    Ok(Hotkey::new(id, modifiers, key.code()))
}
