//! Key model for the low-level keyboard hook
//!
//! Raw hook messages are classified into [`KeyEvent`]s here so the
//! gesture detector never sees platform message codes.

use std::fmt;
use std::str::FromStr;

/// Virtual-key codes for the modifier keys (generic, left, right) and Tab
pub mod vk {
    pub const SHIFT: u32 = 0x10;
    pub const CONTROL: u32 = 0x11;
    /// Alt (generic)
    pub const MENU: u32 = 0x12;
    pub const TAB: u32 = 0x09;
    pub const LSHIFT: u32 = 0xA0;
    pub const RSHIFT: u32 = 0xA1;
    pub const LCONTROL: u32 = 0xA2;
    pub const RCONTROL: u32 = 0xA3;
    pub const LMENU: u32 = 0xA4;
    pub const RMENU: u32 = 0xA5;
}

/// Hook message identifiers delivered in the callback's `wParam`
pub mod msg {
    pub const WM_KEYDOWN: u32 = 0x0100;
    pub const WM_KEYUP: u32 = 0x0101;
    pub const WM_SYSKEYDOWN: u32 = 0x0104;
    pub const WM_SYSKEYUP: u32 = 0x0105;
}

/// The logical modifier whose standalone tap switches the input language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModifierKey {
    #[default]
    Alt,
    Control,
    Shift,
}

impl ModifierKey {
    /// Whether `vk_code` is this modifier, in its generic, left or right form
    pub fn matches(self, vk_code: u32) -> bool {
        match self {
            ModifierKey::Alt => matches!(vk_code, vk::MENU | vk::LMENU | vk::RMENU),
            ModifierKey::Control => {
                matches!(vk_code, vk::CONTROL | vk::LCONTROL | vk::RCONTROL)
            }
            ModifierKey::Shift => matches!(vk_code, vk::SHIFT | vk::LSHIFT | vk::RSHIFT),
        }
    }
}

impl fmt::Display for ModifierKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModifierKey::Alt => write!(f, "Alt"),
            ModifierKey::Control => write!(f, "Control"),
            ModifierKey::Shift => write!(f, "Shift"),
        }
    }
}

/// Error returned when a modifier name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown modifier key {0:?} (expected alt, ctrl or shift)")]
pub struct UnknownModifier(pub String);

impl FromStr for ModifierKey {
    type Err = UnknownModifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "alt" | "menu" => Ok(ModifierKey::Alt),
            "ctrl" | "control" => Ok(ModifierKey::Control),
            "shift" => Ok(ModifierKey::Shift),
            other => Err(UnknownModifier(other.to_string())),
        }
    }
}

/// Direction of a key transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTransition {
    Pressed,
    Released,
}

impl KeyTransition {
    /// Classify a hook message; non-keyboard messages yield `None`
    pub fn from_message(message: u32) -> Option<Self> {
        match message {
            msg::WM_KEYDOWN | msg::WM_SYSKEYDOWN => Some(KeyTransition::Pressed),
            msg::WM_KEYUP | msg::WM_SYSKEYUP => Some(KeyTransition::Released),
            _ => None,
        }
    }
}

/// A single key event as seen by the gesture detector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub vk_code: u32,
    pub transition: KeyTransition,
    /// The event's key is the designated modifier (either side)
    pub is_modifier: bool,
}

impl KeyEvent {
    pub fn pressed(vk_code: u32, modifier: ModifierKey) -> Self {
        Self::new(vk_code, KeyTransition::Pressed, modifier)
    }

    pub fn released(vk_code: u32, modifier: ModifierKey) -> Self {
        Self::new(vk_code, KeyTransition::Released, modifier)
    }

    fn new(vk_code: u32, transition: KeyTransition, modifier: ModifierKey) -> Self {
        Self {
            vk_code,
            transition,
            is_modifier: modifier.matches(vk_code),
        }
    }

    /// Build an event from a raw hook message and virtual-key code
    pub fn classify(message: u32, vk_code: u32, modifier: ModifierKey) -> Option<Self> {
        KeyTransition::from_message(message).map(|transition| Self::new(vk_code, transition, modifier))
    }
}
