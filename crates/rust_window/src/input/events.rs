//! Input event records
//!
//! One flat, immutable record per input category. Each record is a snapshot
//! of the arguments of a single backend callback invocation. Codes (keys,
//! scancodes, actions, buttons) are the backend's raw integers and are passed
//! through untouched.

use std::path::PathBuf;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Raw action code for a released key or button
pub const ACTION_RELEASE: i32 = 0;
/// Raw action code for a pressed key or button
pub const ACTION_PRESS: i32 = 1;
/// Raw action code for a held key repeating
pub const ACTION_REPEAT: i32 = 2;

bitflags! {
    /// Modifier key mask delivered with key and mouse button events
    ///
    /// Unknown bits are retained so the backend value round-trips unchanged.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: i32 {
        /// Either shift key
        const SHIFT = 0x0001;
        /// Either control key
        const CONTROL = 0x0002;
        /// Either alt key
        const ALT = 0x0004;
        /// Either super key
        const SUPER = 0x0008;
        /// Caps lock is active
        const CAPS_LOCK = 0x0010;
        /// Num lock is active
        const NUM_LOCK = 0x0020;
    }
}

/// The independent input categories a window can arm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputCategory {
    /// Physical key press, release and repeat
    Key,
    /// Unicode character input
    Character,
    /// Cursor movement
    CursorPosition,
    /// Cursor entering or leaving the content area
    CursorEnter,
    /// Mouse button press and release
    MouseButton,
    /// Scroll wheel or touchpad offsets
    Scroll,
    /// Paths dropped onto the window
    FileDrop,
}

impl InputCategory {
    /// Every category, in declaration order
    pub const ALL: [Self; 7] = [
        Self::Key,
        Self::Character,
        Self::CursorPosition,
        Self::CursorEnter,
        Self::MouseButton,
        Self::Scroll,
        Self::FileDrop,
    ];
}

/// A key callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// Backend key code
    pub key: i32,
    /// Platform scancode
    pub scancode: i32,
    /// Raw action code, see [`ACTION_PRESS`] and friends
    pub action: i32,
    /// Modifier keys held at the time of the event
    pub modifiers: Modifiers,
}

/// A character callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterEvent {
    /// Unicode code point
    pub codepoint: u32,
}

impl CharacterEvent {
    /// The code point as a `char`, if it is a valid scalar value
    pub fn as_char(&self) -> Option<char> {
        char::from_u32(self.codepoint)
    }
}

/// A cursor position callback, in content-area coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorPositionEvent {
    /// Horizontal position
    pub x: f64,
    /// Vertical position
    pub y: f64,
}

/// A cursor enter/leave callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorEnterEvent {
    /// `true` when the cursor entered, `false` when it left
    pub entered: bool,
}

/// A mouse button callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseButtonEvent {
    /// Backend button code
    pub button: i32,
    /// Raw action code
    pub action: i32,
    /// Modifier keys held at the time of the event
    pub modifiers: Modifiers,
}

/// A scroll callback
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollEvent {
    /// Horizontal offset
    pub x_offset: f64,
    /// Vertical offset
    pub y_offset: f64,
}

/// A file drop callback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDropEvent {
    /// Dropped paths, in the order the backend reported them
    pub paths: Vec<PathBuf>,
}

/// A single backend delivery, tagged with its category
#[derive(Debug, Clone, PartialEq)]
pub enum InputEventRecord {
    /// See [`KeyEvent`]
    Key(KeyEvent),
    /// See [`CharacterEvent`]
    Character(CharacterEvent),
    /// See [`CursorPositionEvent`]
    CursorPosition(CursorPositionEvent),
    /// See [`CursorEnterEvent`]
    CursorEnter(CursorEnterEvent),
    /// See [`MouseButtonEvent`]
    MouseButton(MouseButtonEvent),
    /// See [`ScrollEvent`]
    Scroll(ScrollEvent),
    /// See [`FileDropEvent`]
    FileDrop(FileDropEvent),
}

impl InputEventRecord {
    /// The category this record belongs to
    pub const fn category(&self) -> InputCategory {
        match self {
            Self::Key(_) => InputCategory::Key,
            Self::Character(_) => InputCategory::Character,
            Self::CursorPosition(_) => InputCategory::CursorPosition,
            Self::CursorEnter(_) => InputCategory::CursorEnter,
            Self::MouseButton(_) => InputCategory::MouseButton,
            Self::Scroll(_) => InputCategory::Scroll,
            Self::FileDrop(_) => InputCategory::FileDrop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_category() {
        let record = InputEventRecord::Scroll(ScrollEvent { x_offset: 0.0, y_offset: -1.0 });
        assert_eq!(record.category(), InputCategory::Scroll);

        let record = InputEventRecord::FileDrop(FileDropEvent { paths: vec!["a.png".into()] });
        assert_eq!(record.category(), InputCategory::FileDrop);
    }

    #[test]
    fn test_modifiers_retain_unknown_bits() {
        let raw = 0x0001 | 0x0100;
        let modifiers = Modifiers::from_bits_retain(raw);

        assert!(modifiers.contains(Modifiers::SHIFT));
        assert_eq!(modifiers.bits(), raw);
    }

    #[test]
    fn test_character_codepoint() {
        assert_eq!(CharacterEvent { codepoint: 0x00e9 }.as_char(), Some('é'));
        assert_eq!(CharacterEvent { codepoint: 0xD800 }.as_char(), None);
    }

    #[test]
    fn test_all_categories_are_distinct() {
        let mut categories = InputCategory::ALL.to_vec();
        categories.sort();
        categories.dedup();
        assert_eq!(categories.len(), InputCategory::ALL.len());
    }
}
