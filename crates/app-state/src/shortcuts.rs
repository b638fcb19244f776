//! Keyboard shortcut resolution.
//!
//! Keys are named the way browsers and most windowing layers report them
//! (`"z"`, `"Delete"`, `" "`), so a host can forward its key events as-is.

use crate::commands::EditorCommand;

/// Keys the editor binds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Space,
    Delete,
    Backspace,
    Escape,
    Other,
}

impl Key {
    /// Parse a key name. Single characters are lowercased so Shift+Z and z
    /// resolve to the same key.
    pub fn from_name(name: &str) -> Self {
        match name {
            " " | "Space" | "Spacebar" => Key::Space,
            "Delete" | "Del" => Key::Delete,
            "Backspace" => Key::Backspace,
            "Escape" | "Esc" => Key::Escape,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c.to_ascii_lowercase()),
                    _ => Key::Other,
                }
            }
        }
    }
}

/// A key press with its modifier state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyChord {
    pub key: Option<Key>,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    /// Cmd on macOS.
    pub meta: bool,
}

impl KeyChord {
    pub fn new(key: Key) -> Self {
        Self {
            key: Some(key),
            ..Self::default()
        }
    }

    pub fn named(name: &str) -> Self {
        Self::new(Key::from_name(name))
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }

    /// Ctrl on Windows/Linux or Cmd on macOS.
    pub fn command_modifier(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Editor state the resolver needs.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ShortcutContext {
    pub has_selection: bool,
    /// Focus is in a text field; shortcuts must not steal its keys.
    pub text_input_focused: bool,
}

/// Map a key chord to an editor command.
pub fn resolve_shortcut(chord: &KeyChord, ctx: ShortcutContext) -> Option<EditorCommand> {
    if ctx.text_input_focused {
        return None;
    }
    let key = chord.key?;

    if chord.command_modifier() && !chord.alt {
        return match key {
            Key::Char('z') if chord.shift => Some(EditorCommand::Redo),
            Key::Char('z') => Some(EditorCommand::Undo),
            Key::Char('y') => Some(EditorCommand::Redo),
            Key::Char('d') if ctx.has_selection => Some(EditorCommand::DuplicateSelected),
            _ => None,
        };
    }

    if chord.ctrl || chord.meta || chord.alt {
        return None;
    }

    match key {
        Key::Delete | Key::Backspace if ctx.has_selection => Some(EditorCommand::RemoveSelected),
        Key::Space => Some(EditorCommand::TogglePlayPause),
        Key::Escape => Some(EditorCommand::Stop),
        _ => None,
    }
}
