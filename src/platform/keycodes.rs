//! Key token -> native key identifier resolution.
//!
//! A key token is either a single printable ASCII character or one of the
//! special names in `SPECIAL_NAMES`. Each backend has its own table for the
//! special keys; supporting a new key means adding rows, not branches.
//!
//! - Generic injection: `enigo::Key` (`Key::Control`, `Key::Unicode('a')`, ...).
//! - Native Windows: virtual-key codes, see `platform::windows::keycodes`.

use enigo::Key;

use super::windows::keycodes as vk;
use super::{BackendKind, PlatformError};

// ---------------------------------------------------------------------------
// Special keys
// ---------------------------------------------------------------------------

/// Named keys that are not a literal character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialKey {
    // Modifiers
    Cmd,
    Ctrl,
    Shift,
    Alt,

    // Editing
    Enter,
    Backspace,
    Space,
    Tab,
    Escape,
    Delete,

    // Navigation
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

/// Accepted special-key names (matched ASCII case-insensitively).
pub const SPECIAL_NAMES: &[(&str, SpecialKey)] = &[
    ("cmd", SpecialKey::Cmd),
    ("ctrl", SpecialKey::Ctrl),
    ("shift", SpecialKey::Shift),
    ("alt", SpecialKey::Alt),
    ("option", SpecialKey::Alt),
    ("enter", SpecialKey::Enter),
    ("backspace", SpecialKey::Backspace),
    ("space", SpecialKey::Space),
    ("tab", SpecialKey::Tab),
    ("escape", SpecialKey::Escape),
    ("esc", SpecialKey::Escape),
    ("delete", SpecialKey::Delete),
    ("up", SpecialKey::Up),
    ("down", SpecialKey::Down),
    ("left", SpecialKey::Left),
    ("right", SpecialKey::Right),
    ("home", SpecialKey::Home),
    ("end", SpecialKey::End),
    ("pageup", SpecialKey::PageUp),
    ("pagedown", SpecialKey::PageDown),
];

// ---------------------------------------------------------------------------
// Token parsing
// ---------------------------------------------------------------------------

/// A key token after validation, independent of any backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyToken {
    Special(SpecialKey),
    Char(char),
}

/// Validates a key token.
///
/// Special names win over characters, so `"a"` is a character and `"up"` is
/// the arrow key. A lone space is the `space` key.
pub fn parse_token(token: &str) -> Result<KeyToken, PlatformError> {
    if let Some((_, key)) = SPECIAL_NAMES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(token))
    {
        return Ok(KeyToken::Special(*key));
    }

    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(' '), None) => Ok(KeyToken::Special(SpecialKey::Space)),
        (Some(c), None) if c.is_ascii_graphic() => Ok(KeyToken::Char(c)),
        _ => Err(PlatformError::unknown_key(token)),
    }
}

// ---------------------------------------------------------------------------
// Native key codes
// ---------------------------------------------------------------------------

/// A key identifier in one backend's namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeKeyCode {
    /// Generic injection backend key.
    Injection(Key),
    /// Windows virtual-key code plus extra `KEYBDINPUT.dwFlags` bits
    /// (`KEYEVENTF_EXTENDEDKEY` for navigation keys).
    VirtualKey { vk: u16, flags: u32 },
    /// Windows UTF-16 unit sent with `KEYEVENTF_UNICODE`.
    Unicode(u16),
}

/// Resolves `token` for `backend`.
///
/// Fails with `PlatformError::UnknownKey` for anything that is neither a
/// special name nor a single printable ASCII character.
pub fn resolve(token: &str, backend: BackendKind) -> Result<NativeKeyCode, PlatformError> {
    let parsed = parse_token(token).map_err(|e| {
        log::debug!("resolver: '{token}' is not a known key for {backend}");
        e
    })?;
    Ok(match backend {
        BackendKind::GenericInjection => NativeKeyCode::Injection(injection_key(parsed)),
        BackendKind::NativeWindows => vk::token_to_native(parsed),
    })
}

/// Generic injection table.
pub fn injection_key(token: KeyToken) -> Key {
    match token {
        KeyToken::Char(c) => Key::Unicode(c),
        KeyToken::Special(special) => match special {
            SpecialKey::Cmd => Key::Meta,
            SpecialKey::Ctrl => Key::Control,
            SpecialKey::Shift => Key::Shift,
            SpecialKey::Alt => Key::Alt,
            SpecialKey::Enter => Key::Return,
            SpecialKey::Backspace => Key::Backspace,
            SpecialKey::Space => Key::Space,
            SpecialKey::Tab => Key::Tab,
            SpecialKey::Escape => Key::Escape,
            SpecialKey::Delete => Key::Delete,
            SpecialKey::Up => Key::UpArrow,
            SpecialKey::Down => Key::DownArrow,
            SpecialKey::Left => Key::LeftArrow,
            SpecialKey::Right => Key::RightArrow,
            SpecialKey::Home => Key::Home,
            SpecialKey::End => Key::End,
            SpecialKey::PageUp => Key::PageUp,
            SpecialKey::PageDown => Key::PageDown,
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
