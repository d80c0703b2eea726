//! Key token -> Windows virtual key code mapping.
//!
//! VK codes are from the Windows SDK (winuser.h). Modifiers use the generic
//! (side-agnostic) codes, which `SendInput` accepts for injection.
//!
//! Letters and digits map to their VK codes (equal to the ASCII uppercase
//! letter / digit), so chords like ctrl+v reach shortcut handlers. A VK code
//! carries no case: `"A"` and `"a"` are the same key and type `a` unless
//! `shift` is held, whereas the generic backend types `A`.
//!
//! Any other printable character is sent as a UTF-16 unit with
//! `KEYEVENTF_UNICODE`. Such events arrive as `VK_PACKET` text input, so
//! chords like ctrl+`-` or ctrl+`/` do not trigger shortcut handlers on this
//! backend.
//!
//! This table is plain data and is compiled on every target so the resolver
//! behaves identically in tests on any host.

use crate::platform::keycodes::{KeyToken, SpecialKey};
use crate::platform::NativeKeyCode;

/// `KEYEVENTF_EXTENDEDKEY` -- set in `KEYBDINPUT.dwFlags` for extended keys.
pub const EXTENDED: u32 = 0x0001;

/// Converts a validated token to the native Windows key identifier.
pub fn token_to_native(token: KeyToken) -> NativeKeyCode {
    match token {
        KeyToken::Special(special) => {
            let (vk, flags) = special_to_vkcode(special);
            NativeKeyCode::VirtualKey { vk, flags }
        }
        KeyToken::Char(c) if c.is_ascii_alphanumeric() => NativeKeyCode::VirtualKey {
            vk: c.to_ascii_uppercase() as u16,
            flags: 0,
        },
        // Printable ASCII always fits in one UTF-16 unit.
        KeyToken::Char(c) => NativeKeyCode::Unicode(c as u16),
    }
}

/// Converts a special key to a Windows virtual key code and extra
/// `dwFlags` bits for `KEYBDINPUT`.
pub fn special_to_vkcode(key: SpecialKey) -> (u16, u32) {
    match key {
        // Modifiers
        SpecialKey::Ctrl => (0x11, 0),  // VK_CONTROL
        SpecialKey::Shift => (0x10, 0), // VK_SHIFT
        SpecialKey::Alt => (0x12, 0),   // VK_MENU
        SpecialKey::Cmd => (0x5B, 0),   // VK_LWIN

        // Editing
        SpecialKey::Enter => (0x0D, 0),
        SpecialKey::Backspace => (0x08, 0),
        SpecialKey::Space => (0x20, 0),
        SpecialKey::Tab => (0x09, 0),
        SpecialKey::Escape => (0x1B, 0),

        // Navigation keys need EXTENDED to distinguish them from numpad keys.
        SpecialKey::Delete => (0x2E, EXTENDED),
        SpecialKey::Home => (0x24, EXTENDED),
        SpecialKey::End => (0x23, EXTENDED),
        SpecialKey::PageUp => (0x21, EXTENDED),
        SpecialKey::PageDown => (0x22, EXTENDED),
        SpecialKey::Up => (0x26, EXTENDED),
        SpecialKey::Down => (0x28, EXTENDED),
        SpecialKey::Left => (0x25, EXTENDED),
        SpecialKey::Right => (0x27, EXTENDED),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
