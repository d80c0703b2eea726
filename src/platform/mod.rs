//! Platform abstraction layer.
//!
//! Defines the `InputBackend` capability set shared by the generic injection
//! backend (enigo) and the native Windows backend (SendInput). A backend is
//! selected once at startup from the cached `PlatformProfile`; call sites
//! never branch on the host OS themselves.

pub mod injection;
pub mod keycodes;
pub mod profile;
#[cfg(target_os = "linux")]
mod session;
pub mod windows;

#[cfg(test)]
pub(crate) mod testing;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::BackendChoice;
pub use keycodes::NativeKeyCode;
pub use profile::{DelayTable, Os, PlatformProfile};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure raised inside a backend or while resolving a key token.
///
/// Never crosses the public façade: `HostActions` logs it and reports a
/// boolean outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
    /// The token is neither a known special-key name nor a single printable
    /// ASCII character.
    #[error("unknown key token '{token}'")]
    UnknownKey { token: String },

    /// The host rejected an injected event.
    #[error("injection failed: {0}")]
    Injection(String),

    /// The backend library or host API is not usable in this session.
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

impl PlatformError {
    pub fn unknown_key(token: impl Into<String>) -> Self {
        Self::UnknownKey {
            token: token.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Backend kinds
// ---------------------------------------------------------------------------

/// The concrete host input-injection mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Cross-platform injection library (enigo).
    GenericInjection,
    /// Win32 `SendInput` with virtual-key codes.
    NativeWindows,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::GenericInjection => f.write_str("injection"),
            BackendKind::NativeWindows => f.write_str("native-windows"),
        }
    }
}

/// Maps the configured backend preference onto a backend kind for `os`.
///
/// `NativeWindows` is only ever chosen on a Windows host; requesting it
/// elsewhere degrades to the generic backend.
pub fn select_backend(os: Os, choice: BackendChoice) -> BackendKind {
    match (choice, os) {
        (BackendChoice::Injection, _) => BackendKind::GenericInjection,
        (BackendChoice::Auto | BackendChoice::NativeWindows, Os::Windows) => {
            BackendKind::NativeWindows
        }
        (BackendChoice::NativeWindows, other) => {
            log::warn!(
                "platform: native-windows backend requested on {other}, using injection backend"
            );
            BackendKind::GenericInjection
        }
        (BackendChoice::Auto, _) => BackendKind::GenericInjection,
    }
}

// ---------------------------------------------------------------------------
// Mouse buttons
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MouseButton::Left => "left",
            MouseButton::Middle => "middle",
            MouseButton::Right => "right",
        })
    }
}

impl FromStr for MouseButton {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(MouseButton::Left),
            "middle" => Ok(MouseButton::Middle),
            "right" => Ok(MouseButton::Right),
            other => Err(format!("invalid mouse button '{other}'")),
        }
    }
}

// ---------------------------------------------------------------------------
// Backend trait
// ---------------------------------------------------------------------------

/// Host input capability set.
///
/// All calls are synchronous: they return once the host has accepted (or
/// rejected) the event. A call that blocks in the host API blocks the caller;
/// no timeout is imposed.
pub trait InputBackend {
    fn kind(&self) -> BackendKind;

    /// Resolves a key token into this backend's native key identifier.
    fn resolve_key(&self, token: &str) -> Result<NativeKeyCode, PlatformError> {
        keycodes::resolve(token, self.kind())
    }

    /// Presses and holds `key`.
    fn key_down(&mut self, key: NativeKeyCode) -> Result<(), PlatformError>;

    /// Releases `key`.
    fn key_up(&mut self, key: NativeKeyCode) -> Result<(), PlatformError>;

    /// Full press-and-release of `key`.
    fn press_key(&mut self, key: NativeKeyCode) -> Result<(), PlatformError>;

    fn move_relative(&mut self, dx: i32, dy: i32) -> Result<(), PlatformError>;

    fn click(&mut self, button: MouseButton) -> Result<(), PlatformError>;
}

// ---------------------------------------------------------------------------
// Factory
// ---------------------------------------------------------------------------

/// Builds the backend for `kind`.
///
/// Returns `PlatformError::Unavailable` when the host cannot support it
/// (no display session, native Windows backend on a non-Windows build).
pub fn create_backend(kind: BackendKind) -> Result<Box<dyn InputBackend>, PlatformError> {
    match kind {
        BackendKind::GenericInjection => {
            injection::InjectionBackend::new().map(|b| Box::new(b) as Box<dyn InputBackend>)
        }
        BackendKind::NativeWindows => windows::create_backend(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
