//! Generic input backend via enigo.
//!
//! `InjectionBackend` implements `InputBackend` on every OS. Events are sent
//! synchronously through the enigo connection opened in `new()`:
//! CGEventPost on macOS, SendInput on Windows, XTest (x11rb) on Linux.
//!
//! macOS requires Accessibility permission for the hosting process. Without
//! it events are silently discarded by the OS; guide the user to
//!   System Settings > Privacy & Security > Accessibility

use std::time::Instant;

use enigo::{Button, Coordinate, Direction, Enigo, Key, Keyboard, Mouse, Settings};

use crate::platform::{BackendKind, InputBackend, MouseButton, NativeKeyCode, PlatformError};

/// Injects keyboard and mouse events through a long-lived enigo connection.
pub struct InjectionBackend {
    enigo: Enigo,
}

impl InjectionBackend {
    /// Opens the enigo connection.
    ///
    /// On Linux the display session is checked first; without an X display
    /// (native or XWayland) the backend is unavailable.
    pub fn new() -> Result<Self, PlatformError> {
        #[cfg(target_os = "linux")]
        check_display_session()?;

        let enigo = Enigo::new(&Settings::default())
            .map_err(|e| PlatformError::Unavailable(format!("enigo connection: {e:?}")))?;

        #[cfg(target_os = "macos")]
        log::info!(
            "platform: if injected keys do not reach other apps, grant Accessibility \
             permission in System Settings > Privacy & Security > Accessibility"
        );
        log::info!("platform: using generic injection backend");

        Ok(Self { enigo })
    }

    fn key(&mut self, key: NativeKeyCode, direction: Direction) -> Result<(), PlatformError> {
        let key = injection_key(key)?;
        let started = Instant::now();
        self.enigo
            .key(key, direction)
            .map_err(|e| PlatformError::Injection(format!("{key:?} {direction:?}: {e:?}")))?;
        log::debug!(
            "executor: injected {:?} {:?} in {:.2}ms",
            key,
            direction,
            started.elapsed().as_secs_f64() * 1000.0
        );
        Ok(())
    }
}

#[cfg(target_os = "linux")]
fn check_display_session() -> Result<(), PlatformError> {
    let session = super::session::Session::current();
    match session.unavailable_reason() {
        Some(reason) => Err(PlatformError::Unavailable(reason.into())),
        None => {
            log::debug!("platform: {session} session");
            Ok(())
        }
    }
}

/// Only keys resolved for this backend can be injected through it.
fn injection_key(key: NativeKeyCode) -> Result<Key, PlatformError> {
    match key {
        NativeKeyCode::Injection(key) => Ok(key),
        other => Err(PlatformError::Injection(format!(
            "{other:?} is not an injection key"
        ))),
    }
}

fn enigo_button(button: MouseButton) -> Button {
    match button {
        MouseButton::Left => Button::Left,
        MouseButton::Middle => Button::Middle,
        MouseButton::Right => Button::Right,
    }
}

// ---------------------------------------------------------------------------
// InputBackend trait impl
// ---------------------------------------------------------------------------

impl InputBackend for InjectionBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::GenericInjection
    }

    fn key_down(&mut self, key: NativeKeyCode) -> Result<(), PlatformError> {
        self.key(key, Direction::Press)
    }

    fn key_up(&mut self, key: NativeKeyCode) -> Result<(), PlatformError> {
        self.key(key, Direction::Release)
    }

    fn press_key(&mut self, key: NativeKeyCode) -> Result<(), PlatformError> {
        self.key(key, Direction::Click)
    }

    fn move_relative(&mut self, dx: i32, dy: i32) -> Result<(), PlatformError> {
        self.enigo
            .move_mouse(dx, dy, Coordinate::Rel)
            .map_err(|e| PlatformError::Injection(format!("mouse move: {e:?}")))
    }

    fn click(&mut self, button: MouseButton) -> Result<(), PlatformError> {
        self.enigo
            .button(enigo_button(button), Direction::Click)
            .map_err(|e| PlatformError::Injection(format!("{button} click: {e:?}")))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_codes_are_not_injection_keys() {
        assert!(matches!(
            injection_key(NativeKeyCode::VirtualKey { vk: 0x11, flags: 0 }),
            Err(PlatformError::Injection(_))
        ));
        assert!(matches!(
            injection_key(NativeKeyCode::Unicode(0x3F)),
            Err(PlatformError::Injection(_))
        ));
    }

    #[test]
    fn injection_keys_pass_through() {
        assert_eq!(
            injection_key(NativeKeyCode::Injection(Key::Shift)),
            Ok(Key::Shift)
        );
    }

    #[test]
    fn mouse_buttons_map_one_to_one() {
        assert_eq!(enigo_button(MouseButton::Left), Button::Left);
        assert_eq!(enigo_button(MouseButton::Middle), Button::Middle);
        assert_eq!(enigo_button(MouseButton::Right), Button::Right);
    }
}
