//! Mouse controller: relative motion and clicks.
//!
//! Each call is independent and returns a best-effort boolean; nothing is
//! raised past this boundary.

use crate::platform::{InputBackend, MouseButton, PlatformError};

/// Moves the pointer by `(dx, dy)` pixels.
///
/// `(0, 0)` is forwarded like any other offset, so its result still reflects
/// whether the backend accepts input.
pub fn move_relative(backend: &mut dyn InputBackend, dx: i32, dy: i32) -> bool {
    report("move", backend.move_relative(dx, dy))
}

/// Clicks `button` at the current pointer position.
pub fn click(backend: &mut dyn InputBackend, button: MouseButton) -> bool {
    report("click", backend.click(button))
}

/// Logs the outcome of a call that could not be attempted because no backend
/// is available.
pub fn unavailable(operation: &str, err: &PlatformError) -> bool {
    log::error!("mouse: {operation} skipped: {err}");
    false
}

fn report(operation: &str, result: Result<(), PlatformError>) -> bool {
    match result {
        Ok(()) => {
            log::debug!("mouse: {operation} ok");
            true
        }
        Err(e) => {
            log::error!("mouse: {operation} failed: {e}");
            false
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
