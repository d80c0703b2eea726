//! Windows platform backend: SendInput injection with virtual key codes.
//!
//! The key table in `keycodes` is compiled everywhere; the `SendInput`
//! backend itself only exists in Windows builds.

#[cfg(target_os = "windows")]
mod executor;
pub mod keycodes;

use crate::platform::{InputBackend, PlatformError};

/// Returns a `WindowsExecutor` backed by `SendInput`.
#[cfg(target_os = "windows")]
pub fn create_backend() -> Result<Box<dyn InputBackend>, PlatformError> {
    Ok(Box::new(executor::WindowsExecutor::new()))
}

/// The native Windows backend does not exist in this build.
#[cfg(not(target_os = "windows"))]
pub fn create_backend() -> Result<Box<dyn InputBackend>, PlatformError> {
    Err(PlatformError::Unavailable(
        "native Windows backend is only available on Windows".into(),
    ))
}
