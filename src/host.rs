//! Host action façade.
//!
//! The single synchronous entry point used by the request layer. Every
//! operation returns an `ExecutionResult`; internal errors are logged here
//! and never propagated. Requests run to completion before returning, with
//! no queueing or arbitration between concurrent callers.

use serde::Serialize;

use crate::buttons::{default_buttons, ButtonStore, StaticButtons};
use crate::clipboard::{Clipboard, SystemClipboard};
use crate::config::Config;
use crate::executor::{ExecutionReport, SequenceExecutor};
use crate::mouse;
use crate::platform::{self, InputBackend, MouseButton, PlatformError, PlatformProfile};
use crate::sequence::KeyStep;

/// Coarse outcome reported back to the web client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExecutionResult {
    pub success: bool,
}

impl From<bool> for ExecutionResult {
    fn from(success: bool) -> Self {
        Self { success }
    }
}

impl From<&ExecutionReport> for ExecutionResult {
    fn from(report: &ExecutionReport) -> Self {
        Self {
            success: report.success,
        }
    }
}

pub struct HostActions {
    profile: PlatformProfile,
    backend: Result<Box<dyn InputBackend>, PlatformError>,
    clipboard: Box<dyn Clipboard>,
    buttons: Box<dyn ButtonStore>,
}

impl HostActions {
    /// Assembles the façade from explicit collaborators.
    ///
    /// `backend` may be the error from a failed backend construction; every
    /// operation that needs it then reports failure.
    pub fn new(
        profile: PlatformProfile,
        backend: Result<Box<dyn InputBackend>, PlatformError>,
        clipboard: Box<dyn Clipboard>,
        buttons: Box<dyn ButtonStore>,
    ) -> Self {
        if let Err(e) = &backend {
            log::error!("host: input backend unavailable: {e}");
        }
        Self {
            profile,
            backend,
            clipboard,
            buttons,
        }
    }

    /// Builds the façade for the running host: detected profile with the
    /// configured delay overrides, the configured backend, the system
    /// clipboard, and the configured (or built-in) buttons.
    pub fn from_config(config: &Config) -> Self {
        let detected = PlatformProfile::detect();
        let profile = detected
            .clone()
            .with_delays(config.delays.apply(detected.delays()));

        let kind = platform::select_backend(profile.os(), config.backend);
        let backend = platform::create_backend(kind);

        let buttons = if config.buttons.is_empty() {
            default_buttons(&profile)
        } else {
            config.buttons.clone()
        };

        Self::new(
            profile,
            backend,
            Box::new(SystemClipboard::new()),
            Box::new(StaticButtons::new(buttons)),
        )
    }

    pub fn profile(&self) -> &PlatformProfile {
        &self.profile
    }

    pub fn buttons(&self) -> &dyn ButtonStore {
        self.buttons.as_ref()
    }

    pub fn backend_error(&self) -> Option<&PlatformError> {
        self.backend.as_ref().err()
    }

    /// Plays a caller-supplied key sequence.
    pub fn execute_sequence(&mut self, sequence: &[KeyStep]) -> ExecutionResult {
        (&self.execute_sequence_report(sequence)).into()
    }

    /// Like `execute_sequence`, with the executor's detailed report.
    pub fn execute_sequence_report(&mut self, sequence: &[KeyStep]) -> ExecutionReport {
        if sequence.is_empty() {
            return ExecutionReport {
                success: true,
                ..ExecutionReport::default()
            };
        }
        let backend = match self.backend.as_mut() {
            Ok(backend) => backend,
            Err(e) => {
                log::error!("host: keyboard simulation not available: {e}");
                return ExecutionReport {
                    success: false,
                    failed_step: Some(0),
                    left_held: Vec::new(),
                };
            }
        };
        SequenceExecutor::new(&self.profile).run(backend.as_mut(), sequence)
    }

    /// Plays the sequence bound to `button_id`.
    pub fn press_button(&mut self, button_id: &str) -> ExecutionResult {
        match self.buttons.key_sequence(button_id) {
            Some(sequence) => {
                log::info!("host: button '{button_id}' ({} steps)", sequence.len());
                self.execute_sequence(&sequence)
            }
            None => {
                log::error!("host: button '{button_id}' not found");
                false.into()
            }
        }
    }

    /// Copies `text` to the host clipboard, then plays the platform paste
    /// chord. Empty text succeeds without touching the host.
    pub fn execute_paste(&mut self, text: &str) -> ExecutionResult {
        if text.is_empty() {
            return true.into();
        }
        if let Err(e) = self.clipboard.set_text(text) {
            log::error!("host: paste aborted: {e}");
            return false.into();
        }
        let sequence = self.profile.paste_sequence();
        self.execute_sequence(&sequence)
    }

    pub fn move_mouse(&mut self, dx: i32, dy: i32) -> ExecutionResult {
        let success = match self.backend.as_mut() {
            Ok(backend) => mouse::move_relative(backend.as_mut(), dx, dy),
            Err(e) => mouse::unavailable("move", e),
        };
        success.into()
    }

    pub fn click_mouse(&mut self, button: MouseButton) -> ExecutionResult {
        let success = match self.backend.as_mut() {
            Ok(backend) => mouse::click(backend.as_mut(), button),
            Err(e) => mouse::unavailable("click", e),
        };
        success.into()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
