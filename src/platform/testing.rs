//! Recording backend for headless tests.

use super::{BackendKind, InputBackend, MouseButton, NativeKeyCode, PlatformError};

/// One call observed by `RecordingBackend`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Down(NativeKeyCode),
    Up(NativeKeyCode),
    Press(NativeKeyCode),
    Move(i32, i32),
    Click(MouseButton),
}

/// Records every call; optionally rejects the call with a given index
/// (0-based across all calls) or every call.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub calls: Vec<Call>,
    pub fail_at: Option<usize>,
    pub fail_all: bool,
    attempts: usize,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_at(index: usize) -> Self {
        Self {
            fail_at: Some(index),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    fn record(&mut self, call: Call) -> Result<(), PlatformError> {
        let index = self.attempts;
        self.attempts += 1;
        if self.fail_all || self.fail_at == Some(index) {
            return Err(PlatformError::Injection(format!("rejected {call:?}")));
        }
        self.calls.push(call);
        Ok(())
    }
}

impl InputBackend for RecordingBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::GenericInjection
    }

    fn key_down(&mut self, key: NativeKeyCode) -> Result<(), PlatformError> {
        self.record(Call::Down(key))
    }

    fn key_up(&mut self, key: NativeKeyCode) -> Result<(), PlatformError> {
        self.record(Call::Up(key))
    }

    fn press_key(&mut self, key: NativeKeyCode) -> Result<(), PlatformError> {
        self.record(Call::Press(key))
    }

    fn move_relative(&mut self, dx: i32, dy: i32) -> Result<(), PlatformError> {
        self.record(Call::Move(dx, dy))
    }

    fn click(&mut self, button: MouseButton) -> Result<(), PlatformError> {
        self.record(Call::Click(button))
    }
}

/// Shorthand for a generic-injection key code in assertions.
pub fn key(token: &str) -> NativeKeyCode {
    super::keycodes::resolve(token, BackendKind::GenericInjection)
        .unwrap_or_else(|e| panic!("test key '{token}': {e}"))
}
