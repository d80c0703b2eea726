//! Windows input backend via SendInput.
//!
//! `WindowsExecutor` implements `InputBackend`. Injection is synchronous:
//! `SendInput` returns after the events are queued. No background thread is
//! needed. A press is queued as one down+up batch so nothing can interleave
//! between the two halves.

use std::time::Instant;

use windows_sys::Win32::UI::Input::KeyboardAndMouse::{
    SendInput, INPUT, INPUT_0, INPUT_KEYBOARD, INPUT_MOUSE, KEYBDINPUT, KEYEVENTF_KEYUP,
    KEYEVENTF_UNICODE, MOUSEEVENTF_LEFTDOWN, MOUSEEVENTF_LEFTUP, MOUSEEVENTF_MIDDLEDOWN,
    MOUSEEVENTF_MIDDLEUP, MOUSEEVENTF_MOVE, MOUSEEVENTF_RIGHTDOWN, MOUSEEVENTF_RIGHTUP,
    MOUSEINPUT,
};

use crate::platform::{BackendKind, InputBackend, MouseButton, NativeKeyCode, PlatformError};

// ---------------------------------------------------------------------------
// Public struct
// ---------------------------------------------------------------------------

/// Injects keyboard and mouse events via SendInput on Windows.
///
/// Stateless: each call builds `INPUT` records and sends them immediately.
pub struct WindowsExecutor;

impl WindowsExecutor {
    pub fn new() -> Self {
        log::info!("platform: using native Windows backend (SendInput)");
        WindowsExecutor
    }
}

// ---------------------------------------------------------------------------
// INPUT builders
// ---------------------------------------------------------------------------

fn keyboard_input(key: NativeKeyCode, key_up: bool) -> Result<INPUT, PlatformError> {
    let (vk, scan, mut flags) = match key {
        NativeKeyCode::VirtualKey { vk, flags } => (vk, 0, flags),
        NativeKeyCode::Unicode(unit) => (0, unit, KEYEVENTF_UNICODE),
        NativeKeyCode::Injection(other) => {
            return Err(PlatformError::Injection(format!(
                "{other:?} is not a Windows key code"
            )))
        }
    };
    if key_up {
        flags |= KEYEVENTF_KEYUP;
    }
    Ok(INPUT {
        r#type: INPUT_KEYBOARD,
        Anonymous: INPUT_0 {
            ki: KEYBDINPUT {
                wVk: vk,
                wScan: scan,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    })
}

fn mouse_input(dx: i32, dy: i32, flags: u32) -> INPUT {
    INPUT {
        r#type: INPUT_MOUSE,
        Anonymous: INPUT_0 {
            mi: MOUSEINPUT {
                dx,
                dy,
                mouseData: 0,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    }
}

/// Sends `inputs` as one batch; fails unless every event was queued.
fn send(inputs: &[INPUT]) -> Result<(), PlatformError> {
    let sent = unsafe {
        SendInput(
            inputs.len() as u32,
            inputs.as_ptr(),
            std::mem::size_of::<INPUT>() as i32,
        )
    };
    if sent as usize != inputs.len() {
        return Err(PlatformError::Injection(format!(
            "SendInput queued {sent} of {} events",
            inputs.len()
        )));
    }
    Ok(())
}

fn send_key(key: NativeKeyCode, inputs: &[INPUT], label: &str) -> Result<(), PlatformError> {
    let started = Instant::now();
    send(inputs)?;
    log::debug!(
        "executor: injected {:?} {} in {:.2}ms",
        key,
        label,
        started.elapsed().as_secs_f64() * 1000.0
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// InputBackend trait impl
// ---------------------------------------------------------------------------

impl InputBackend for WindowsExecutor {
    fn kind(&self) -> BackendKind {
        BackendKind::NativeWindows
    }

    fn key_down(&mut self, key: NativeKeyCode) -> Result<(), PlatformError> {
        send_key(key, &[keyboard_input(key, false)?], "down")
    }

    fn key_up(&mut self, key: NativeKeyCode) -> Result<(), PlatformError> {
        send_key(key, &[keyboard_input(key, true)?], "up")
    }

    fn press_key(&mut self, key: NativeKeyCode) -> Result<(), PlatformError> {
        let batch = [keyboard_input(key, false)?, keyboard_input(key, true)?];
        send_key(key, &batch, "press")
    }

    fn move_relative(&mut self, dx: i32, dy: i32) -> Result<(), PlatformError> {
        send(&[mouse_input(dx, dy, MOUSEEVENTF_MOVE)])
    }

    fn click(&mut self, button: MouseButton) -> Result<(), PlatformError> {
        let (down, up) = match button {
            MouseButton::Left => (MOUSEEVENTF_LEFTDOWN, MOUSEEVENTF_LEFTUP),
            MouseButton::Middle => (MOUSEEVENTF_MIDDLEDOWN, MOUSEEVENTF_MIDDLEUP),
            MouseButton::Right => (MOUSEEVENTF_RIGHTDOWN, MOUSEEVENTF_RIGHTUP),
        };
        send(&[mouse_input(0, 0, down), mouse_input(0, 0, up)])
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
