//! Key sequence executor.
//!
//! Plays a `KeySequence` strictly in order against an `InputBackend`. Each
//! step is resolved, dispatched, then followed by the profile's settle delay
//! for that action kind.
//!
//! Keys put down by the sequence are tracked in a held set that lives only
//! for one `run()` call. If a step fails (unknown key or rejected injection),
//! the remaining steps are skipped and every held key is released in reverse
//! order of insertion so the host keyboard is not left with a latched
//! modifier. Release during cleanup is best-effort: failures are logged and
//! never replace the original failure.
//!
//! A sequence that completes with keys still down (a `down` without its
//! `up`) is a success; those keys stay down on the host and are reported in
//! `ExecutionReport::left_held`.

use std::thread;
use std::time::Instant;

use crate::platform::{InputBackend, NativeKeyCode, PlatformError, PlatformProfile};
use crate::sequence::{KeyAction, KeyStep};

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Outcome of one sequence run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExecutionReport {
    /// True iff every step dispatched without error. Vacuously true for an
    /// empty sequence.
    pub success: bool,
    /// 0-based index of the step that aborted the run.
    pub failed_step: Option<usize>,
    /// Tokens still down when the run returned: unmatched `down`s after a
    /// success, or keys whose cleanup release failed after a failure.
    pub left_held: Vec<String>,
}

// ---------------------------------------------------------------------------
// Held set
// ---------------------------------------------------------------------------

/// Keys currently down within one run, in insertion order.
#[derive(Debug, Default)]
struct HeldKeys {
    keys: Vec<(String, NativeKeyCode)>,
}

impl HeldKeys {
    /// Records `code` as held. Holding an already-held key keeps the
    /// original entry.
    fn insert(&mut self, token: &str, code: NativeKeyCode) {
        if !self.keys.iter().any(|(_, held)| *held == code) {
            self.keys.push((token.to_owned(), code));
        }
    }

    fn remove(&mut self, code: NativeKeyCode) -> bool {
        let before = self.keys.len();
        self.keys.retain(|(_, held)| *held != code);
        self.keys.len() != before
    }

    fn tokens(&self) -> Vec<String> {
        self.keys.iter().map(|(token, _)| token.clone()).collect()
    }

    /// Synthesizes `up` for every held key, newest first. Returns the tokens
    /// whose release was rejected.
    fn release_all(&mut self, backend: &mut dyn InputBackend) -> Vec<String> {
        let mut stuck = Vec::new();
        while let Some((token, code)) = self.keys.pop() {
            match backend.key_up(code) {
                Ok(()) => log::debug!("executor: cleanup released '{token}'"),
                Err(e) => {
                    log::warn!("executor: cleanup could not release '{token}': {e}");
                    stuck.push(token);
                }
            }
        }
        stuck
    }
}

// ---------------------------------------------------------------------------
// Executor
// ---------------------------------------------------------------------------

/// Runs key sequences with the timing of one platform profile.
///
/// Holds no per-sequence state; one executor can run any number of
/// sequences.
#[derive(Debug, Clone, Copy)]
pub struct SequenceExecutor<'a> {
    profile: &'a PlatformProfile,
}

impl<'a> SequenceExecutor<'a> {
    pub fn new(profile: &'a PlatformProfile) -> Self {
        Self { profile }
    }

    /// Plays `sequence` and returns `true` iff every step succeeded.
    pub fn execute(&self, backend: &mut dyn InputBackend, sequence: &[KeyStep]) -> bool {
        self.run(backend, sequence).success
    }

    /// Plays `sequence` and returns the detailed outcome.
    pub fn run(&self, backend: &mut dyn InputBackend, sequence: &[KeyStep]) -> ExecutionReport {
        let started = Instant::now();
        let mut held = HeldKeys::default();

        for (index, step) in sequence.iter().enumerate() {
            log::debug!("executor: step {}: {step}", index + 1);

            if let Err(e) = dispatch(backend, step, &mut held) {
                log::error!("executor: failed at step {} ({step}): {e}", index + 1);
                let stuck = held.release_all(backend);
                return ExecutionReport {
                    success: false,
                    failed_step: Some(index),
                    left_held: stuck,
                };
            }

            thread::sleep(self.profile.delay_for(step.action()));
        }

        let left_held = held.tokens();
        if !left_held.is_empty() {
            log::warn!(
                "executor: sequence finished with keys still down: {}",
                left_held.join(", ")
            );
        }
        log::info!(
            "executor: {} step(s) completed in {:.1}ms",
            sequence.len(),
            started.elapsed().as_secs_f64() * 1000.0
        );

        ExecutionReport {
            success: true,
            failed_step: None,
            left_held,
        }
    }
}

/// Resolves and dispatches one step, keeping `held` in sync.
fn dispatch(
    backend: &mut dyn InputBackend,
    step: &KeyStep,
    held: &mut HeldKeys,
) -> Result<(), PlatformError> {
    let code = backend.resolve_key(step.key())?;
    match step.action() {
        KeyAction::Down => {
            backend.key_down(code)?;
            held.insert(step.key(), code);
        }
        KeyAction::Up => {
            backend.key_up(code)?;
            if !held.remove(code) {
                log::debug!("executor: released '{}' which was not held", step.key());
            }
        }
        KeyAction::Press => backend.press_key(code)?,
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
