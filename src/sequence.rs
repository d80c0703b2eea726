//! Key sequence data model and its wire form.
//!
//! On the wire (JSON bodies, TOML button definitions) a step is a two-element
//! array `[key, action]`, e.g. `[["ctrl","down"],["a","press"],["ctrl","up"]]`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Key action
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyAction {
    /// Press and hold.
    Down,
    /// Press and release.
    Press,
    /// Release.
    Up,
}

impl KeyAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyAction::Down => "down",
            KeyAction::Press => "press",
            KeyAction::Up => "up",
        }
    }
}

impl fmt::Display for KeyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyAction {
    type Err = StepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "down" => Ok(KeyAction::Down),
            "press" => Ok(KeyAction::Press),
            "up" => Ok(KeyAction::Up),
            other => Err(StepError::InvalidAction(other.to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// Key step
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    #[error("key token must not be empty")]
    EmptyKey,

    #[error("invalid key action '{0}' (expected down, press or up)")]
    InvalidAction(String),
}

/// One `(key, action)` pair.
///
/// The key must be non-empty. Whether it names a real key is only checked
/// when the step is resolved against a backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(String, KeyAction)", into = "(String, KeyAction)")]
pub struct KeyStep {
    key: String,
    action: KeyAction,
}

/// Ordered list of steps; order is playback order.
pub type KeySequence = Vec<KeyStep>;

impl KeyStep {
    pub fn new(key: impl Into<String>, action: KeyAction) -> Result<Self, StepError> {
        let key = key.into();
        if key.is_empty() {
            return Err(StepError::EmptyKey);
        }
        Ok(Self { key, action })
    }

    pub fn down(key: impl Into<String>) -> Result<Self, StepError> {
        Self::new(key, KeyAction::Down)
    }

    pub fn press(key: impl Into<String>) -> Result<Self, StepError> {
        Self::new(key, KeyAction::Press)
    }

    pub fn up(key: impl Into<String>) -> Result<Self, StepError> {
        Self::new(key, KeyAction::Up)
    }

    /// Builds a step from a literal known to be non-empty.
    pub(crate) fn from_static(key: &'static str, action: KeyAction) -> Self {
        debug_assert!(!key.is_empty());
        Self {
            key: key.to_owned(),
            action,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn action(&self) -> KeyAction {
        self.action
    }
}

impl fmt::Display for KeyStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.key, self.action)
    }
}

impl TryFrom<(String, KeyAction)> for KeyStep {
    type Error = StepError;

    fn try_from((key, action): (String, KeyAction)) -> Result<Self, Self::Error> {
        Self::new(key, action)
    }
}

impl From<KeyStep> for (String, KeyAction) {
    fn from(step: KeyStep) -> Self {
        (step.key, step.action)
    }
}

// ---------------------------------------------------------------------------
// Wire helpers
// ---------------------------------------------------------------------------

/// Parses a JSON key sequence, e.g. `[["ctrl","down"],["v","press"],["ctrl","up"]]`.
pub fn parse_wire(json: &str) -> Result<KeySequence, serde_json::Error> {
    serde_json::from_str(json)
}

/// Renders a key sequence in its JSON wire form.
pub fn to_wire(sequence: &[KeyStep]) -> Result<String, serde_json::Error> {
    serde_json::to_string(sequence)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
