//! Host OS classification and the OS-specific constants derived from it.
//!
//! `PlatformProfile::detect()` classifies the host once per process and caches
//! the result. Callers hold the profile by reference (or a clone with
//! overridden delays) and pass it into the executor explicitly.

use std::fmt;
use std::sync::OnceLock;
use std::time::Duration;

use crate::sequence::{KeyAction, KeySequence, KeyStep};

// ---------------------------------------------------------------------------
// OS classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
    MacOs,
    Windows,
    Linux,
}

impl Os {
    /// Classifies the running host.
    pub fn current() -> Self {
        Self::from_target_os(std::env::consts::OS)
    }

    /// Classifies a `std::env::consts::OS` value.
    ///
    /// Anything that is not macOS or Windows is treated as Linux-like.
    pub fn from_target_os(name: &str) -> Self {
        match name {
            "macos" => Os::MacOs,
            "windows" => Os::Windows,
            "linux" => Os::Linux,
            other => {
                log::warn!("platform: unrecognised OS '{other}', using Linux defaults");
                Os::Linux
            }
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Os::MacOs => "macOS",
            Os::Windows => "Windows",
            Os::Linux => "Linux",
        })
    }
}

// ---------------------------------------------------------------------------
// Delay table
// ---------------------------------------------------------------------------

/// Settle time applied after each discrete key action, keyed by action kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayTable {
    pub down: Duration,
    pub up: Duration,
    pub press: Duration,
}

impl DelayTable {
    /// Uniform delay for every action kind.
    pub const fn uniform(delay: Duration) -> Self {
        Self {
            down: delay,
            up: delay,
            press: delay,
        }
    }

    /// Default tuning for `os`.
    ///
    /// macOS drops or reorders injected modifier events sent back to back, so
    /// down/up get a longer settle time than a full press.
    pub const fn for_os(os: Os) -> Self {
        match os {
            Os::MacOs => Self {
                down: Duration::from_millis(50),
                up: Duration::from_millis(50),
                press: Duration::from_millis(30),
            },
            Os::Windows | Os::Linux => Self::uniform(Duration::from_millis(10)),
        }
    }

    pub fn get(&self, action: KeyAction) -> Duration {
        match action {
            KeyAction::Down => self.down,
            KeyAction::Up => self.up,
            KeyAction::Press => self.press,
        }
    }
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

static DETECTED: OnceLock<PlatformProfile> = OnceLock::new();

/// Immutable OS-specific constants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformProfile {
    os: Os,
    delays: DelayTable,
}

impl PlatformProfile {
    /// Returns the profile for the running host, computing it on first call.
    ///
    /// Concurrent first callers may both classify the host; they agree on the
    /// value and only one is stored.
    pub fn detect() -> &'static PlatformProfile {
        DETECTED.get_or_init(|| {
            let profile = PlatformProfile::for_os(Os::current());
            log::info!(
                "platform: detected {} - paste chord uses {}",
                profile.os,
                profile.primary_modifier_key()
            );
            profile
        })
    }

    /// Builds the profile for a given OS with its default delay table.
    pub fn for_os(os: Os) -> Self {
        Self {
            os,
            delays: DelayTable::for_os(os),
        }
    }

    /// Replaces the delay table.
    pub fn with_delays(mut self, delays: DelayTable) -> Self {
        self.delays = delays;
        self
    }

    pub fn os(&self) -> Os {
        self.os
    }

    pub fn delays(&self) -> DelayTable {
        self.delays
    }

    /// `cmd` on macOS, `ctrl` everywhere else.
    pub fn primary_modifier_key(&self) -> &'static str {
        match self.os {
            Os::MacOs => "cmd",
            Os::Windows | Os::Linux => "ctrl",
        }
    }

    pub fn paste_sequence(&self) -> KeySequence {
        self.primary_chord("v")
    }

    pub fn copy_sequence(&self) -> KeySequence {
        self.primary_chord("c")
    }

    pub fn select_all_sequence(&self) -> KeySequence {
        self.primary_chord("a")
    }

    /// `[(modifier, down), (key, press), (modifier, up)]` for the primary
    /// modifier.
    pub fn primary_chord(&self, key: &'static str) -> KeySequence {
        let modifier = self.primary_modifier_key();
        vec![
            KeyStep::from_static(modifier, KeyAction::Down),
            KeyStep::from_static(key, KeyAction::Press),
            KeyStep::from_static(modifier, KeyAction::Up),
        ]
    }

    pub fn delay_for(&self, action: KeyAction) -> Duration {
        self.delays.get(action)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn steps(seq: &[KeyStep]) -> Vec<(&str, KeyAction)> {
        seq.iter().map(|s| (s.key(), s.action())).collect()
    }

    #[test]
    fn unknown_os_falls_back_to_linux() {
        assert_eq!(Os::from_target_os("freebsd"), Os::Linux);
        assert_eq!(Os::from_target_os(""), Os::Linux);
    }

    #[test]
    fn known_targets_classify() {
        assert_eq!(Os::from_target_os("macos"), Os::MacOs);
        assert_eq!(Os::from_target_os("windows"), Os::Windows);
        assert_eq!(Os::from_target_os("linux"), Os::Linux);
    }

    #[test]
    fn primary_modifier_is_cmd_only_on_macos() {
        assert_eq!(PlatformProfile::for_os(Os::MacOs).primary_modifier_key(), "cmd");
        assert_eq!(PlatformProfile::for_os(Os::Windows).primary_modifier_key(), "ctrl");
        assert_eq!(PlatformProfile::for_os(Os::Linux).primary_modifier_key(), "ctrl");
    }

    #[test]
    fn paste_sequence_uses_primary_modifier_on_every_os() {
        for os in [Os::MacOs, Os::Windows, Os::Linux] {
            let profile = PlatformProfile::for_os(os);
            let modifier = profile.primary_modifier_key();
            assert_eq!(
                steps(&profile.paste_sequence()),
                vec![
                    (modifier, KeyAction::Down),
                    ("v", KeyAction::Press),
                    (modifier, KeyAction::Up),
                ],
                "{os}"
            );
        }
    }

    #[test]
    fn copy_and_select_all_use_their_letters() {
        let profile = PlatformProfile::for_os(Os::MacOs);
        assert_eq!(profile.copy_sequence()[1].key(), "c");
        assert_eq!(profile.select_all_sequence()[1].key(), "a");
        assert_eq!(profile.copy_sequence()[0].key(), "cmd");
    }

    #[test]
    fn macos_delays_are_longer_for_modifiers() {
        let profile = PlatformProfile::for_os(Os::MacOs);
        assert_eq!(profile.delay_for(KeyAction::Down), Duration::from_millis(50));
        assert_eq!(profile.delay_for(KeyAction::Up), Duration::from_millis(50));
        assert_eq!(profile.delay_for(KeyAction::Press), Duration::from_millis(30));
    }

    #[test]
    fn linux_and_windows_use_uniform_delay() {
        for os in [Os::Linux, Os::Windows] {
            let profile = PlatformProfile::for_os(os);
            for action in [KeyAction::Down, KeyAction::Press, KeyAction::Up] {
                assert_eq!(profile.delay_for(action), Duration::from_millis(10));
            }
        }
    }

    #[test]
    fn with_delays_overrides_table() {
        let profile = PlatformProfile::for_os(Os::Linux)
            .with_delays(DelayTable::uniform(Duration::from_millis(2)));
        assert_eq!(profile.delay_for(KeyAction::Press), Duration::from_millis(2));
        assert_eq!(profile.os(), Os::Linux);
    }

    #[test]
    fn detect_is_idempotent() {
        let first = PlatformProfile::detect().clone();
        let second = PlatformProfile::detect().clone();
        assert_eq!(first, second);
        assert!(std::ptr::eq(
            PlatformProfile::detect(),
            PlatformProfile::detect()
        ));
    }
}
