//! webinput -- host input-simulation engine behind a browser control panel.
//!
//! The request layer calls `HostActions`, which plays key sequences through
//! `SequenceExecutor` and forwards mouse motion/clicks, all against one
//! `InputBackend` selected at startup from the cached `PlatformProfile`.
//!
//! ```no_run
//! use webinput::{parse_wire, Config, HostActions};
//!
//! let config = Config::load_default().unwrap_or_default();
//! let mut host = HostActions::from_config(&config);
//! let chord = parse_wire(r#"[["ctrl","down"],["a","press"],["ctrl","up"]]"#).unwrap();
//! assert!(host.execute_sequence(&chord).success);
//! ```

pub mod buttons;
pub mod clipboard;
pub mod config;
pub mod executor;
pub mod host;
pub mod mouse;
pub mod platform;
pub mod sequence;

pub use buttons::{Button, ButtonStore, StaticButtons};
pub use clipboard::{Clipboard, ClipboardError, SystemClipboard};
pub use config::{BackendChoice, Config, ConfigError};
pub use executor::{ExecutionReport, SequenceExecutor};
pub use host::{ExecutionResult, HostActions};
pub use platform::{
    BackendKind, InputBackend, MouseButton, NativeKeyCode, Os, PlatformError, PlatformProfile,
};
pub use sequence::{parse_wire, to_wire, KeyAction, KeySequence, KeyStep, StepError};
