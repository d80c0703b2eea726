//! Named button macros.
//!
//! A button links a display name to a key sequence. Storage is an external
//! concern; the façade only needs `ButtonStore::key_sequence`.

use serde::{Deserialize, Serialize};

use crate::platform::PlatformProfile;
use crate::sequence::{KeyAction, KeySequence, KeyStep};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub id: String,
    pub name: String,
    /// Styling hint for the web UI.
    #[serde(default)]
    pub classes: String,
    #[serde(default)]
    pub key_sequence: KeySequence,
}

/// Source of button definitions.
pub trait ButtonStore {
    /// The key sequence bound to `button_id`, if the button exists.
    fn key_sequence(&self, button_id: &str) -> Option<KeySequence>;

    /// All buttons in display order.
    fn buttons(&self) -> Vec<Button>;
}

/// In-memory button list, typically loaded from the config file.
#[derive(Debug, Clone, Default)]
pub struct StaticButtons {
    buttons: Vec<Button>,
}

impl StaticButtons {
    pub fn new(buttons: Vec<Button>) -> Self {
        Self { buttons }
    }
}

impl ButtonStore for StaticButtons {
    fn key_sequence(&self, button_id: &str) -> Option<KeySequence> {
        self.buttons
            .iter()
            .find(|b| b.id == button_id)
            .map(|b| b.key_sequence.clone())
    }

    fn buttons(&self) -> Vec<Button> {
        self.buttons.clone()
    }
}

/// Built-in buttons used when the config defines none. Chords use the
/// profile's primary modifier.
pub fn default_buttons(profile: &PlatformProfile) -> Vec<Button> {
    let m = profile.primary_modifier_key();
    let down = |k: &'static str| KeyStep::from_static(k, KeyAction::Down);
    let press = |k: &'static str| KeyStep::from_static(k, KeyAction::Press);
    let up = |k: &'static str| KeyStep::from_static(k, KeyAction::Up);

    let button = |id: &str, name: &str, classes: &str, key_sequence: KeySequence| Button {
        id: id.to_owned(),
        name: name.to_owned(),
        classes: classes.to_owned(),
        key_sequence,
    };

    let mut paste_enter = profile.paste_sequence();
    paste_enter.push(press("enter"));

    vec![
        button("paste", "Paste", "", profile.paste_sequence()),
        button("paste-enter", "Paste & Enter", "", paste_enter),
        button("accept", "Accept", "", vec![down(m), press("enter"), up(m)]),
        button("new", "New", "", profile.primary_chord("n")),
        button(
            "stop",
            "Stop",
            "bg-red-500",
            vec![down(m), down("shift"), press("backspace"), up("shift"), up(m)],
        ),
        button(
            "reject",
            "Reject",
            "bg-red-500",
            vec![down(m), press("backspace"), up(m)],
        ),
        button("enter", "Enter", "", vec![press("enter")]),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
