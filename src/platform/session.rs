//! Linux graphical-session check for the injection backend.
//!
//! enigo injects through XTest, so events only land when an X server is
//! reachable: a plain X11 session or XWayland under a Wayland compositor.

use std::env;
use std::fmt;

/// What the environment says about the graphical session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Session {
    X11,
    /// Wayland compositor with `DISPLAY` exported for XWayland.
    XWayland,
    /// Wayland compositor without an X server.
    WaylandOnly,
    /// Neither `WAYLAND_DISPLAY` nor `DISPLAY`.
    Headless,
}

impl Session {
    /// Reads `WAYLAND_DISPLAY` and `DISPLAY` from the process environment.
    pub fn current() -> Self {
        Self::classify(non_empty("WAYLAND_DISPLAY"), non_empty("DISPLAY"))
    }

    fn classify(wayland: bool, x_display: bool) -> Self {
        match (wayland, x_display) {
            (false, true) => Session::X11,
            (true, true) => Session::XWayland,
            (true, false) => Session::WaylandOnly,
            (false, false) => Session::Headless,
        }
    }

    /// Why XTest events would have no X server to go to, if so.
    pub fn unavailable_reason(self) -> Option<&'static str> {
        match self {
            Session::X11 | Session::XWayland => None,
            Session::WaylandOnly => {
                Some("Wayland session without XWayland; set DISPLAY to inject input")
            }
            Session::Headless => Some("no display server detected"),
        }
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Session::X11 => "x11",
            Session::XWayland => "xwayland",
            Session::WaylandOnly => "wayland",
            Session::Headless => "headless",
        })
    }
}

fn non_empty(var: &str) -> bool {
    env::var_os(var).is_some_and(|v| !v.is_empty())
}
