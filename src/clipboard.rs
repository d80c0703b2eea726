//! Host clipboard access for paste playback.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("clipboard rejected text: {0}")]
    Rejected(String),
}

/// Puts text on the host clipboard.
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// System clipboard via arboard.
///
/// The handle is opened on first use and kept for the lifetime of this
/// value: on X11 the copied text is only served while the handle is alive.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&mut self) -> Result<&mut arboard::Clipboard, ClipboardError> {
        if self.inner.is_none() {
            let clipboard =
                arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            self.inner = Some(clipboard);
        }
        self.inner
            .as_mut()
            .ok_or_else(|| ClipboardError::Unavailable("clipboard handle missing".into()))
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.handle()?
            .set_text(text)
            .map_err(|e| ClipboardError::Rejected(e.to_string()))?;
        log::info!("host: copied {} chars to clipboard", text.chars().count());
        Ok(())
    }
}
