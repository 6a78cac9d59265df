//! Text surfaces the panel writes status into.

use std::collections::HashMap;
use std::io::Write;
use std::sync::{Arc, Mutex};

use tokio::sync::watch;

use super::controls::ControlId;

/// A surface holding one text node per element.
pub trait StatusDisplay: Send + Sync {
    /// Replaces the text of `element`.
    fn set_text(&self, element: ControlId, text: &str);
}

/// Renders the `count` element on a single terminal line.
///
/// The line is redrawn in place and only when the text changes, so the
/// device's high-rate broadcast does not flood the terminal.
#[derive(Debug, Default)]
pub struct TerminalDisplay {
    last: Mutex<Option<String>>,
}

impl TerminalDisplay {
    /// Creates a terminal display with nothing drawn yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatusDisplay for TerminalDisplay {
    fn set_text(&self, element: ControlId, text: &str) {
        if element != ControlId::Count {
            return;
        }
        let Ok(mut last) = self.last.lock() else {
            return;
        };
        if last.as_deref() == Some(text) {
            return;
        }
        *last = Some(text.to_owned());

        if let Err(e) = draw(&mut std::io::stdout().lock(), element, text) {
            tracing::debug!(error = %e, "terminal write failed");
        }
    }
}

/// Redraws `element` in place on the current line.
fn draw(out: &mut impl Write, element: ControlId, text: &str) -> std::io::Result<()> {
    write!(out, "\r{element}: {text:>6}")?;
    out.flush()
}

/// In-memory display, observable through a [`watch`] channel.
///
/// Clones share the same text nodes.
#[derive(Debug, Clone)]
pub struct MemoryDisplay {
    texts: Arc<watch::Sender<HashMap<ControlId, String>>>,
}

impl MemoryDisplay {
    /// Creates a display with every element empty.
    #[must_use]
    pub fn new() -> Self {
        let (texts, _) = watch::channel(HashMap::new());
        Self {
            texts: Arc::new(texts),
        }
    }

    /// Returns the current text of `element`, if it was ever written.
    #[must_use]
    pub fn text(&self, element: ControlId) -> Option<String> {
        self.texts.borrow().get(&element).cloned()
    }

    /// Returns a receiver notified on every write.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<HashMap<ControlId, String>> {
        self.texts.subscribe()
    }
}

impl Default for MemoryDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusDisplay for MemoryDisplay {
    fn set_text(&self, element: ControlId, text: &str) {
        self.texts.send_modify(|texts| {
            texts.insert(element, text.to_owned());
        });
    }
}
