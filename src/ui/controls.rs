//! Control identifiers on the panel surface.
//!
//! The page exposes one display element (`count`) and five buttons, one
//! per [`Command`]. Identifiers match the element ids of the device's
//! control page.

use std::fmt;
use std::str::FromStr;

use crate::error::PanelError;
use crate::ws::messages::Command;

/// Identifier of an element on the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlId {
    /// The counter display.
    Count,
    /// The `reset` button.
    Reset,
    /// The `stop` button.
    Stop,
    /// The `increase` button.
    Increase,
    /// The `decrease` button.
    Decrease,
    /// The `start` button.
    Start,
}

impl ControlId {
    /// Every element the panel expects to find.
    pub const ALL: [Self; 6] = [
        Self::Count,
        Self::Reset,
        Self::Stop,
        Self::Increase,
        Self::Decrease,
        Self::Start,
    ];

    /// Returns the element id.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Reset => "reset",
            Self::Stop => "stop",
            Self::Increase => "increase",
            Self::Decrease => "decrease",
            Self::Start => "start",
        }
    }

    /// Returns the button that issues `command`.
    #[must_use]
    pub const fn button_for(command: Command) -> Self {
        match command {
            Command::Reset => Self::Reset,
            Command::Stop => Self::Stop,
            Command::Increase => Self::Increase,
            Command::Decrease => Self::Decrease,
            Command::Start => Self::Start,
        }
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ControlId {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| PanelError::UnknownControl(s.to_string()))
    }
}
