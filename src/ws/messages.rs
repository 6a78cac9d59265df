//! WebSocket wire types: outbound commands and inbound status frames.
//!
//! Frames are single JSON objects sent as text:
//!
//! ```text
//! panel  → device   {"command":"increase"}
//! device → panel    {"count":7}
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PanelError;

/// One of the five fixed user actions understood by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// Set the counter back to zero.
    Reset,
    /// Pause the free-running tick.
    Stop,
    /// Add one to the counter.
    Increase,
    /// Subtract one from the counter.
    Decrease,
    /// Resume the free-running tick.
    Start,
}

impl Command {
    /// All commands, in the order the control page lays them out.
    pub const ALL: [Self; 5] = [
        Self::Reset,
        Self::Stop,
        Self::Increase,
        Self::Decrease,
        Self::Start,
    ];

    /// Returns the wire name of the command.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reset => "reset",
            Self::Stop => "stop",
            Self::Increase => "increase",
            Self::Decrease => "decrease",
            Self::Start => "start",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Command {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| PanelError::UnknownCommand(s.to_string()))
    }
}

/// Outbound frame: `{"command": "<name>"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMessage {
    /// The command being sent.
    pub command: Command,
}

impl CommandMessage {
    /// Serializes the frame to its JSON text form.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::MalformedStatus`] if serialization fails.
    pub fn to_text(&self) -> Result<String, PanelError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl From<Command> for CommandMessage {
    fn from(command: Command) -> Self {
        Self { command }
    }
}

/// Command frame as the device receives it.
///
/// The command is kept as a raw string so unknown names can be logged
/// rather than rejected at the parse step.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCommandFrame {
    /// Command name, if present.
    #[serde(default)]
    pub command: Option<String>,
}

/// Inbound frame: `{"count": <number>}`. Other fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    /// Counter value reported by the device.
    pub count: serde_json::Number,
}

impl StatusMessage {
    /// Builds a status frame for an integer count.
    #[must_use]
    pub fn from_count(count: i64) -> Self {
        Self {
            count: serde_json::Number::from(count),
        }
    }

    /// Parses an inbound text frame.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::MalformedStatus`] if the payload is not JSON,
    /// or [`PanelError::MissingCount`] if it has no numeric `count` field.
    pub fn parse(payload: &str) -> Result<Self, PanelError> {
        let value: serde_json::Value = serde_json::from_str(payload)?;
        match value.get("count") {
            Some(serde_json::Value::Number(count)) => Ok(Self {
                count: count.clone(),
            }),
            _ => Err(PanelError::MissingCount),
        }
    }

    /// Returns the text written into the `count` display element.
    ///
    /// Whole floats below `1e21` render without a fractional part, so
    /// `1e2` and `100.0` both show as `100`.
    #[must_use]
    pub fn display_text(&self) -> String {
        if self.count.is_f64()
            && let Some(value) = self.count.as_f64()
            && value.fract() == 0.0
            && value.abs() < 1e21
        {
            // -0.0 shows as 0
            let value = if value == 0.0 { 0.0 } else { value };
            return format!("{value:.0}");
        }
        self.count.to_string()
    }

    /// Serializes the frame to its JSON text form.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::MalformedStatus`] if serialization fails.
    pub fn to_text(&self) -> Result<String, PanelError> {
        Ok(serde_json::to_string(self)?)
    }
}
