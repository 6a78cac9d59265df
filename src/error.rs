//! Error types shared by the panel client and the device simulator.
//!
//! [`PanelError`] is the central error type. None of its variants are
//! fatal to a running panel: transport failures never surface here at all,
//! they end the session and the connection loop reconnects.

/// Errors raised while talking to the counter device.
#[derive(Debug, thiserror::Error)]
pub enum PanelError {
    /// No live connection is currently held in the connection slot.
    #[error("not connected to device")]
    NotConnected,

    /// An inbound status frame was not valid JSON.
    #[error("malformed status frame: {0}")]
    MalformedStatus(#[from] serde_json::Error),

    /// An inbound status frame parsed but carried no numeric `count`.
    #[error("status frame has no numeric count")]
    MissingCount,

    /// A click was delivered to a control that is not bound.
    #[error("unknown control: {0}")]
    UnknownControl(String),

    /// A command name outside the five fixed commands.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    Config(String),
}
