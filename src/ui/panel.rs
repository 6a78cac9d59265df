//! UI binder: routes button clicks to commands and status to the display.

use std::collections::HashMap;

use tokio::sync::broadcast;

use super::controls::ControlId;
use super::display::StatusDisplay;
use crate::client::ConnectionHandle;
use crate::domain::PanelEvent;
use crate::error::PanelError;
use crate::ws::messages::{Command, StatusMessage};

/// The control panel: five buttons and one counter display over a
/// single device connection.
#[derive(Debug)]
pub struct Panel<D> {
    connection: ConnectionHandle,
    display: D,
    bindings: HashMap<ControlId, Command>,
}

impl<D: StatusDisplay> Panel<D> {
    /// Creates a panel with no buttons bound yet.
    #[must_use]
    pub fn new(connection: ConnectionHandle, display: D) -> Self {
        Self {
            connection,
            display,
            bindings: HashMap::new(),
        }
    }

    /// Binds each of the five command buttons to its command.
    pub fn bind_buttons(&mut self) {
        for command in Command::ALL {
            self.bindings.insert(ControlId::button_for(command), command);
        }
    }

    /// Returns the command bound to `control`, if any.
    #[must_use]
    pub fn binding(&self, control: ControlId) -> Option<Command> {
        self.bindings.get(&control).copied()
    }

    /// Returns the display the panel writes into.
    #[must_use]
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Returns the connection the panel sends on.
    #[must_use]
    pub fn connection(&self) -> &ConnectionHandle {
        &self.connection
    }

    /// Handles a click on `control`, sending its command once.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::UnknownControl`] if nothing is bound to
    /// `control`, or [`PanelError::NotConnected`] if the command was
    /// dropped because no connection is open.
    pub async fn click(&self, control: ControlId) -> Result<(), PanelError> {
        let command = self
            .binding(control)
            .ok_or_else(|| PanelError::UnknownControl(control.to_string()))?;
        self.connection.send(command).await
    }

    /// Applies an inbound frame: writes its `count` into the display.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::MalformedStatus`] or
    /// [`PanelError::MissingCount`] if the frame is unusable; the display
    /// is left untouched.
    pub fn on_message(&self, payload: &str) -> Result<(), PanelError> {
        let status = StatusMessage::parse(payload)?;
        self.display.set_text(ControlId::Count, &status.display_text());
        Ok(())
    }

    /// Feeds inbound frames from `events` into the display until the bus
    /// closes.
    pub async fn run(&self, mut events: broadcast::Receiver<PanelEvent>) {
        loop {
            match events.recv().await {
                Ok(PanelEvent::Message { payload, .. }) => {
                    if let Err(e) = self.on_message(&payload) {
                        tracing::warn!(error = %e, "dropping malformed status frame");
                    }
                }
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::debug!(lagged = n, "panel lagged behind connection events");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    }
}
