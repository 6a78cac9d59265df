//! counter-panel entry point.
//!
//! Connects to the device, renders the counter on the terminal, and treats
//! every stdin line naming a button (`reset`, `stop`, `increase`,
//! `decrease`, `start`) as a click on it.

use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};

use counter_remote::client::ConnectionManager;
use counter_remote::config::PanelConfig;
use counter_remote::domain::EventBus;
use counter_remote::error::PanelError;
use counter_remote::ui::{ControlId, Panel, TerminalDisplay};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    counter_remote::logging::init();

    // Load configuration
    let config = PanelConfig::from_env().context("loading panel configuration")?;
    tracing::info!(gateway = %config.gateway_url(), "starting counter-panel");

    // Open the connection, then bind the buttons
    let manager = ConnectionManager::new(config.clone(), EventBus::new(config.event_bus_capacity));
    let events = manager.events().subscribe();
    let connection = manager.spawn();

    let mut panel = Panel::new(connection.clone(), TerminalDisplay::new());
    panel.bind_buttons();
    let panel = Arc::new(panel);

    let display_task = tokio::spawn({
        let panel = Arc::clone(&panel);
        async move { panel.run(events).await }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("reading stdin")? else {
                    break;
                };
                let name = line.trim();
                if name.is_empty() {
                    continue;
                }
                let result = match name.parse::<ControlId>() {
                    Ok(control) => panel.click(control).await,
                    Err(e) => Err(e),
                };
                match result {
                    Ok(()) => tracing::debug!(control = name, "click sent"),
                    Err(PanelError::NotConnected) => {
                        tracing::warn!(control = name, "not connected, click dropped");
                    }
                    Err(e) => tracing::warn!(error = %e, "click ignored"),
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    connection.disconnect().await;
    display_task.abort();
    tracing::info!("counter-panel stopped");

    Ok(())
}
