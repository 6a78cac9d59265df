//! counter-device entry point.
//!
//! Runs the counter device simulator until Ctrl-C.

use anyhow::Context;

use counter_remote::config::DeviceConfig;
use counter_remote::device::DeviceServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    counter_remote::logging::init();

    // Load configuration
    let config = DeviceConfig::from_env().context("loading device configuration")?;
    tracing::info!(
        http = %config.http_listen_addr,
        ws = %config.ws_listen_addr,
        "starting counter-device"
    );

    let device = DeviceServer::start(&config)
        .await
        .context("binding device listeners")?;

    tokio::signal::ctrl_c()
        .await
        .context("waiting for ctrl-c")?;

    device.shutdown().await;
    Ok(())
}
