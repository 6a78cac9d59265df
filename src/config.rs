//! Panel and device configuration loaded from environment variables.
//!
//! All settings come from environment variables (or a `.env` file via
//! `dotenvy`). Numeric values that fail to parse fall back to their
//! defaults; socket addresses that fail to parse are reported as errors.

use std::net::SocketAddr;
use std::time::Duration;

use crate::error::PanelError;

/// Default device address: the static IP the firmware assigns itself.
pub const DEFAULT_DEVICE_HOST: &str = "192.168.1.99";

/// Port the device exposes its WebSocket endpoint on.
pub const DEFAULT_DEVICE_WS_PORT: u16 = 81;

/// Fixed delay between a close and the next connect attempt.
pub const DEFAULT_RECONNECT_DELAY_MS: u64 = 2000;

/// Panel client configuration.
///
/// Loaded once at startup via [`PanelConfig::from_env`].
#[derive(Debug, Clone)]
pub struct PanelConfig {
    /// Host name or IP of the counter device.
    pub device_host: String,

    /// WebSocket port on the device.
    pub device_ws_port: u16,

    /// Delay before reconnecting after a close.
    pub reconnect_delay: Duration,

    /// Capacity of the panel event bus.
    pub event_bus_capacity: usize,
}

impl PanelConfig {
    /// Loads the panel configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Config`] if `DEVICE_HOST` is set to an empty
    /// string.
    pub fn from_env() -> Result<Self, PanelError> {
        dotenvy::dotenv().ok();

        let device_host =
            std::env::var("DEVICE_HOST").unwrap_or_else(|_| DEFAULT_DEVICE_HOST.to_string());
        if device_host.trim().is_empty() {
            return Err(PanelError::Config("DEVICE_HOST is empty".to_string()));
        }

        Ok(Self {
            device_host,
            device_ws_port: parse_env("DEVICE_WS_PORT", DEFAULT_DEVICE_WS_PORT),
            reconnect_delay: Duration::from_millis(parse_env(
                "RECONNECT_DELAY_MS",
                DEFAULT_RECONNECT_DELAY_MS,
            )),
            event_bus_capacity: parse_env("EVENT_BUS_CAPACITY", 1024),
        })
    }

    /// Builds a configuration pointing at `host:port` with default timings.
    #[must_use]
    pub fn for_device(host: impl Into<String>, port: u16) -> Self {
        Self {
            device_host: host.into(),
            device_ws_port: port,
            reconnect_delay: Duration::from_millis(DEFAULT_RECONNECT_DELAY_MS),
            event_bus_capacity: 1024,
        }
    }

    /// Returns the gateway URL, `ws://<host>:<port>/`.
    #[must_use]
    pub fn gateway_url(&self) -> String {
        format!("ws://{}:{}/", self.device_host, self.device_ws_port)
    }
}

/// Device simulator configuration.
#[derive(Debug, Clone)]
pub struct DeviceConfig {
    /// Address serving the control page.
    pub http_listen_addr: SocketAddr,

    /// Address serving the WebSocket endpoint.
    pub ws_listen_addr: SocketAddr,

    /// Period of the free-running counter tick.
    pub tick_interval: Duration,

    /// Period of the status broadcast to connected clients.
    pub broadcast_interval: Duration,

    /// The counter wraps into `0..count_limit`.
    pub count_limit: i64,

    /// Capacity of the status broadcast channel.
    pub event_bus_capacity: usize,
}

impl DeviceConfig {
    /// Loads the device configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Config`] if a listen address cannot be parsed
    /// or `COUNT_LIMIT` is not positive.
    pub fn from_env() -> Result<Self, PanelError> {
        dotenvy::dotenv().ok();

        let http_listen_addr = parse_addr("HTTP_LISTEN_ADDR", "0.0.0.0:80")?;
        let ws_listen_addr = parse_addr("WS_LISTEN_ADDR", "0.0.0.0:81")?;

        let count_limit = check_count_limit(parse_env("COUNT_LIMIT", 20))?;

        Ok(Self {
            http_listen_addr,
            ws_listen_addr,
            tick_interval: Duration::from_millis(parse_env("TICK_INTERVAL_MS", 1000)),
            broadcast_interval: Duration::from_millis(parse_env("BROADCAST_INTERVAL_MS", 10)),
            count_limit,
            event_bus_capacity: parse_env("EVENT_BUS_CAPACITY", 1024),
        })
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            http_listen_addr: SocketAddr::from(([0, 0, 0, 0], 80)),
            ws_listen_addr: SocketAddr::from(([0, 0, 0, 0], 81)),
            tick_interval: Duration::from_secs(1),
            broadcast_interval: Duration::from_millis(10),
            count_limit: 20,
            event_bus_capacity: 1024,
        }
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    parse_or(std::env::var(key).ok().as_deref(), default)
}

fn parse_or<T: std::str::FromStr>(raw: Option<&str>, default: T) -> T {
    raw.and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn parse_addr(key: &str, default: &str) -> Result<SocketAddr, PanelError> {
    parse_addr_value(key, std::env::var(key).ok().as_deref(), default)
}

fn parse_addr_value(
    key: &str,
    raw: Option<&str>,
    default: &str,
) -> Result<SocketAddr, PanelError> {
    let raw = raw.unwrap_or(default);
    raw.parse()
        .map_err(|e| PanelError::Config(format!("{key}={raw}: {e}")))
}

fn check_count_limit(count_limit: i64) -> Result<i64, PanelError> {
    if count_limit <= 0 {
        return Err(PanelError::Config(format!(
            "COUNT_LIMIT must be positive, got {count_limit}"
        )));
    }
    Ok(count_limit)
}
