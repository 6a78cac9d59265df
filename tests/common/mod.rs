//! Helpers shared by the integration tests.

#![allow(dead_code, clippy::panic)]

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;

use counter_remote::client::{ConnectionHandle, ConnectionManager};
use counter_remote::config::PanelConfig;
use counter_remote::domain::{EventBus, PanelEvent};
use counter_remote::ui::{ControlId, MemoryDisplay, Panel};

/// Upper bound for anything a test waits on.
pub const WAIT: Duration = Duration::from_secs(5);

/// Awaits `fut`, failing the test after [`WAIT`].
pub async fn within<F: Future>(what: &str, fut: F) -> F::Output {
    match tokio::time::timeout(WAIT, fut).await {
        Ok(out) => out,
        Err(_) => panic!("timed out waiting for {what}"),
    }
}

/// Receives events until one matches `pred`, skipping lag notices.
pub async fn next_event(
    rx: &mut broadcast::Receiver<PanelEvent>,
    what: &str,
    pred: impl Fn(&PanelEvent) -> bool,
) -> PanelEvent {
    within(what, async {
        loop {
            match rx.recv().await {
                Ok(event) if pred(&event) => return event,
                Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => {}
                Err(broadcast::error::RecvError::Closed) => panic!("event bus closed"),
            }
        }
    })
    .await
}

/// Waits until the display's `count` element reads `expected`.
pub async fn wait_for_count(display: &MemoryDisplay, expected: &str) {
    let mut rx = display.watch();
    within(&format!("count {expected}"), async {
        let seen = rx
            .wait_for(|texts| texts.get(&ControlId::Count).map(String::as_str) == Some(expected))
            .await;
        assert!(seen.is_ok(), "display dropped");
    })
    .await;
}

/// A running panel: connection loop plus display task.
pub struct TestPanel {
    pub panel: Arc<Panel<MemoryDisplay>>,
    pub display: MemoryDisplay,
    pub events: broadcast::Receiver<PanelEvent>,
    display_task: JoinHandle<()>,
}

impl TestPanel {
    /// Starts a panel dialling `127.0.0.1:port` with a short reconnect delay.
    pub fn start(port: u16) -> Self {
        Self::start_with_delay(port, Duration::from_millis(50))
    }

    /// Starts a panel dialling `127.0.0.1:port`.
    pub fn start_with_delay(port: u16, reconnect_delay: Duration) -> Self {
        let mut config = PanelConfig::for_device("127.0.0.1", port);
        config.reconnect_delay = reconnect_delay;

        let manager = ConnectionManager::new(config, EventBus::new(4096));
        let events = manager.events().subscribe();
        let display_events = manager.events().subscribe();
        let display = MemoryDisplay::new();

        let mut panel = Panel::new(manager.spawn(), display.clone());
        panel.bind_buttons();
        let panel = Arc::new(panel);

        let display_task = tokio::spawn({
            let panel = Arc::clone(&panel);
            async move { panel.run(display_events).await }
        });

        Self {
            panel,
            display,
            events,
            display_task,
        }
    }

    pub fn connection(&self) -> &ConnectionHandle {
        self.panel.connection()
    }

    /// Waits for the next `Opened` event.
    pub async fn opened(&mut self) {
        next_event(&mut self.events, "connection open", |e| {
            matches!(e, PanelEvent::Opened { .. })
        })
        .await;
    }

    pub async fn stop(self) {
        self.panel.connection().disconnect().await;
        self.display_task.abort();
    }
}

/// What the scripted device does next.
#[derive(Debug)]
pub enum Outbound {
    /// Send a text frame.
    Text(String),
    /// Close the current socket.
    Close,
}

/// A scripted WebSocket peer standing in for the device.
pub struct FakeDevice {
    pub port: u16,
    pub to_panel: mpsc::UnboundedSender<Outbound>,
    pub from_panel: mpsc::UnboundedReceiver<String>,
    pub accepted: mpsc::UnboundedReceiver<()>,
    task: JoinHandle<()>,
}

impl FakeDevice {
    pub async fn start() -> Self {
        let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
            panic!("bind failed");
        };
        let Ok(addr) = listener.local_addr() else {
            panic!("no local addr");
        };

        let (to_panel, mut script) = mpsc::unbounded_channel::<Outbound>();
        let (frames_tx, from_panel) = mpsc::unbounded_channel();
        let (accepted_tx, accepted) = mpsc::unbounded_channel();

        let task = tokio::spawn(async move {
            loop {
                let Ok((tcp, _)) = listener.accept().await else {
                    return;
                };
                let Ok(ws) = tokio_tungstenite::accept_async(tcp).await else {
                    continue;
                };
                let _ = accepted_tx.send(());
                let (mut tx, mut rx) = ws.split();

                loop {
                    tokio::select! {
                        out = script.recv() => match out {
                            Some(Outbound::Text(text)) => {
                                if tx.send(Message::text(text)).await.is_err() {
                                    break;
                                }
                            }
                            Some(Outbound::Close) => {
                                let _ = tx.send(Message::Close(None)).await;
                                break;
                            }
                            None => return,
                        },
                        msg = rx.next() => match msg {
                            Some(Ok(Message::Text(text))) => {
                                let _ = frames_tx.send(text.as_str().to_owned());
                            }
                            Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                            Some(Ok(_)) => {}
                        },
                    }
                }
            }
        });

        Self {
            port: addr.port(),
            to_panel,
            from_panel,
            accepted,
            task,
        }
    }

    pub fn send(&self, text: &str) {
        let _ = self.to_panel.send(Outbound::Text(text.to_string()));
    }

    pub fn close(&self) {
        let _ = self.to_panel.send(Outbound::Close);
    }

    pub async fn wait_accepted(&mut self) {
        let got = within("device accept", self.accepted.recv()).await;
        assert!(got.is_some(), "device stopped accepting");
    }

    pub async fn next_frame(&mut self) -> String {
        let Some(frame) = within("frame from panel", self.from_panel.recv()).await else {
            panic!("device stopped");
        };
        frame
    }
}

impl Drop for FakeDevice {
    fn drop(&mut self) {
        self.task.abort();
    }
}
