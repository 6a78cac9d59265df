//! Panel behaviour against a scripted device.

#![allow(clippy::panic)]

mod common;

use std::time::Duration;

use common::{FakeDevice, TestPanel, next_event, wait_for_count};
use counter_remote::domain::PanelEvent;
use counter_remote::ui::ControlId;
use counter_remote::ws::messages::Command;

#[tokio::test]
async fn each_click_sends_exactly_one_frame() {
    let mut device = FakeDevice::start().await;
    let mut panel = TestPanel::start(device.port);
    device.wait_accepted().await;
    panel.opened().await;

    for command in Command::ALL {
        let clicked = panel.panel.click(ControlId::button_for(command)).await;
        assert!(clicked.is_ok(), "click on {command} failed: {clicked:?}");
        let frame = device.next_frame().await;
        assert_eq!(frame, format!("{{\"command\":\"{command}\"}}"));
    }

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(device.from_panel.try_recv().is_err(), "unexpected extra frame");
    panel.stop().await;
}

#[tokio::test]
async fn count_frames_drive_the_display() {
    let mut device = FakeDevice::start().await;
    let mut panel = TestPanel::start(device.port);
    device.wait_accepted().await;
    panel.opened().await;

    device.send(r#"{"count": 42}"#);
    wait_for_count(&panel.display, "42").await;

    device.send(r#"{"count": 7, "extra": "x"}"#);
    wait_for_count(&panel.display, "7").await;

    panel.stop().await;
}

#[tokio::test]
async fn malformed_frames_are_dropped_and_session_survives() {
    let mut device = FakeDevice::start().await;
    let mut panel = TestPanel::start(device.port);
    device.wait_accepted().await;
    panel.opened().await;

    device.send(r#"{"count": 3}"#);
    wait_for_count(&panel.display, "3").await;

    device.send("definitely not json");
    device.send(r#"{"counter": 99}"#);
    device.send(r#"{"count": 4}"#);
    wait_for_count(&panel.display, "4").await;

    assert!(panel.connection().is_connected().await);
    let clicked = panel.panel.click(ControlId::Reset).await;
    assert!(clicked.is_ok());
    assert_eq!(device.next_frame().await, r#"{"command":"reset"}"#);

    panel.stop().await;
}

#[tokio::test]
async fn every_close_is_followed_by_a_reconnect() {
    let mut device = FakeDevice::start().await;
    let mut panel = TestPanel::start(device.port);
    device.wait_accepted().await;
    panel.opened().await;

    let first = panel.connection().client_id().await;
    assert!(first.is_some());

    for round in 0..3 {
        device.close();
        next_event(&mut panel.events, "close", |e| {
            matches!(e, PanelEvent::Closed { client_id: Some(_), .. })
        })
        .await;
        let PanelEvent::Connecting { attempt, .. } =
            next_event(&mut panel.events, "reconnect attempt", |e| {
                matches!(e, PanelEvent::Connecting { .. })
            })
            .await
        else {
            panic!("expected a connect attempt");
        };
        assert_eq!(attempt, round + 2);
        device.wait_accepted().await;
        panel.opened().await;
    }

    // The slot holds a fresh session, never the first one.
    let current = panel.connection().client_id().await;
    assert!(current.is_some());
    assert_ne!(current, first);

    panel.stop().await;
}

#[tokio::test]
async fn commands_are_not_queued_across_a_close() {
    let mut device = FakeDevice::start().await;
    let mut panel = TestPanel::start_with_delay(device.port, Duration::from_millis(500));
    device.wait_accepted().await;
    panel.opened().await;

    device.close();
    next_event(&mut panel.events, "close", |e| {
        matches!(e, PanelEvent::Closed { .. })
    })
    .await;

    // Between the close and the reconnect there is no connection.
    let dropped = panel.panel.click(ControlId::Increase).await;
    assert!(dropped.is_err());

    device.wait_accepted().await;
    panel.opened().await;
    let sent = panel.panel.click(ControlId::Decrease).await;
    assert!(sent.is_ok());
    assert_eq!(device.next_frame().await, r#"{"command":"decrease"}"#);

    panel.stop().await;
}
