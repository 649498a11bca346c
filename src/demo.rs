// Demo mode: Generate mock process events to showcase the TUI
//
// Simulates a wrapped Claude Code process: it starts, streams a few lines of
// output, hits a recoverable error, stops, and is restarted. Every event
// goes through the same channel a real process supervisor would use.
//
// Run with: CCFORGE_DEMO=1 cargo run --release   (or: ccforge --demo)

use crate::events::{AppEvent, ProcessStatus};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::sync::oneshot;
use tokio::time::sleep;

/// PID reported by the first mock process
const DEMO_PID: u32 = 4242;

/// Generate a sequence of demo events simulating a short session
pub async fn run_demo(tx: mpsc::Sender<AppEvent>, mut shutdown_rx: oneshot::Receiver<()>) {
    // Initial delay to let TUI render
    sleep(Duration::from_millis(1500)).await;

    for (event, delay_ms) in generate_demo_sequence() {
        // Check for shutdown signal before sending
        if shutdown_rx.try_recv().is_ok() {
            return;
        }
        if tx.send(event).await.is_err() {
            // Receiver gone: the TUI has exited
            return;
        }
        sleep(Duration::from_millis(delay_ms)).await;
    }

    tracing::info!("Demo sequence finished");

    // Keep running so TUI stays active, but listen for shutdown
    loop {
        tokio::select! {
            _ = &mut shutdown_rx => {
                tracing::info!("Demo received shutdown signal");
                return;
            }
            _ = sleep(Duration::from_secs(60)) => {}
        }
    }
}

fn output(text: &str) -> AppEvent {
    AppEvent::Process(ProcessStatus::Output {
        text: text.to_string(),
    })
}

fn generate_demo_sequence() -> Vec<(AppEvent, u64)> {
    let mut events = Vec::new();

    // === Phase 1: process comes up ===
    events.push((AppEvent::Process(ProcessStatus::Started { pid: DEMO_PID }), 600));
    events.push((output("Claude Code ready in /projects/example"), 400));
    events.push((output("Reading START_HERE.md..."), 700));

    // === Phase 2: a burst of output, including a multi-line chunk ===
    events.push((
        output("Found 3 modules:\n  - transcript\n  - editor\n  - scroll\n"),
        500,
    ));
    for step in 1..=12 {
        events.push((output(&format!("Running check {}/12... ok", step)), 150));
    }

    // === Phase 3: a recoverable failure ===
    events.push((
        AppEvent::Process(ProcessStatus::Error {
            pid: DEMO_PID,
            error: "broken pipe".to_string(),
        }),
        800,
    ));
    events.push((AppEvent::error("supervisor", "restarting after pipe error"), 600));
    events.push((AppEvent::Process(ProcessStatus::Stopped { pid: DEMO_PID }), 900));

    // === Phase 4: restart and settle ===
    let pid = DEMO_PID + 1;
    events.push((AppEvent::Process(ProcessStatus::Started { pid }), 500));
    events.push((AppEvent::command("task", &["demo"]), 400));
    events.push((output("All checks passed."), 300));

    events
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_starts_and_restarts() {
        let events = generate_demo_sequence();
        let starts = events
            .iter()
            .filter(|(e, _)| matches!(e, AppEvent::Process(ProcessStatus::Started { .. })))
            .count();
        assert_eq!(starts, 2);
        assert!(matches!(
            events.first(),
            Some((AppEvent::Process(ProcessStatus::Started { pid: DEMO_PID }), _))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_demo_stops_when_receiver_dropped() {
        let (tx, rx) = mpsc::channel(4);
        let (_shutdown_tx, shutdown_rx) = oneshot::channel();
        drop(rx);
        // Returns instead of looping forever
        run_demo(tx, shutdown_rx).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_demo_delivers_events() {
        let (tx, mut rx) = mpsc::channel(64);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let handle = tokio::spawn(run_demo(tx, shutdown_rx));

        let first = rx.recv().await;
        assert_eq!(
            first,
            Some(AppEvent::Process(ProcessStatus::Started { pid: DEMO_PID }))
        );

        let _ = shutdown_tx.send(());
        handle.await.unwrap();
    }
}
