// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (terminal input, timer ticks, background producers)
// - Translating crossterm events into `AppEvent`s for the router
// - Rendering the UI

pub mod app;
pub mod commands;
pub mod editor;
pub mod router;
pub mod scroll;
pub mod status_bar;
pub mod traits;
pub mod transcript;
pub mod ui;

use crate::config::{Config, VERSION};
use crate::events::AppEvent;
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use router::{EventRouter, Flow};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

/// Run the TUI
///
/// This function sets up the terminal, runs the event loop, and cleans up
/// when done. The event loop handles both terminal input and events sent
/// by background producers (demo mode, process supervisors).
pub async fn run_tui(mut event_rx: mpsc::Receiver<AppEvent>, config: &Config) -> Result<()> {
    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::new(config.max_lines, config.reserved_rows);
    let router = build_router();

    // Lay out against the real size before the first frame
    let size = terminal.size().context("Failed to read terminal size")?;
    app.resize(size.width, size.height);
    app.greet();

    tracing::info!(
        max_lines = config.max_lines,
        width = size.width,
        height = size.height,
        "TUI started"
    );

    // Run the event loop
    let result = run_event_loop(&mut terminal, &mut app, &router, &mut event_rx).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    tracing::info!(lines = app.line_count(), "TUI stopped");
    result
}

/// Router with the built-in handlers plus commands that only make sense
/// in an interactive session
fn build_router() -> EventRouter {
    EventRouter::new().with_command("version", "Show the ccforge version", |app, _, _| {
        app.push_line(format!("ccforge {}", VERSION));
        Flow::Continue
    })
}

/// Main event loop
///
/// This loop waits on three sources:
/// 1. Terminal input (keys, paste, resize, focus)
/// 2. Timer ticks (for periodic redraws)
/// 3. Events from background producers
///
/// tokio::select! wakes on whichever completes first.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    router: &EventRouter,
    event_rx: &mut mpsc::Receiver<AppEvent>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Terminal input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(terminal_event) => {
                            if let Some(app_event) = translate(terminal_event) {
                                dispatch(router, app, app_event);
                            }
                        }
                        Err(e) => tracing::warn!(error = %e, "Failed to read terminal event"),
                    }
                }
            } => {}

            // Periodic tick for redrawing
            _ = tick_interval.tick() => {}

            // Background producers
            Some(app_event) = event_rx.recv() => {
                dispatch(router, app, app_event);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Apply one event; input-shape errors are logged, never fatal
fn dispatch(router: &EventRouter, app: &mut App, event: AppEvent) {
    if let Err(e) = router.handle(app, event) {
        tracing::warn!(error = %e, "Event rejected");
    }
}

/// Map a crossterm event onto the core's event type
fn translate(event: Event) -> Option<AppEvent> {
    match event {
        Event::Key(key) => Some(AppEvent::Keyboard(key)),
        Event::Paste(text) => Some(AppEvent::Paste(text)),
        Event::Resize(width, height) => Some(AppEvent::Resize { width, height }),
        Event::FocusGained => Some(AppEvent::Focus(true)),
        Event::FocusLost => Some(AppEvent::Focus(false)),
        Event::Mouse(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_translate_terminal_events() {
        let key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(translate(Event::Key(key)), Some(AppEvent::Keyboard(key)));
        assert_eq!(
            translate(Event::Resize(100, 30)),
            Some(AppEvent::Resize {
                width: 100,
                height: 30
            })
        );
        assert_eq!(
            translate(Event::Paste("text".into())),
            Some(AppEvent::Paste("text".into()))
        );
        assert_eq!(translate(Event::FocusLost), Some(AppEvent::Focus(false)));
    }

    #[test]
    fn test_version_command_registered() {
        let router = build_router();
        let mut app = App::default();
        router
            .handle(&mut app, AppEvent::command("version", &[]))
            .unwrap();
        assert_eq!(
            app.transcript().last().map(str::to_string),
            Some(format!("ccforge {}", VERSION))
        );
    }
}
