// Event router
//
// Maps each event kind to a handler and applies one event at a time to the
// owning `App`. Handlers are registered in a table keyed by `EventKind`;
// the built-in set covers keyboard, paste, resize, process, error and
// command events. Kinds without a handler (focus changes, by default) are
// ignored so producers can introduce new kinds without breaking the core.
//
// Keyboard dispatch is layered:
//   1. Global keys (Ctrl+C, Ctrl+L, F1) pre-empt everything
//   2. Enter submits the input line
//   3. LineEditor gets the key (text editing, cursor motion)
//   4. ScrollState gets whatever the editor left (Up/Down/PageUp/PageDown)

use super::app::{App, CLEARED_MESSAGE};
use super::commands::{parse_command, CommandError, CommandTable};
use super::traits::Interactive;
use crate::events::{AppEvent, EventKind};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::collections::HashMap;
use std::fmt;

/// Submitted lines starting with this prefix are run as commands
pub const COMMAND_PREFIX: char = '/';

/// What the caller should do after an event has been applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Input-shape errors reported back to the caller. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// A command request arrived with no command name
    EmptyCommand,
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCommand => write!(f, "No command entered"),
        }
    }
}

impl std::error::Error for RouteError {}

/// Signature of an event handler
pub type EventHandler = Box<dyn Fn(&mut App, &CommandTable, AppEvent) -> Result<Flow, RouteError>>;

/// Dispatches events to the handler registered for their kind
pub struct EventRouter {
    handlers: HashMap<EventKind, EventHandler>,
    commands: CommandTable,
}

impl EventRouter {
    /// Router with the built-in handlers and built-in commands
    pub fn new() -> Self {
        Self::empty()
            .with_handler(EventKind::Keyboard, handle_keyboard)
            .with_handler(EventKind::Paste, handle_paste)
            .with_handler(EventKind::Resize, handle_resize)
            .with_handler(EventKind::Process, handle_process)
            .with_handler(EventKind::ErrorReport, handle_error_report)
            .with_handler(EventKind::Command, handle_command)
    }

    /// Router with no event handlers; commands still include the built-ins
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
            commands: CommandTable::new(),
        }
    }

    /// Register a handler for `kind`, replacing any existing one
    pub fn with_handler<F>(mut self, kind: EventKind, handler: F) -> Self
    where
        F: Fn(&mut App, &CommandTable, AppEvent) -> Result<Flow, RouteError> + 'static,
    {
        self.register_handler(kind, handler);
        self
    }

    pub fn register_handler<F>(&mut self, kind: EventKind, handler: F)
    where
        F: Fn(&mut App, &CommandTable, AppEvent) -> Result<Flow, RouteError> + 'static,
    {
        self.handlers.insert(kind, Box::new(handler));
    }

    /// Register a command alongside the built-ins
    pub fn with_command<F>(mut self, name: &str, description: &str, handler: F) -> Self
    where
        F: Fn(&mut App, &[String], &CommandTable) -> Flow + 'static,
    {
        self.commands.register(name, description, handler);
        self
    }

    #[cfg(test)]
    pub fn commands(&self) -> &CommandTable {
        &self.commands
    }

    /// Apply one event to `app`
    pub fn handle(&self, app: &mut App, event: AppEvent) -> Result<Flow, RouteError> {
        let kind = event.kind();
        let Some(handler) = self.handlers.get(&kind) else {
            tracing::trace!(?kind, "No handler registered, ignoring event");
            return Ok(Flow::Continue);
        };

        let flow = handler(app, &self.commands, event)?;
        if flow == Flow::Quit {
            app.should_quit = true;
        }
        Ok(flow)
    }
}

impl Default for EventRouter {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Built-in handlers
// ─────────────────────────────────────────────────────────────────────────────

fn handle_keyboard(
    app: &mut App,
    commands: &CommandTable,
    event: AppEvent,
) -> Result<Flow, RouteError> {
    let AppEvent::Keyboard(key) = event else {
        return Ok(Flow::Continue);
    };
    handle_key(app, commands, key)
}

fn handle_key(app: &mut App, commands: &CommandTable, key: KeyEvent) -> Result<Flow, RouteError> {
    if key.kind == KeyEventKind::Release {
        return Ok(Flow::Continue);
    }

    // Layer 1: global keys
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => return Ok(Flow::Quit),
        KeyCode::Char('l') if ctrl => {
            app.clear();
            app.push_line(CLEARED_MESSAGE);
            return Ok(Flow::Continue);
        }
        KeyCode::F(1) => {
            app.status_bar.toggle_help();
            return Ok(Flow::Continue);
        }
        KeyCode::Enter => return submit(app, commands),
        _ => {}
    }

    // Layer 2: editor, then scroller
    if app.editor_mut().handle_key(key).was_handled() {
        return Ok(Flow::Continue);
    }
    app.scroll_mut().handle_key(key);
    Ok(Flow::Continue)
}

/// Enter: echo the input line, and run it as a command if it starts with '/'
fn submit(app: &mut App, commands: &CommandTable) -> Result<Flow, RouteError> {
    let Some(text) = app.submit_input() else {
        return Ok(Flow::Continue);
    };

    match text.strip_prefix(COMMAND_PREFIX) {
        Some(rest) => {
            let (name, args) = parse_command(rest);
            run_command(app, commands, &name, &args)
        }
        None => {
            tracing::debug!(chars = text.chars().count(), "Input submitted");
            Ok(Flow::Continue)
        }
    }
}

fn handle_paste(app: &mut App, _: &CommandTable, event: AppEvent) -> Result<Flow, RouteError> {
    if let AppEvent::Paste(text) = event {
        // Single-line editor: newlines become spaces
        app.editor_mut().insert(&text.replace(['\r', '\n'], " "));
    }
    Ok(Flow::Continue)
}

fn handle_resize(app: &mut App, _: &CommandTable, event: AppEvent) -> Result<Flow, RouteError> {
    if let AppEvent::Resize { width, height } = event {
        tracing::debug!(width, height, "Terminal resized");
        app.resize(width, height);
    }
    Ok(Flow::Continue)
}

fn handle_process(app: &mut App, _: &CommandTable, event: AppEvent) -> Result<Flow, RouteError> {
    if let AppEvent::Process(status) = event {
        app.push_lines(status.transcript_lines());
        if let Some(text) = status.status_text() {
            app.status_bar.set_status(text);
        }
    }
    Ok(Flow::Continue)
}

fn handle_error_report(
    app: &mut App,
    _: &CommandTable,
    event: AppEvent,
) -> Result<Flow, RouteError> {
    if let AppEvent::ErrorReport { context, message } = event {
        tracing::warn!(%context, %message, "Error reported");
        app.report_error(&context, &message);
    }
    Ok(Flow::Continue)
}

fn handle_command(
    app: &mut App,
    commands: &CommandTable,
    event: AppEvent,
) -> Result<Flow, RouteError> {
    let AppEvent::Command { name, args } = event else {
        return Ok(Flow::Continue);
    };
    run_command(app, commands, &name, &args)
}

/// Resolve and run a command. Unknown names get one advisory line.
fn run_command(
    app: &mut App,
    commands: &CommandTable,
    name: &str,
    args: &[String],
) -> Result<Flow, RouteError> {
    match commands.dispatch(app, name, args) {
        Ok(flow) => Ok(flow),
        Err(CommandError::Empty) => Err(RouteError::EmptyCommand),
        Err(CommandError::Unknown(name)) => {
            app.push_line(format!(
                "Unknown command: {} (type {}help for a list)",
                name, COMMAND_PREFIX
            ));
            Ok(Flow::Continue)
        }
    }
}
