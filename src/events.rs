// Events that flow into the TUI core
//
// Every input the core reacts to is one variant of `AppEvent`: keystrokes
// and pastes from the terminal, resize notices, status reports from the
// wrapped process, upstream errors, and command requests. Producers (the
// terminal reader, the demo task, a process supervisor) translate whatever
// they observe into these events and the router applies them one at a time.

use crossterm::event::KeyEvent;

/// Main event type consumed by the router
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// A key was pressed (or released; releases are ignored)
    Keyboard(KeyEvent),

    /// Text pasted into the terminal in one piece
    Paste(String),

    /// The terminal was resized
    Resize { width: u16, height: u16 },

    /// Lifecycle or output of the wrapped process
    Process(ProcessStatus),

    /// An error raised by a collaborator outside the core
    ErrorReport { context: String, message: String },

    /// A named command with arguments
    Command { name: String, args: Vec<String> },

    /// Terminal focus gained (true) or lost (false)
    Focus(bool),
}

/// Status report from the wrapped process
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessStatus {
    Started { pid: u32 },
    Output { text: String },
    Stopped { pid: u32 },
    Error { pid: u32, error: String },
}

/// Discriminant of `AppEvent`, used as the router's handler-table key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Keyboard,
    Paste,
    Resize,
    Process,
    ErrorReport,
    Command,
    Focus,
}

impl AppEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            AppEvent::Keyboard(_) => EventKind::Keyboard,
            AppEvent::Paste(_) => EventKind::Paste,
            AppEvent::Resize { .. } => EventKind::Resize,
            AppEvent::Process(_) => EventKind::Process,
            AppEvent::ErrorReport { .. } => EventKind::ErrorReport,
            AppEvent::Command { .. } => EventKind::Command,
            AppEvent::Focus(_) => EventKind::Focus,
        }
    }

    /// Build a command request
    pub fn command(name: impl Into<String>, args: &[&str]) -> Self {
        AppEvent::Command {
            name: name.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Build an error report
    pub fn error(context: impl Into<String>, message: impl Into<String>) -> Self {
        AppEvent::ErrorReport {
            context: context.into(),
            message: message.into(),
        }
    }
}

impl ProcessStatus {
    /// Transcript rows for this status. Output text is split into one row per line.
    pub fn transcript_lines(&self) -> Vec<String> {
        match self {
            ProcessStatus::Started { pid } => vec![format!("Process started (PID: {})", pid)],
            ProcessStatus::Output { text } => {
                let text = text.strip_suffix('\n').unwrap_or(text);
                text.split('\n')
                    .map(|line| line.trim_end_matches('\r').to_string())
                    .collect()
            }
            ProcessStatus::Stopped { pid } => vec![format!("Process stopped (PID: {})", pid)],
            ProcessStatus::Error { pid, error } => {
                vec![format!("Process error (PID: {}): {}", pid, error)]
            }
        }
    }

    /// Status-bar text this report sets, if any
    pub fn status_text(&self) -> Option<String> {
        match self {
            ProcessStatus::Started { pid } => Some(format!("Running (PID: {})", pid)),
            ProcessStatus::Output { .. } => None,
            ProcessStatus::Stopped { .. } => Some("Idle".to_string()),
            ProcessStatus::Error { .. } => Some("Error".to_string()),
        }
    }
}
