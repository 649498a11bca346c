// Command table
//
// Maps command names to handlers. Built-ins (clear, help, exit, task,
// maxlines) are registered on construction; callers can register more at
// any time.
// Lookup never fails the session: the caller decides what to do with an
// empty or unknown name.

use super::app::{App, CLEARED_MESSAGE};
use super::router::Flow;
use std::collections::HashMap;
use std::fmt;

/// Signature of a command handler: app state, arguments, and the table
/// itself (so commands like `help` can list their siblings)
pub type CommandHandler = Box<dyn Fn(&mut App, &[String], &CommandTable) -> Flow>;

/// Why a command name could not be resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// No command name was given
    Empty,
    /// No handler is registered under this name
    Unknown(String),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "No command entered"),
            Self::Unknown(name) => write!(f, "Unknown command: {}", name),
        }
    }
}

impl std::error::Error for CommandError {}

struct Command {
    description: String,
    handler: CommandHandler,
}

/// Registered commands, keyed by name
pub struct CommandTable {
    commands: HashMap<String, Command>,
}

impl CommandTable {
    /// Table with the built-in commands registered
    pub fn new() -> Self {
        let mut table = Self::empty();
        table.register_builtins();
        table
    }

    /// Table with nothing registered
    pub fn empty() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Register (or replace) a command
    pub fn register<F>(&mut self, name: &str, description: &str, handler: F)
    where
        F: Fn(&mut App, &[String], &CommandTable) -> Flow + 'static,
    {
        self.commands.insert(
            name.to_string(),
            Command {
                description: description.to_string(),
                handler: Box::new(handler),
            },
        );
    }

    #[cfg(test)]
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// (name, description) pairs sorted by name
    pub fn entries(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<_> = self
            .commands
            .iter()
            .map(|(name, cmd)| (name.as_str(), cmd.description.as_str()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Run the handler registered under `name`
    pub fn dispatch(&self, app: &mut App, name: &str, args: &[String]) -> Result<Flow, CommandError> {
        if name.is_empty() {
            return Err(CommandError::Empty);
        }
        let command = self
            .commands
            .get(name)
            .ok_or_else(|| CommandError::Unknown(name.to_string()))?;

        tracing::debug!(command = name, args = ?args, "Dispatching command");
        Ok((command.handler)(app, args, self))
    }

    fn register_builtins(&mut self) {
        self.register("clear", "Clear the screen", |app, _, _| {
            app.clear();
            app.push_line(CLEARED_MESSAGE);
            Flow::Continue
        });

        self.register("help", "Show this list", |app, _, table| {
            app.push_line("Available commands:");
            for (name, description) in table.entries() {
                app.push_line(format!("  /{:<8} {}", name, description));
            }
            Flow::Continue
        });

        self.register("exit", "Quit the application", |_, _, _| Flow::Quit);

        self.register("task", "Switch task, or show the current one", |app, args, _| {
            match args.first() {
                Some(task) => {
                    app.status_bar.set_active_task(task.as_str());
                    app.push_line(format!("Switched to task '{}'", task));
                }
                None => {
                    let current = app.status_bar.active_task().unwrap_or("default").to_string();
                    app.push_line(format!("Current task: {}", current));
                }
            }
            Flow::Continue
        });

        self.register("maxlines", "Set the transcript line limit (0 = none)", |app, args, _| {
            let Some(arg) = args.first() else {
                app.push_line(match app.max_lines() {
                    0 => "Line limit: none".to_string(),
                    n => format!("Line limit: {}", n),
                });
                return Flow::Continue;
            };
            match arg.parse::<usize>() {
                Ok(max_lines) => {
                    app.set_max_lines(max_lines);
                    tracing::debug!(max_lines, "Transcript bound changed");
                    app.push_line(match max_lines {
                        0 => "Line limit removed".to_string(),
                        n => format!("Line limit set to {}", n),
                    });
                }
                Err(_) => app.push_line(format!(
                    "Invalid line limit: {} (expected a number, 0 for none)",
                    arg
                )),
            }
            Flow::Continue
        });
    }
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Split an input line into a command name and whitespace-separated arguments.
///
/// Blank input yields an empty name, which `dispatch` rejects.
pub fn parse_command(input: &str) -> (String, Vec<String>) {
    let mut parts = input.split_whitespace();
    let name = parts.next().unwrap_or_default().to_string();
    let args = parts.map(str::to_string).collect();
    (name, args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_builtins_resolve() {
        let table = CommandTable::new();
        let mut app = App::default();
        for name in ["clear", "help", "maxlines", "task"] {
            assert_eq!(table.dispatch(&mut app, name, &[]), Ok(Flow::Continue));
        }
        assert_eq!(table.dispatch(&mut app, "exit", &[]), Ok(Flow::Quit));
    }

    #[test]
    fn test_empty_and_unknown_names() {
        let table = CommandTable::new();
        let mut app = App::default();
        assert_eq!(table.dispatch(&mut app, "", &[]), Err(CommandError::Empty));
        assert_eq!(
            table.dispatch(&mut app, "bogus", &[]),
            Err(CommandError::Unknown("bogus".into()))
        );
        assert_eq!(app.line_count(), 0);
    }

    #[test]
    fn test_register_custom_command() {
        let mut table = CommandTable::new();
        let called = Rc::new(Cell::new(false));
        let flag = called.clone();
        table.register("custom", "A custom command", move |_, _, _| {
            flag.set(true);
            Flow::Continue
        });

        let mut app = App::default();
        assert_eq!(table.dispatch(&mut app, "custom", &[]), Ok(Flow::Continue));
        assert!(called.get());
    }

    #[test]
    fn test_help_lists_every_command_sorted() {
        let mut table = CommandTable::new();
        table.register("about", "Version info", |_, _, _| Flow::Continue);
        let mut app = App::default();
        table.dispatch(&mut app, "help", &[]).unwrap();

        let lines: Vec<_> = app.transcript().iter().collect();
        assert_eq!(lines[0], "Available commands:");
        assert_eq!(lines.len(), 7);
        assert!(lines[1].starts_with("  /about"));
        assert!(lines[5].starts_with("  /maxlines"));
        assert!(lines[6].starts_with("  /task"));
    }

    #[test]
    fn test_task_switches_and_reports() {
        let table = CommandTable::new();
        let mut app = App::default();

        table.dispatch(&mut app, "task", &[]).unwrap();
        assert_eq!(app.transcript().last(), Some("Current task: default"));

        table.dispatch(&mut app, "task", &args(&["new-task"])).unwrap();
        assert_eq!(app.transcript().last(), Some("Switched to task 'new-task'"));
        assert_eq!(app.status_bar.active_task(), Some("new-task"));

        table.dispatch(&mut app, "task", &[]).unwrap();
        assert_eq!(app.transcript().last(), Some("Current task: new-task"));
    }

    #[test]
    fn test_clear_command_leaves_one_line() {
        let table = CommandTable::new();
        let mut app = App::default();
        app.push_lines(["a", "b", "c"]);
        table.dispatch(&mut app, "clear", &[]).unwrap();
        assert_eq!(app.line_count(), 1);
        assert_eq!(app.transcript().last(), Some(CLEARED_MESSAGE));
    }

    #[test]
    fn test_maxlines_trims_and_reports() {
        let table = CommandTable::new();
        let mut app = App::default();
        for i in 0..20 {
            app.push_line(format!("Line {}", i));
        }

        table.dispatch(&mut app, "maxlines", &[]).unwrap();
        assert_eq!(app.transcript().last(), Some("Line limit: 1000"));

        table.dispatch(&mut app, "maxlines", &args(&["5"])).unwrap();
        assert_eq!(app.max_lines(), 5);
        assert_eq!(app.line_count(), 5);
        assert_eq!(app.transcript().get(0), Some("Line 17"));
        assert_eq!(app.transcript().last(), Some("Line limit set to 5"));
        assert!(app.is_truncated());

        table.dispatch(&mut app, "maxlines", &args(&["0"])).unwrap();
        assert_eq!(app.max_lines(), 0);
        assert_eq!(app.transcript().last(), Some("Line limit removed"));
    }

    #[test]
    fn test_maxlines_rejects_bad_value() {
        let table = CommandTable::new();
        let mut app = App::new(50, 3);
        table.dispatch(&mut app, "maxlines", &args(&["lots"])).unwrap();
        assert_eq!(app.max_lines(), 50);
        assert_eq!(
            app.transcript().last(),
            Some("Invalid line limit: lots (expected a number, 0 for none)")
        );
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("help"), ("help".to_string(), vec![]));
        assert_eq!(
            parse_command("  task   new-task  extra "),
            ("task".to_string(), args(&["new-task", "extra"]))
        );
        assert_eq!(parse_command("   "), (String::new(), vec![]));
        assert_eq!(parse_command(""), (String::new(), vec![]));
    }
}
