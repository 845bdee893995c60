//! The command seam and the dispatcher that routes REPL lines to commands.

use std::collections::BTreeMap;

use tracing::debug;

use super::ShellContext;
use crate::error::{CommandError, Result};

/// A REPL command.
pub trait Command {
    /// The name typed to invoke the command, such as `test:create`.
    fn name(&self) -> &'static str;

    /// One-line description shown by `help`.
    fn summary(&self) -> &'static str;

    /// Argument synopsis shown in usage errors and per-command help.
    fn usage(&self) -> &'static str;

    /// Runs the command with everything after its name.
    ///
    /// # Errors
    ///
    /// Returns an error when the arguments are unusable or the underlying
    /// operation fails. The context is left unchanged in that case.
    fn execute(&self, ctx: &mut ShellContext, args: &str) -> Result<String>;

    /// Longer help text, for commands that offer it.
    fn detailed_help(&self) -> Option<&dyn DetailedHelp> {
        None
    }
}

/// Extended help a command may provide in addition to its summary.
pub trait DetailedHelp {
    /// Multi-line help text.
    fn help_text(&self) -> String;
}

/// What the shell should do after a line was dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Print the output (which may be empty) and read the next line.
    Output(String),
    /// Stop reading input.
    Exit,
}

/// Registered commands keyed by name.
#[derive(Default)]
pub struct CommandSet {
    commands: BTreeMap<&'static str, Box<dyn Command>>,
}

impl CommandSet {
    /// Creates an empty set. Only `help`, `exit` and `quit` are available.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            commands: BTreeMap::new(),
        }
    }

    /// Registers a command, returning the one it replaced.
    pub fn register(&mut self, command: Box<dyn Command>) -> Option<Box<dyn Command>> {
        self.commands.insert(command.name(), command)
    }

    /// Looks a command up by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.commands.get(name).map(|command| command.as_ref())
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.keys().copied()
    }

    /// Runs one input line.
    ///
    /// Blank lines and `#` comments produce empty output. `help [name]`,
    /// `exit` and `quit` are handled here; everything else goes to the
    /// command named by the first word.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::UnknownCommand`] for unregistered names and
    /// passes command failures through.
    pub fn dispatch(&self, ctx: &mut ShellContext, line: &str) -> Result<Dispatch> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(Dispatch::Output(String::new()));
        }

        let (name, args) = trimmed
            .split_once(char::is_whitespace)
            .map_or((trimmed, ""), |(name, rest)| (name, rest.trim_start()));

        match name {
            "exit" | "quit" => Ok(Dispatch::Exit),
            "help" => self.help(args.trim()).map(Dispatch::Output),
            _ => {
                let command = self.get(name).ok_or_else(|| CommandError::UnknownCommand {
                    name: String::from(name),
                })?;
                debug!(command = name, "dispatching");
                command.execute(ctx, args).map(Dispatch::Output)
            }
        }
    }

    /// Lists every command, or describes one in detail.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::UnknownCommand`] when `topic` names no
    /// command.
    pub fn help(&self, topic: &str) -> Result<String> {
        if topic.is_empty() {
            return Ok(self.overview());
        }

        let command = self.get(topic).ok_or_else(|| CommandError::UnknownCommand {
            name: String::from(topic),
        })?;
        let mut text = format!("{}\n  {}", synopsis(command), command.summary());
        if let Some(detail) = command.detailed_help() {
            text.push_str("\n\n");
            text.push_str(detail.help_text().trim_end());
        }
        Ok(text)
    }

    fn overview(&self) -> String {
        let width = self
            .commands
            .keys()
            .map(|name| name.len())
            .chain(["help".len()])
            .max()
            .unwrap_or_default();
        let mut text = String::from("Commands:");
        for command in self.commands.values() {
            text.push_str(&format!(
                "\n  {:<width$}  {}",
                command.name(),
                command.summary()
            ));
        }
        text.push_str(&format!(
            "\n  {:<width$}  Show this list or help for one command",
            "help"
        ));
        text.push_str(&format!("\n  {:<width$}  Leave the shell", "exit"));
        text
    }
}

/// The command name followed by its usage, if it takes arguments.
pub(super) fn synopsis(command: &dyn Command) -> String {
    let usage = command.usage();
    if usage.is_empty() {
        String::from(command.name())
    } else {
        format!("{} {usage}", command.name())
    }
}

impl std::fmt::Debug for CommandSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.commands.keys()).finish()
    }
}
