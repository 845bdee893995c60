//! The REPL command layer.
//!
//! A [`ShellContext`] owns the registries and collaborators for one run. A
//! [`CommandSet`] maps the first word of each input line to a [`Command`]
//! and hands it the rest of the line. Commands that take an expression
//! receive it verbatim; the others split their arguments like a shell would.

mod args;
mod command;
mod commands;
mod context;


pub use command::{Command, CommandSet, DetailedHelp, Dispatch};
pub use commands::builtin_commands;
pub use context::ShellContext;
