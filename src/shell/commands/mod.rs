//! Built-in REPL commands.

mod mock;
mod session;
mod values;

use super::command::synopsis;
use super::{Command, CommandSet, ShellContext};
use crate::error::{CommandError, RegistryError, Result};
use crate::session::InteractiveTestSession;

/// Every built-in command, in no particular order.
#[must_use]
pub fn builtin_commands() -> Vec<Box<dyn Command>> {
    vec![
        Box::new(session::CreateTest),
        Box::new(session::UseTest),
        Box::new(session::ListTests),
        Box::new(session::SetTarget),
        Box::new(session::AddMethod),
        Box::new(session::AddCode),
        Box::new(session::AddAssertion),
        Box::new(session::AddRawAssertion),
        Box::new(session::Snapshot),
        Box::new(session::Report),
        Box::new(session::ShowTest),
        Box::new(session::Stats),
        Box::new(session::Export),
        Box::new(session::Reset),
        Box::new(mock::CreateMock),
        Box::new(mock::ExpectCall),
        Box::new(mock::Spy),
        Box::new(mock::RecordCall),
        Box::new(mock::VerifyCalls),
        Box::new(values::DeclareType),
        Box::new(values::Let),
    ]
}

impl CommandSet {
    /// Creates a set holding every built-in command.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut set = Self::new();
        for command in builtin_commands() {
            set.register(command);
        }
        set
    }
}

fn usage_error(command: &dyn Command) -> CommandError {
    CommandError::Usage {
        usage: synopsis(command),
    }
}

/// Fails with a usage error unless `args` is blank.
fn expect_no_args(command: &dyn Command, args: &str) -> Result<()> {
    if args.trim().is_empty() {
        Ok(())
    } else {
        Err(usage_error(command).into())
    }
}

/// Fails with a usage error when an expression argument is blank.
fn require_text<'a>(command: &dyn Command, args: &'a str) -> Result<&'a str> {
    let text = args.trim();
    if text.is_empty() {
        return Err(usage_error(command).into());
    }
    Ok(text)
}

/// Resolves an optional test-name argument to a session, defaulting to the
/// current test.
fn named_or_current<'a>(
    command: &dyn Command,
    ctx: &'a ShellContext,
    args: &str,
) -> Result<&'a InteractiveTestSession> {
    let words = super::args::split_words(args)?;
    match words.as_slice() {
        [] => Ok(ctx.tests().require_current_test()?),
        [name] => ctx.tests().get_test(name).ok_or_else(|| {
            RegistryError::UnknownTest {
                name: name.clone(),
            }
            .into()
        }),
        _ => Err(usage_error(command).into()),
    }
}
