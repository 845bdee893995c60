//! Commands that declare mocks and check recorded calls.

use super::{require_text, usage_error};
use crate::error::{MockError, Result};
use crate::expression::split_top_level;
use crate::mock::{CallPredicate, SpyActivation};
use crate::shell::args::{leading_words, split_words};
use crate::shell::{Command, DetailedHelp, ShellContext};

const PARTIAL_FLAG: &str = "--partial";

pub(super) struct CreateMock;

impl Command for CreateMock {
    fn name(&self) -> &'static str {
        "mock:create"
    }

    fn summary(&self) -> &'static str {
        "Declare a mock of a known type"
    }

    fn usage(&self) -> &'static str {
        "<$variable> <Class> [--partial] [method ...]"
    }

    fn execute(&self, ctx: &mut ShellContext, args: &str) -> Result<String> {
        let words = split_words(args)?;
        let [variable, class, rest @ ..] = words.as_slice() else {
            return Err(usage_error(self).into());
        };
        let partial = rest.iter().any(|word| word == PARTIAL_FLAG);
        let methods: Vec<&str> = rest
            .iter()
            .map(String::as_str)
            .filter(|word| *word != PARTIAL_FLAG)
            .collect();
        if partial && methods.is_empty() {
            return Err(usage_error(self).into());
        }

        let (mocks, types) = ctx.mocks_with_types();
        let mock = mocks.declare_mock(variable, class, methods, partial, types)?;
        let kind = if mock.is_partial() { "Partial mock" } else { "Mock" };
        Ok(format!(
            "{kind} {} of {} declared",
            mock.variable(),
            mock.target_class()
        ))
    }
}

pub(super) struct ExpectCall;

impl Command for ExpectCall {
    fn name(&self) -> &'static str {
        "mock:expect"
    }

    fn summary(&self) -> &'static str {
        "Configure a mocked method's argument matcher and return value"
    }

    fn usage(&self) -> &'static str {
        "<$variable> <method> [with <matcher>] [returns <value>]"
    }

    fn execute(&self, ctx: &mut ShellContext, args: &str) -> Result<String> {
        let Some((words, rest)) = leading_words(args, 2) else {
            return Err(usage_error(self).into());
        };
        let [variable, method] = words.as_slice() else {
            return Err(usage_error(self).into());
        };
        let (matcher, returns) = expectation_clauses(rest).ok_or_else(|| usage_error(self))?;

        ctx.mocks_mut()
            .record_expectation(variable, method, matcher, returns)?;
        let line = ctx
            .mocks()
            .get(variable)
            .and_then(|mock| mock.setup_lines().pop())
            .unwrap_or_default();
        Ok(line)
    }

    fn detailed_help(&self) -> Option<&dyn DetailedHelp> {
        Some(self)
    }
}

impl DetailedHelp for ExpectCall {
    fn help_text(&self) -> String {
        String::from(
            "Both clauses are optional and take the rest of the line as code:\n\
             \x20 mock:expect $mailer send returns true\n\
             \x20 mock:expect $mailer send with $this->equalTo('hi') returns true\n\
             Without `with` any arguments match; without `returns` the method\n\
             returns its type's default.",
        )
    }
}

/// Splits `[with <matcher>] [returns <value>]` into its two parts.
fn expectation_clauses(rest: &str) -> Option<(&str, &str)> {
    if rest.is_empty() {
        return Some(("", ""));
    }
    if let Some(value) = rest.strip_prefix("returns ") {
        let returns = value.trim();
        return (!returns.is_empty()).then_some(("", returns));
    }
    let clause = rest.strip_prefix("with ")?;
    let (matcher, returns) = clause.split_once(" returns ").unwrap_or((clause, ""));
    let matcher_text = matcher.trim();
    (!matcher_text.is_empty()).then_some((matcher_text, returns.trim()))
}

pub(super) struct Spy;

impl Command for Spy {
    fn name(&self) -> &'static str {
        "mock:spy"
    }

    fn summary(&self) -> &'static str {
        "Start recording calls made on a mock"
    }

    fn usage(&self) -> &'static str {
        "<$variable>"
    }

    fn execute(&self, ctx: &mut ShellContext, args: &str) -> Result<String> {
        let words = split_words(args)?;
        let [variable] = words.as_slice() else {
            return Err(usage_error(self).into());
        };
        let message = match ctx.mocks_mut().enable_spy(variable)? {
            SpyActivation::Enabled => "Spying on",
            SpyActivation::AlreadyEnabled => "Already spying on",
        };
        Ok(format!("{message} {}", display_variable(variable)))
    }
}

pub(super) struct RecordCall;

impl Command for RecordCall {
    fn name(&self) -> &'static str {
        "mock:call"
    }

    fn summary(&self) -> &'static str {
        "Record a call on a spying mock"
    }

    fn usage(&self) -> &'static str {
        "<$variable> <method> [argument, ...]"
    }

    fn execute(&self, ctx: &mut ShellContext, args: &str) -> Result<String> {
        let Some((words, rest)) = leading_words(args, 2) else {
            return Err(usage_error(self).into());
        };
        let [variable, method] = words.as_slice() else {
            return Err(usage_error(self).into());
        };
        let arguments: Vec<&str> = split_top_level(rest, ",")
            .into_iter()
            .map(str::trim)
            .filter(|argument| !argument.is_empty())
            .collect();
        let shown = display_variable(variable);

        if ctx.mocks().get(variable).is_none() {
            return Err(MockError::UnknownMock { variable: shown }.into());
        }
        let call = format!("{shown}->{method}({})", arguments.join(", "));
        if ctx.mocks_mut().record_call(variable, method, arguments) {
            Ok(format!("Recorded {call}"))
        } else {
            Ok(format!("Ignored {call}: not spying (use mock:spy)"))
        }
    }
}

pub(super) struct VerifyCalls;

impl Command for VerifyCalls {
    fn name(&self) -> &'static str {
        "mock:verify"
    }

    fn summary(&self) -> &'static str {
        "Check recorded calls against a call-count predicate"
    }

    fn usage(&self) -> &'static str {
        "<$variable> <method> <predicate>"
    }

    fn execute(&self, ctx: &mut ShellContext, args: &str) -> Result<String> {
        let Some((words, rest)) = leading_words(args, 2) else {
            return Err(usage_error(self).into());
        };
        let [variable, method] = words.as_slice() else {
            return Err(usage_error(self).into());
        };
        let predicate: CallPredicate = require_text(self, rest)?.parse()?;
        let verification = ctx.mocks().verify(variable, method, predicate);
        let status = if verification.success { "PASS" } else { "FAIL" };
        Ok(format!("{status}: {}", verification.details))
    }

    fn detailed_help(&self) -> Option<&dyn DetailedHelp> {
        Some(self)
    }
}

impl DetailedHelp for VerifyCalls {
    fn help_text(&self) -> String {
        String::from(
            "Predicates:\n\
             \x20 calledTimes(n)       exactly n calls\n\
             \x20 calledAtLeastOnce    one or more calls\n\
             \x20 neverCalled          no calls\n\
             Only calls recorded after mock:spy count.",
        )
    }
}

fn display_variable(variable: &str) -> String {
    if variable.starts_with('$') {
        String::from(variable)
    } else {
        format!("${variable}")
    }
}
