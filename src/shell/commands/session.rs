//! Commands that build and inspect test sessions.

use tracing::debug;

use super::{expect_no_args, named_or_current, require_text, usage_error};
use crate::diagnostics::{failure_report, snapshot_assertion};
use crate::error::Result;
use crate::export::{export_session, render_test_class};
use crate::expression::expression_to_statement;
use crate::host::render_literal;
use crate::shell::args::{assignment, is_identifier, split_words};
use crate::shell::{Command, DetailedHelp, ShellContext};

pub(super) struct CreateTest;

impl Command for CreateTest {
    fn name(&self) -> &'static str {
        "test:create"
    }

    fn summary(&self) -> &'static str {
        "Create a test (replacing one of the same name) and make it current"
    }

    fn usage(&self) -> &'static str {
        "<Name> [TargetClass]"
    }

    fn execute(&self, ctx: &mut ShellContext, args: &str) -> Result<String> {
        let words = split_words(args)?;
        let (name, target) = match words.as_slice() {
            [name] => (name, None),
            [name, target] => (name, Some(target.as_str())),
            _ => return Err(usage_error(self).into()),
        };
        if !is_identifier(name) {
            return Err(usage_error(self).into());
        }
        let session = ctx.tests_mut().create_test(name, target);
        Ok(format!(
            "Created {} targeting {}",
            session.name(),
            session.target_class()
        ))
    }
}

pub(super) struct UseTest;

impl Command for UseTest {
    fn name(&self) -> &'static str {
        "test:use"
    }

    fn summary(&self) -> &'static str {
        "Switch to an existing test"
    }

    fn usage(&self) -> &'static str {
        "<Name>"
    }

    fn execute(&self, ctx: &mut ShellContext, args: &str) -> Result<String> {
        let words = split_words(args)?;
        let [name] = words.as_slice() else {
            return Err(usage_error(self).into());
        };
        ctx.tests_mut().set_current_test(name)?;
        Ok(format!("Now editing {name}"))
    }
}

pub(super) struct ListTests;

impl Command for ListTests {
    fn name(&self) -> &'static str {
        "test:list"
    }

    fn summary(&self) -> &'static str {
        "List tests in creation order; * marks the current one"
    }

    fn usage(&self) -> &'static str {
        ""
    }

    fn execute(&self, ctx: &mut ShellContext, args: &str) -> Result<String> {
        expect_no_args(self, args)?;
        let tests = ctx.tests();
        if tests.is_empty() {
            return Ok(String::from("No tests yet"));
        }
        let current = tests.current_test().map(|session| session.name());
        let lines: Vec<String> = tests
            .list_tests()
            .map(|session| {
                let marker = if current == Some(session.name()) { '*' } else { ' ' };
                let stats = session.stats();
                format!(
                    "{marker} {} ({}): {} methods, {} assertions",
                    session.name(),
                    session.target_class(),
                    stats.methods,
                    stats.assertions
                )
            })
            .collect();
        Ok(lines.join("\n"))
    }
}

pub(super) struct SetTarget;

impl Command for SetTarget {
    fn name(&self) -> &'static str {
        "test:target"
    }

    fn summary(&self) -> &'static str {
        "Change the class under test"
    }

    fn usage(&self) -> &'static str {
        "<Class>"
    }

    fn execute(&self, ctx: &mut ShellContext, args: &str) -> Result<String> {
        let words = split_words(args)?;
        let [class] = words.as_slice() else {
            return Err(usage_error(self).into());
        };
        let session = ctx.tests_mut().require_current_test_mut()?;
        session.set_target_class(class.as_str());
        Ok(format!("{} now targets {class}", session.name()))
    }
}

pub(super) struct AddMethod;

impl Command for AddMethod {
    fn name(&self) -> &'static str {
        "test:method"
    }

    fn summary(&self) -> &'static str {
        "Add a test method, or return to an existing one"
    }

    fn usage(&self) -> &'static str {
        "<methodName>"
    }

    fn execute(&self, ctx: &mut ShellContext, args: &str) -> Result<String> {
        let words = split_words(args)?;
        let [method] = words.as_slice() else {
            return Err(usage_error(self).into());
        };
        if !is_identifier(method) {
            return Err(usage_error(self).into());
        }
        let session = ctx.tests_mut().require_current_test_mut()?;
        session.add_method(method);
        Ok(format!("Current method: {}::{method}", session.name()))
    }
}

pub(super) struct AddCode;

impl Command for AddCode {
    fn name(&self) -> &'static str {
        "test:code"
    }

    fn summary(&self) -> &'static str {
        "Append a line of code to the current method"
    }

    fn usage(&self) -> &'static str {
        "<code>"
    }

    fn execute(&self, ctx: &mut ShellContext, args: &str) -> Result<String> {
        let code = require_text(self, args)?;
        ctx.tests_mut()
            .require_current_test_mut()?
            .add_code_line(code)?;

        let Some((name, expression)) = assignment(code) else {
            return Ok(String::new());
        };
        match ctx.evaluator().evaluate(expression, ctx.bindings()) {
            Ok(value) => {
                let rendered = render_literal(&value);
                ctx.bind(name, value);
                Ok(format!("${name} = {rendered}"))
            }
            Err(error) => {
                debug!(variable = name, %error, "assignment not evaluated");
                Ok(String::new())
            }
        }
    }
}

pub(super) struct AddAssertion;

impl Command for AddAssertion {
    fn name(&self) -> &'static str {
        "test:assert"
    }

    fn summary(&self) -> &'static str {
        "Translate a boolean expression into an assertion"
    }

    fn usage(&self) -> &'static str {
        "<expression>"
    }

    fn execute(&self, ctx: &mut ShellContext, args: &str) -> Result<String> {
        let statement = expression_to_statement(args)?;
        let rendered = statement.render();
        ctx.tests_mut()
            .require_current_test_mut()?
            .add_statement(statement)?;
        Ok(rendered)
    }

    fn detailed_help(&self) -> Option<&dyn DetailedHelp> {
        Some(self)
    }
}

impl DetailedHelp for AddAssertion {
    fn help_text(&self) -> String {
        String::from(
            "Expressions are translated as follows:\n\
             \x20 $a === null          assertNull($a)\n\
             \x20 $a === $b            assertSame($b, $a)\n\
             \x20 $a == $b             assertEquals($b, $a)\n\
             \x20 $a != $b             assertNotEquals($b, $a)\n\
             \x20 $a >= 10             assertGreaterThanOrEqual(10, $a)\n\
             \x20 $a instanceof Foo    assertInstanceOf(Foo::class, $a)\n\
             \x20 is_array($a)         assertIsArray($a)\n\
             \x20 !$flag               assertFalse($flag)\n\
             \x20 anything else        assertTrue(expression)\n\
             Only the first top-level comparison is used; wrap compound\n\
             expressions in parentheses to assert them as a whole.",
        )
    }
}

pub(super) struct AddRawAssertion;

impl Command for AddRawAssertion {
    fn name(&self) -> &'static str {
        "test:assert-raw"
    }

    fn summary(&self) -> &'static str {
        "Append an assertion call verbatim, adding $this-> and ; if missing"
    }

    fn usage(&self) -> &'static str {
        "<assertion>"
    }

    fn execute(&self, ctx: &mut ShellContext, args: &str) -> Result<String> {
        let session = ctx.tests_mut().require_current_test_mut()?;
        session.add_assertion(args)?;
        Ok(session.assertions().pop().unwrap_or_default())
    }
}

pub(super) struct Snapshot;

impl Command for Snapshot {
    fn name(&self) -> &'static str {
        "test:snapshot"
    }

    fn summary(&self) -> &'static str {
        "Evaluate an expression and assert its current value"
    }

    fn usage(&self) -> &'static str {
        "<expression>"
    }

    fn execute(&self, ctx: &mut ShellContext, args: &str) -> Result<String> {
        ctx.tests().require_current_test()?;
        let statement = snapshot_assertion(args, ctx.evaluator(), ctx.bindings())?;
        let rendered = statement.render();
        ctx.tests_mut()
            .require_current_test_mut()?
            .add_statement(statement)?;
        Ok(rendered)
    }
}

pub(super) struct Report;

impl Command for Report {
    fn name(&self) -> &'static str {
        "test:report"
    }

    fn summary(&self) -> &'static str {
        "Show what each side of an expression's assertion evaluates to"
    }

    fn usage(&self) -> &'static str {
        "<expression>"
    }

    fn execute(&self, ctx: &mut ShellContext, args: &str) -> Result<String> {
        let statement = expression_to_statement(args)?;
        let report = failure_report(&statement, ctx.evaluator(), ctx.bindings())?;
        Ok(report.to_string())
    }
}

pub(super) struct ShowTest;

impl Command for ShowTest {
    fn name(&self) -> &'static str {
        "test:show"
    }

    fn summary(&self) -> &'static str {
        "Print the generated test class"
    }

    fn usage(&self) -> &'static str {
        "[Name]"
    }

    fn execute(&self, ctx: &mut ShellContext, args: &str) -> Result<String> {
        let session = named_or_current(self, ctx, args)?;
        let source = render_test_class(session, ctx.mocks(), ctx.export_options())?;
        Ok(String::from(source.trim_end()))
    }
}

pub(super) struct Stats;

impl Command for Stats {
    fn name(&self) -> &'static str {
        "test:stats"
    }

    fn summary(&self) -> &'static str {
        "Count methods, code lines and assertions"
    }

    fn usage(&self) -> &'static str {
        "[Name]"
    }

    fn execute(&self, ctx: &mut ShellContext, args: &str) -> Result<String> {
        let session = named_or_current(self, ctx, args)?;
        let stats = session.stats();
        Ok(format!(
            "{}: {} methods, {} code lines, {} assertions",
            session.name(),
            stats.methods,
            stats.code_lines,
            stats.assertions
        ))
    }
}

pub(super) struct Export;

impl Command for Export {
    fn name(&self) -> &'static str {
        "test:export"
    }

    fn summary(&self) -> &'static str {
        "Write the generated test class to the export directory"
    }

    fn usage(&self) -> &'static str {
        "[Name]"
    }

    fn execute(&self, ctx: &mut ShellContext, args: &str) -> Result<String> {
        let session = named_or_current(self, ctx, args)?;
        let path = export_session(session, ctx.mocks(), ctx.export_options(), ctx.sink())?;
        Ok(format!("Exported {} to {path}", session.name()))
    }
}

pub(super) struct Reset;

impl Command for Reset {
    fn name(&self) -> &'static str {
        "test:reset"
    }

    fn summary(&self) -> &'static str {
        "Discard every test, mock and variable"
    }

    fn usage(&self) -> &'static str {
        ""
    }

    fn execute(&self, ctx: &mut ShellContext, args: &str) -> Result<String> {
        expect_no_args(self, args)?;
        ctx.reset();
        Ok(String::from("Cleared all tests, mocks and variables"))
    }
}
