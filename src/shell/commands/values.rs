//! Commands that feed the type catalog and the variable bindings.

use super::usage_error;
use crate::error::Result;
use crate::host::render_literal;
use crate::shell::args::{assignment, split_words};
use crate::shell::{Command, ShellContext};

pub(super) struct DeclareType;

impl Command for DeclareType {
    fn name(&self) -> &'static str {
        "type:declare"
    }

    fn summary(&self) -> &'static str {
        "Make class or interface names available for mocking"
    }

    fn usage(&self) -> &'static str {
        "<Name> [Name ...]"
    }

    fn execute(&self, ctx: &mut ShellContext, args: &str) -> Result<String> {
        let names = split_words(args)?;
        if names.is_empty() {
            return Err(usage_error(self).into());
        }
        let lines: Vec<String> = names
            .iter()
            .map(|name| {
                if ctx.types_mut().declare(name) {
                    format!("Declared {name}")
                } else {
                    format!("{name} is already known")
                }
            })
            .collect();
        Ok(lines.join("\n"))
    }
}

pub(super) struct Let;

impl Command for Let {
    fn name(&self) -> &'static str {
        "let"
    }

    fn summary(&self) -> &'static str {
        "Evaluate an expression and bind it to a variable"
    }

    fn usage(&self) -> &'static str {
        "<$name> = <expression>"
    }

    fn execute(&self, ctx: &mut ShellContext, args: &str) -> Result<String> {
        let (name, expression) = assignment(args).ok_or_else(|| usage_error(self))?;
        let value = ctx.evaluator().evaluate(expression, ctx.bindings())?;
        let rendered = render_literal(&value);
        ctx.bind(name, value);
        Ok(format!("${name} = {rendered}"))
    }
}
