//! Rendering sessions as test-class source files.


use camino::Utf8PathBuf;
use tracing::debug;

use crate::error::{Result, SessionError};
use crate::host::ExportSink;
use crate::mock::{MockDefinition, MockRegistry};
use crate::session::InteractiveTestSession;

const INDENT: &str = "    ";

/// Options shaping the generated file header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Namespace declared at the top of the file, if any.
    pub namespace: Option<String>,
    /// Whether to emit `declare(strict_types=1);`.
    pub strict_types: bool,
}

/// Renders `session` as a complete test-class file.
///
/// Each method lists the setup of every mock it mentions, then its code
/// lines, then its assertions.
///
/// # Errors
///
/// Returns [`SessionError::UnknownMethod`] if a listed method cannot be
/// read back from the session.
pub fn render_test_class(
    session: &InteractiveTestSession,
    mocks: &MockRegistry,
    options: &ExportOptions,
) -> std::result::Result<String, SessionError> {
    let mut out = String::from("<?php\n\n");
    if options.strict_types {
        out.push_str("declare(strict_types=1);\n\n");
    }
    if let Some(namespace) = options
        .namespace
        .as_deref()
        .map(|ns| ns.trim().trim_matches('\\'))
        .filter(|ns| !ns.is_empty())
    {
        out.push_str(&format!("namespace {namespace};\n\n"));
    }
    out.push_str("use PHPUnit\\Framework\\TestCase;\n\n");
    out.push_str(&format!(
        "final class {} extends TestCase\n{{\n",
        session.name()
    ));

    let methods = session.method_names();
    for (position, method) in methods.iter().enumerate() {
        if position > 0 {
            out.push('\n');
        }
        let code = session.method_code_lines(method)?;
        let assertions = session.method_assertions(method)?;
        let body_mentions = |mock: &&MockDefinition| {
            code.iter()
                .chain(assertions.iter())
                .any(|line| mentions_variable(line, mock.variable()))
        };
        let setup = mocks
            .iter()
            .filter(body_mentions)
            .flat_map(MockDefinition::setup_lines);

        out.push_str(&format!(
            "{INDENT}public function {method}(): void\n{INDENT}{{\n"
        ));
        for line in setup.chain(code.iter().cloned()).chain(assertions.iter().cloned()) {
            out.push_str(&format!("{INDENT}{INDENT}{line}\n"));
        }
        out.push_str(&format!("{INDENT}}}\n"));
    }

    out.push_str("}\n");
    Ok(out)
}

/// Renders `session` and writes it to `{name}.php` through `sink`.
///
/// Returns the path written, relative to the sink's root.
///
/// # Errors
///
/// Passes sink failures through as [`crate::error::FilesystemError`].
pub fn export_session<S>(
    session: &InteractiveTestSession,
    mocks: &MockRegistry,
    options: &ExportOptions,
    sink: &S,
) -> Result<Utf8PathBuf>
where
    S: ExportSink + ?Sized,
{
    let content = render_test_class(session, mocks, options)?;
    let path = Utf8PathBuf::from(format!("{}.php", session.name()));
    sink.write_file(&path, &content)?;
    debug!(test = session.name(), path = %path, "session exported");
    Ok(path)
}

/// Whether `line` mentions `variable` as a whole name, so `$mail` does not
/// match inside `$mailer`.
fn mentions_variable(line: &str, variable: &str) -> bool {
    line.match_indices(variable).any(|(start, _)| {
        line.get(start + variable.len()..)
            .and_then(|rest| rest.chars().next())
            .is_none_or(|next| !(next.is_ascii_alphanumeric() || next == '_'))
    })
}
