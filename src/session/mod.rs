//! The in-memory model of one interactive test under construction.
//!
//! An [`InteractiveTestSession`] holds a target class and an ordered list of
//! named methods. Each method collects code lines and assertions in the order
//! they were added. A cursor (the current method) decides where new lines go;
//! adding a line before any method exists is an error rather than an implicit
//! method creation.

use tracing::debug;

use crate::error::{ExpressionError, SessionError};
use crate::expression::{AssertionStatement, SELF_REFERENCE, TERMINATOR};

#[cfg(test)]
mod tests;

/// Suffix stripped from a test name to derive its default target class.
const TEST_SUFFIX: &str = "Test";

/// One entry in a method's assertion list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertionLine {
    /// A structured statement synthesized from an expression or snapshot.
    Statement(AssertionStatement),
    /// Free text, already normalized to a complete assertion call.
    Raw(String),
}

impl AssertionLine {
    /// Renders the line as test code.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Statement(statement) => statement.render(),
            Self::Raw(text) => text.clone(),
        }
    }
}

/// A named test method with its code and assertions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct TestMethod {
    name: String,
    code_lines: Vec<String>,
    assertions: Vec<AssertionLine>,
}

/// Aggregate counts over a whole session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Number of methods.
    pub methods: usize,
    /// Code lines summed across all methods.
    pub code_lines: usize,
    /// Assertions summed across all methods.
    pub assertions: usize,
}

/// A unit test being assembled interactively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractiveTestSession {
    name: String,
    target_class: String,
    methods: Vec<TestMethod>,
    current_method: Option<String>,
}

impl InteractiveTestSession {
    /// Creates an empty session.
    ///
    /// When `target_class` is `None` it is derived from `name` by dropping a
    /// trailing `Test` suffix, so `CartTest` targets `Cart`.
    #[must_use]
    pub fn new(name: impl Into<String>, target_class: Option<&str>) -> Self {
        let session_name = name.into();
        let target = target_class.map_or_else(|| derive_target_class(&session_name), String::from);
        Self {
            name: session_name,
            target_class: target,
            methods: Vec::new(),
            current_method: None,
        }
    }

    /// The session's immutable name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The fully-qualified class under test.
    #[must_use]
    pub fn target_class(&self) -> &str {
        &self.target_class
    }

    /// Replaces the class under test.
    pub fn set_target_class(&mut self, name: impl Into<String>) {
        self.target_class = name.into();
    }

    /// The method currently receiving code and assertions, if any.
    #[must_use]
    pub fn current_method(&self) -> Option<&str> {
        self.current_method.as_deref()
    }

    /// Adds a method if absent and makes it current.
    ///
    /// Re-adding an existing method only moves the cursor; its code and
    /// assertions are kept.
    pub fn add_method(&mut self, name: &str) {
        if self.method(name).is_none() {
            self.methods.push(TestMethod {
                name: String::from(name),
                ..TestMethod::default()
            });
            debug!(test = %self.name, method = name, "method added");
        }
        self.current_method = Some(String::from(name));
    }

    /// Makes an existing method current.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownMethod`] if no method has that name.
    pub fn set_current_method(&mut self, name: &str) -> Result<(), SessionError> {
        if self.method(name).is_none() {
            return Err(SessionError::UnknownMethod {
                name: String::from(name),
            });
        }
        self.current_method = Some(String::from(name));
        Ok(())
    }

    /// Appends a code line to the current method.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoActiveMethod`] if no method is selected.
    pub fn add_code_line(&mut self, text: impl Into<String>) -> Result<(), SessionError> {
        self.current_mut()?.code_lines.push(text.into());
        Ok(())
    }

    /// Appends several code lines to the current method, in order.
    ///
    /// Nothing is appended when no method is selected.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoActiveMethod`] if no method is selected.
    pub fn add_code_lines<I, S>(&mut self, lines: I) -> Result<(), SessionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let method = self.current_mut()?;
        method.code_lines.extend(lines.into_iter().map(Into::into));
        Ok(())
    }

    /// Normalizes free text into an assertion call and appends it.
    ///
    /// The `$this->` prefix and trailing `;` are added only when missing, so
    /// passing an already complete call leaves it unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::InvalidExpressionFormat`] for blank text and
    /// [`SessionError::NoActiveMethod`] if no method is selected. Neither
    /// failure changes the session.
    pub fn add_assertion(&mut self, text: &str) -> crate::error::Result<()> {
        let method = self.current_mut()?;
        let normalized = normalize_assertion(text)?;
        method.assertions.push(AssertionLine::Raw(normalized));
        Ok(())
    }

    /// Appends a structured assertion statement.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoActiveMethod`] if no method is selected.
    pub fn add_statement(&mut self, statement: AssertionStatement) -> Result<(), SessionError> {
        self.current_mut()?
            .assertions
            .push(AssertionLine::Statement(statement));
        Ok(())
    }

    /// Method names in insertion order.
    #[must_use]
    pub fn method_names(&self) -> Vec<String> {
        self.methods.iter().map(|method| method.name.clone()).collect()
    }

    /// Copies of the current method's code lines; empty without a method.
    #[must_use]
    pub fn code_lines(&self) -> Vec<String> {
        self.current()
            .map(|method| method.code_lines.clone())
            .unwrap_or_default()
    }

    /// The current method's assertions rendered as text; empty without a
    /// method.
    #[must_use]
    pub fn assertions(&self) -> Vec<String> {
        self.current()
            .map(|method| render_all(&method.assertions))
            .unwrap_or_default()
    }

    /// Copies of a named method's code lines.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownMethod`] if no method has that name.
    pub fn method_code_lines(&self, name: &str) -> Result<Vec<String>, SessionError> {
        self.require(name).map(|method| method.code_lines.clone())
    }

    /// A named method's assertions rendered as text.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownMethod`] if no method has that name.
    pub fn method_assertions(&self, name: &str) -> Result<Vec<String>, SessionError> {
        self.require(name)
            .map(|method| render_all(&method.assertions))
    }

    /// A named method's assertion entries.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownMethod`] if no method has that name.
    pub fn method_assertion_lines(&self, name: &str) -> Result<Vec<AssertionLine>, SessionError> {
        self.require(name).map(|method| method.assertions.clone())
    }

    /// Counts methods, code lines and assertions as they stand now.
    #[must_use]
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            methods: self.methods.len(),
            code_lines: self
                .methods
                .iter()
                .map(|method| method.code_lines.len())
                .sum(),
            assertions: self
                .methods
                .iter()
                .map(|method| method.assertions.len())
                .sum(),
        }
    }

    fn method(&self, name: &str) -> Option<&TestMethod> {
        self.methods.iter().find(|method| method.name == name)
    }

    fn require(&self, name: &str) -> Result<&TestMethod, SessionError> {
        self.method(name).ok_or_else(|| SessionError::UnknownMethod {
            name: String::from(name),
        })
    }

    fn current(&self) -> Option<&TestMethod> {
        self.current_method
            .as_deref()
            .and_then(|name| self.method(name))
    }

    fn current_mut(&mut self) -> Result<&mut TestMethod, SessionError> {
        let name = self
            .current_method
            .as_deref()
            .ok_or(SessionError::NoActiveMethod)?;
        self.methods
            .iter_mut()
            .find(|method| method.name == name)
            .ok_or(SessionError::NoActiveMethod)
    }
}

/// Derives a default target class from a test name.
#[must_use]
pub fn derive_target_class(test_name: &str) -> String {
    test_name
        .strip_suffix(TEST_SUFFIX)
        .filter(|stem| !stem.is_empty())
        .map_or_else(|| String::from(test_name), String::from)
}

/// Completes free text into an assertion call.
///
/// # Errors
///
/// Returns [`ExpressionError::InvalidExpressionFormat`] for blank text.
pub fn normalize_assertion(text: &str) -> Result<String, ExpressionError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ExpressionError::InvalidExpressionFormat);
    }
    let mut normalized = String::with_capacity(trimmed.len() + SELF_REFERENCE.len() + 1);
    if !trimmed.starts_with(SELF_REFERENCE) {
        normalized.push_str(SELF_REFERENCE);
    }
    normalized.push_str(trimmed);
    if !trimmed.ends_with(TERMINATOR) {
        normalized.push_str(TERMINATOR);
    }
    Ok(normalized)
}

fn render_all(lines: &[AssertionLine]) -> Vec<String> {
    lines.iter().map(AssertionLine::render).collect()
}
