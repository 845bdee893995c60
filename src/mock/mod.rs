//! Declared mocks, their expectations and spy-mode call recordings.
//!
//! The registry never proxies real calls. It records what the user declared
//! so it can be exported as mock setup code, and it keeps a call log for
//! mocks switched into spy mode so verification predicates can be checked
//! against it.

mod predicate;

#[cfg(test)]
mod tests;

use std::collections::BTreeSet;

use tracing::debug;

use crate::error::MockError;
use crate::host::TypeResolver;

pub use predicate::{CallPredicate, Verification};

/// One `method(...)->with(...)->willReturn(...)` expectation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectationRecord {
    /// The mocked method name.
    pub method_name: String,
    /// Argument matcher text; empty when any arguments are accepted.
    pub matcher_expression: String,
    /// Return value text; empty when the method returns nothing.
    pub return_expression: String,
}

/// An invocation recorded while spying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// The invoked method name.
    pub method_name: String,
    /// Argument texts in call order.
    pub arguments: Vec<String>,
}

/// Result of switching a mock into spy mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpyActivation {
    /// The mock started recording calls.
    Enabled,
    /// The mock was already recording; nothing changed.
    AlreadyEnabled,
}

/// A declared mock variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockDefinition {
    variable: String,
    target_class: String,
    mocked_methods: BTreeSet<String>,
    partial: bool,
    expectations: Vec<ExpectationRecord>,
    calls: Vec<RecordedCall>,
    spying: bool,
}

impl MockDefinition {
    /// The variable name, including the leading `$`.
    #[must_use]
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// The mocked class.
    #[must_use]
    pub fn target_class(&self) -> &str {
        &self.target_class
    }

    /// Methods replaced by the mock, sorted.
    pub fn mocked_methods(&self) -> impl Iterator<Item = &str> {
        self.mocked_methods.iter().map(String::as_str)
    }

    /// Whether only [`mocked_methods`](Self::mocked_methods) are replaced.
    #[must_use]
    pub const fn is_partial(&self) -> bool {
        self.partial
    }

    /// Expectations in the order they were recorded.
    #[must_use]
    pub fn expectations(&self) -> &[ExpectationRecord] {
        &self.expectations
    }

    /// Calls recorded while spying, in order.
    #[must_use]
    pub fn calls(&self) -> &[RecordedCall] {
        &self.calls
    }

    /// Whether calls are being recorded.
    #[must_use]
    pub const fn is_spying(&self) -> bool {
        self.spying
    }

    /// Renders the code that creates this mock and configures its
    /// expectations.
    #[must_use]
    pub fn setup_lines(&self) -> Vec<String> {
        let class = class_literal(&self.target_class);
        let mut lines = Vec::with_capacity(self.expectations.len() + 1);
        if self.partial {
            let methods = self
                .mocked_methods
                .iter()
                .map(|method| format!("'{method}'"))
                .collect::<Vec<_>>()
                .join(", ");
            lines.push(format!(
                "{} = $this->createPartialMock({class}, [{methods}]);",
                self.variable
            ));
        } else {
            lines.push(format!("{} = $this->createMock({class});", self.variable));
        }

        for expectation in &self.expectations {
            let mut line = format!("{}->method('{}')", self.variable, expectation.method_name);
            if !expectation.matcher_expression.is_empty() {
                line.push_str(&format!("->with({})", expectation.matcher_expression));
            }
            if !expectation.return_expression.is_empty() {
                line.push_str(&format!("->willReturn({})", expectation.return_expression));
            }
            line.push(';');
            lines.push(line);
        }
        lines
    }

    fn calls_to(&self, method: &str) -> usize {
        self.calls
            .iter()
            .filter(|call| call.method_name == method)
            .count()
    }
}

/// Mocks keyed by variable name, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct MockRegistry {
    mocks: Vec<MockDefinition>,
}

impl MockRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self { mocks: Vec::new() }
    }

    /// Declares a mock, replacing any previous mock of the same variable.
    ///
    /// The variable may be given with or without its leading `$`.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::UnknownType`] when `types` does not know
    /// `target_class`; the registry is left unchanged.
    #[expect(
        clippy::indexing_slicing,
        reason = "index comes from position() or push() on the same vector"
    )]
    pub fn declare_mock<I, S, R>(
        &mut self,
        variable: &str,
        target_class: &str,
        methods: I,
        partial: bool,
        types: &R,
    ) -> Result<&MockDefinition, MockError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        R: TypeResolver + ?Sized,
    {
        if !types.type_exists(target_class) {
            return Err(MockError::UnknownType {
                name: String::from(target_class),
            });
        }

        let definition = MockDefinition {
            variable: canonical_variable(variable),
            target_class: String::from(target_class),
            mocked_methods: methods.into_iter().map(Into::into).collect(),
            partial,
            expectations: Vec::new(),
            calls: Vec::new(),
            spying: false,
        };
        debug!(
            variable = %definition.variable,
            target = target_class,
            partial,
            "mock declared"
        );

        if let Some(index) = self.position(&definition.variable) {
            self.mocks[index] = definition;
            return Ok(&self.mocks[index]);
        }

        self.mocks.push(definition);
        let last = self.mocks.len() - 1;
        Ok(&self.mocks[last])
    }

    /// Appends an expectation to a declared mock.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::UnknownMock`] if the variable is not declared.
    pub fn record_expectation(
        &mut self,
        variable: &str,
        method_name: &str,
        matcher_expression: &str,
        return_expression: &str,
    ) -> Result<(), MockError> {
        let mock = self.require_mut(variable)?;
        mock.expectations.push(ExpectationRecord {
            method_name: String::from(method_name),
            matcher_expression: String::from(matcher_expression.trim()),
            return_expression: String::from(return_expression.trim()),
        });
        Ok(())
    }

    /// Starts recording calls for a declared mock.
    ///
    /// Enabling an already spying mock is a successful no-op reported as
    /// [`SpyActivation::AlreadyEnabled`]; earlier calls are left as they are.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::UnknownMock`] if the variable is not declared.
    pub fn enable_spy(&mut self, variable: &str) -> Result<SpyActivation, MockError> {
        let mock = self.require_mut(variable)?;
        if mock.spying {
            return Ok(SpyActivation::AlreadyEnabled);
        }
        mock.spying = true;
        debug!(variable = %mock.variable, "spy enabled");
        Ok(SpyActivation::Enabled)
    }

    /// Records an invocation if the mock is spying.
    ///
    /// Calls on undeclared or non-spying mocks are ignored. Returns whether
    /// the call was recorded.
    pub fn record_call<I, S>(&mut self, variable: &str, method_name: &str, arguments: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let Some(mock) = self.get_mut(variable).filter(|mock| mock.spying) else {
            return false;
        };
        mock.calls.push(RecordedCall {
            method_name: String::from(method_name),
            arguments: arguments.into_iter().map(Into::into).collect(),
        });
        true
    }

    /// Checks a call predicate against the recorded calls.
    ///
    /// Never fails: an undeclared mock or an unmet predicate is reported
    /// through [`Verification::success`] and its details.
    #[must_use]
    pub fn verify(&self, variable: &str, method_name: &str, predicate: CallPredicate) -> Verification {
        let Some(mock) = self.get(variable) else {
            return Verification {
                success: false,
                details: format!("no mock named {}", canonical_variable(variable)),
            };
        };
        predicate.check(mock, method_name, mock.calls_to(method_name))
    }

    /// Looks a mock up by variable name.
    #[must_use]
    pub fn get(&self, variable: &str) -> Option<&MockDefinition> {
        let canonical = canonical_variable(variable);
        self.mocks.iter().find(|mock| mock.variable == canonical)
    }

    /// Iterates mocks in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, MockDefinition> {
        self.mocks.iter()
    }

    /// Number of declared mocks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mocks.len()
    }

    /// Whether no mock is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mocks.is_empty()
    }

    /// Discards every mock.
    pub fn reset(&mut self) {
        debug!(discarded = self.mocks.len(), "mock registry reset");
        self.mocks.clear();
    }

    fn get_mut(&mut self, variable: &str) -> Option<&mut MockDefinition> {
        let canonical = canonical_variable(variable);
        self.mocks.iter_mut().find(|mock| mock.variable == canonical)
    }

    fn require_mut(&mut self, variable: &str) -> Result<&mut MockDefinition, MockError> {
        self.get_mut(variable).ok_or_else(|| MockError::UnknownMock {
            variable: canonical_variable(variable),
        })
    }

    fn position(&self, variable: &str) -> Option<usize> {
        self.mocks.iter().position(|mock| mock.variable == variable)
    }
}

impl<'a> IntoIterator for &'a MockRegistry {
    type Item = &'a MockDefinition;
    type IntoIter = std::slice::Iter<'a, MockDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.mocks.iter()
    }
}

/// Adds the leading `$` when missing.
fn canonical_variable(variable: &str) -> String {
    let trimmed = variable.trim();
    if trimmed.starts_with('$') {
        String::from(trimmed)
    } else {
        format!("${trimmed}")
    }
}

/// Renders a class name as a fully-qualified `::class` literal.
fn class_literal(class: &str) -> String {
    if class.contains('\\') && !class.starts_with('\\') {
        format!("\\{class}::class")
    } else {
        format!("{class}::class")
    }
}
