//! Canonical assertion statements and their rendering.

use std::fmt;

/// Prefix every rendered assertion call starts with.
pub const SELF_REFERENCE: &str = "$this->";

/// Terminator every rendered assertion ends with.
pub const TERMINATOR: &str = ";";

/// The kind of check an assertion performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssertionKind {
    /// Strict identity of expected and actual.
    Same,
    /// Loose equality of expected and actual.
    Equals,
    /// Loose inequality of expected and actual.
    NotEquals,
    /// Strict non-identity of expected and actual.
    NotSame,
    /// Actual is greater than expected.
    GreaterThan,
    /// Actual is less than expected.
    LessThan,
    /// Actual is greater than or equal to expected.
    GreaterOrEqual,
    /// Actual is less than or equal to expected.
    LessOrEqual,
    /// Actual is an instance of the expected class.
    InstanceOf,
    /// Actual is `true`.
    True,
    /// Actual is `false`.
    False,
    /// Actual is `null`.
    Null,
    /// Actual is empty.
    Empty,
    /// Actual is an array.
    IsArray,
    /// Actual is an object.
    IsObject,
    /// Actual is a string.
    IsString,
    /// Actual is an integer.
    IsInt,
    /// Actual is a boolean.
    IsBool,
}

impl AssertionKind {
    /// Returns the assertion method name used when rendering.
    #[must_use]
    pub const fn method_name(self) -> &'static str {
        match self {
            Self::Same => "assertSame",
            Self::Equals => "assertEquals",
            Self::NotEquals => "assertNotEquals",
            Self::NotSame => "assertNotSame",
            Self::GreaterThan => "assertGreaterThan",
            Self::LessThan => "assertLessThan",
            Self::GreaterOrEqual => "assertGreaterThanOrEqual",
            Self::LessOrEqual => "assertLessThanOrEqual",
            Self::InstanceOf => "assertInstanceOf",
            Self::True => "assertTrue",
            Self::False => "assertFalse",
            Self::Null => "assertNull",
            Self::Empty => "assertEmpty",
            Self::IsArray => "assertIsArray",
            Self::IsObject => "assertIsObject",
            Self::IsString => "assertIsString",
            Self::IsInt => "assertIsInt",
            Self::IsBool => "assertIsBool",
        }
    }

    /// Returns whether the kind compares an expected value with an actual one.
    #[must_use]
    pub const fn is_binary(self) -> bool {
        matches!(
            self,
            Self::Same
                | Self::Equals
                | Self::NotEquals
                | Self::NotSame
                | Self::GreaterThan
                | Self::LessThan
                | Self::GreaterOrEqual
                | Self::LessOrEqual
                | Self::InstanceOf
        )
    }
}

/// Which side of the check an operand stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandRole {
    /// The reference value.
    Expected,
    /// The value under test.
    Actual,
}

/// A raw expression operand of an assertion.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Operand {
    role: OperandRole,
    text: String,
    class_reference: bool,
}

impl Operand {
    /// Creates an expected-value operand.
    #[must_use]
    pub fn expected(text: impl Into<String>) -> Self {
        Self {
            role: OperandRole::Expected,
            text: text.into(),
            class_reference: false,
        }
    }

    /// Creates an actual-value operand.
    #[must_use]
    pub fn actual(text: impl Into<String>) -> Self {
        Self {
            role: OperandRole::Actual,
            text: text.into(),
            class_reference: false,
        }
    }

    /// Creates an expected operand naming a class literal.
    ///
    /// Renders as `Name::class` instead of a runtime expression.
    #[must_use]
    pub fn class_reference(name: impl Into<String>) -> Self {
        Self {
            role: OperandRole::Expected,
            text: name.into(),
            class_reference: true,
        }
    }

    /// The operand's role.
    #[must_use]
    pub const fn role(&self) -> OperandRole {
        self.role
    }

    /// The operand's raw text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the operand is a class literal.
    #[must_use]
    pub const fn is_class_reference(&self) -> bool {
        self.class_reference
    }

    /// Renders the operand as it appears inside an assertion call.
    #[must_use]
    pub fn render(&self) -> String {
        if self.class_reference {
            format!("{}::class", self.text)
        } else {
            self.text.clone()
        }
    }
}

/// A single, immutable assertion: a kind plus its operands.
///
/// Binary kinds carry `[expected, actual]`; unary kinds carry `[actual]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssertionStatement {
    kind: AssertionKind,
    operands: Vec<Operand>,
}

impl AssertionStatement {
    /// Creates a single-operand statement checking `actual`.
    #[must_use]
    pub fn unary(kind: AssertionKind, actual: impl Into<String>) -> Self {
        Self {
            kind,
            operands: vec![Operand::actual(actual)],
        }
    }

    /// Creates a two-operand statement in expected-then-actual order.
    #[must_use]
    pub fn binary(kind: AssertionKind, expected: Operand, actual: impl Into<String>) -> Self {
        Self {
            kind,
            operands: vec![expected, Operand::actual(actual)],
        }
    }

    /// The statement's kind.
    #[must_use]
    pub const fn kind(&self) -> AssertionKind {
        self.kind
    }

    /// The statement's operands in argument order.
    #[must_use]
    pub fn operands(&self) -> &[Operand] {
        &self.operands
    }

    /// The operands' raw texts in argument order.
    #[must_use]
    pub fn operand_texts(&self) -> Vec<&str> {
        self.operands.iter().map(Operand::text).collect()
    }

    /// Renders the statement as one line of test code.
    #[must_use]
    pub fn render(&self) -> String {
        let arguments = self
            .operands
            .iter()
            .map(Operand::render)
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "{SELF_REFERENCE}{}({arguments}){TERMINATOR}",
            self.kind.method_name()
        )
    }
}

impl fmt::Display for AssertionStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
