//! Structural forms a boolean expression can be classified into.

use std::fmt;

/// A comparison operator recognised at the top level of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOperator {
    /// Strict identity, `===`.
    Identical,
    /// Loose equality, `==`.
    Equal,
    /// Strict non-identity, `!==`.
    NotIdentical,
    /// Loose inequality, `!=`.
    NotEqual,
    /// `>`
    GreaterThan,
    /// `<`
    LessThan,
    /// `>=`
    GreaterOrEqual,
    /// `<=`
    LessOrEqual,
}

impl ComparisonOperator {
    /// Returns the operator's source text.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Identical => "===",
            Self::Equal => "==",
            Self::NotIdentical => "!==",
            Self::NotEqual => "!=",
            Self::GreaterThan => ">",
            Self::LessThan => "<",
            Self::GreaterOrEqual => ">=",
            Self::LessOrEqual => "<=",
        }
    }

    /// Looks up an operator by its source text.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let operator = match symbol {
            "===" => Self::Identical,
            "==" => Self::Equal,
            "!==" => Self::NotIdentical,
            "!=" => Self::NotEqual,
            ">" => Self::GreaterThan,
            "<" => Self::LessThan,
            ">=" => Self::GreaterOrEqual,
            "<=" => Self::LessOrEqual,
            _ => return None,
        };
        Some(operator)
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A unary type or state predicate recognised as `name(argument)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PredicateFunction {
    /// `empty(x)`
    Empty,
    /// `isset(x)`
    Isset,
    /// `is_null(x)`
    IsNull,
    /// `is_array(x)`
    IsArray,
    /// `is_object(x)`
    IsObject,
    /// `is_string(x)`
    IsString,
    /// `is_int(x)`
    IsInt,
    /// `is_bool(x)`
    IsBool,
}

impl PredicateFunction {
    /// Returns the function name as written in source.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Isset => "isset",
            Self::IsNull => "is_null",
            Self::IsArray => "is_array",
            Self::IsObject => "is_object",
            Self::IsString => "is_string",
            Self::IsInt => "is_int",
            Self::IsBool => "is_bool",
        }
    }

    /// Looks up a predicate by function name, ignoring ASCII case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        [
            Self::Empty,
            Self::Isset,
            Self::IsNull,
            Self::IsArray,
            Self::IsObject,
            Self::IsString,
            Self::IsInt,
            Self::IsBool,
        ]
        .into_iter()
        .find(|function| function.name().eq_ignore_ascii_case(name))
    }
}

/// The classified structural form of a raw boolean expression.
///
/// Operand text is kept verbatim (trimmed) so it can be placed into a
/// synthesized assertion and shown in failure diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpressionShape {
    /// `object instanceof Class`.
    InstanceOf {
        /// The expression being tested.
        object: String,
        /// The class expression on the right of `instanceof`.
        class: String,
    },

    /// A binary comparison.
    Comparison {
        /// Text left of the operator.
        left: String,
        /// The matched operator.
        operator: ComparisonOperator,
        /// Text right of the operator.
        right: String,
    },

    /// A recognised predicate call spanning the whole expression.
    Predicate {
        /// The predicate function.
        function: PredicateFunction,
        /// The argument text between the parentheses.
        argument: String,
    },

    /// A leading `!` applied to the rest of the expression.
    Negation {
        /// The negated expression.
        inner: String,
    },

    /// Anything else, treated as an opaque boolean.
    Boolean {
        /// The whole expression.
        raw: String,
    },
}
