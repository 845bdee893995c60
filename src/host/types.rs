//! In-memory type catalog.

use std::collections::BTreeSet;

use super::TypeResolver;

/// Types the host language always provides.
const BUILTIN_TYPES: &[&str] = &[
    "ArrayAccess",
    "ArrayIterator",
    "ArrayObject",
    "Closure",
    "Countable",
    "DateTime",
    "DateTimeImmutable",
    "DateTimeInterface",
    "Exception",
    "Iterator",
    "IteratorAggregate",
    "JsonSerializable",
    "RuntimeException",
    "Stringable",
    "Throwable",
    "Traversable",
    "stdClass",
];

/// A set of declared type names plus the host's built-in types.
///
/// Names are stored without a leading namespace separator, so `\App\Mailer`
/// and `App\Mailer` are the same entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeCatalog {
    declared: BTreeSet<String>,
}

impl TypeCatalog {
    /// Creates a catalog knowing only the built-in types.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            declared: BTreeSet::new(),
        }
    }

    /// Creates a catalog with the given names declared.
    #[must_use]
    pub fn with_types<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut catalog = Self::new();
        for name in names {
            catalog.declare(name.as_ref());
        }
        catalog
    }

    /// Declares a type. Returns `false` if it was already known.
    pub fn declare(&mut self, name: &str) -> bool {
        let canonical = canonical(name);
        if canonical.is_empty() || self.type_exists(canonical) {
            return false;
        }
        self.declared.insert(String::from(canonical))
    }

    /// Declared (non built-in) names in sorted order.
    pub fn declared(&self) -> impl Iterator<Item = &str> {
        self.declared.iter().map(String::as_str)
    }

    /// Forgets every declared type.
    pub fn clear(&mut self) {
        self.declared.clear();
    }
}

impl TypeResolver for TypeCatalog {
    fn type_exists(&self, name: &str) -> bool {
        let canonical = canonical(name);
        BUILTIN_TYPES.contains(&canonical) || self.declared.contains(canonical)
    }
}

fn canonical(name: &str) -> &str {
    name.trim().trim_start_matches('\\')
}
