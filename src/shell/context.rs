//! State shared by every command in one shell run.

use tracing::debug;

use crate::config::ShellConfig;
use crate::export::ExportOptions;
use crate::host::{Bindings, DirSink, Evaluator, ExportSink, LiteralEvaluator, TypeCatalog, Value};
use crate::mock::MockRegistry;
use crate::registry::TestRegistry;

/// Registries, bindings and collaborators owned by a shell.
pub struct ShellContext {
    tests: TestRegistry,
    mocks: MockRegistry,
    types: TypeCatalog,
    bindings: Bindings,
    evaluator: Box<dyn Evaluator>,
    sink: Box<dyn ExportSink>,
    export_options: ExportOptions,
}

impl ShellContext {
    /// Creates an empty context around the given collaborators.
    #[must_use]
    pub fn new(evaluator: Box<dyn Evaluator>, sink: Box<dyn ExportSink>) -> Self {
        Self {
            tests: TestRegistry::new(),
            mocks: MockRegistry::new(),
            types: TypeCatalog::new(),
            bindings: Bindings::new(),
            evaluator,
            sink,
            export_options: ExportOptions::default(),
        }
    }

    /// Creates a context from loaded configuration, using the literal
    /// evaluator and a directory sink rooted at the export directory.
    #[must_use]
    pub fn from_config(config: &ShellConfig) -> Self {
        Self::new(
            Box::new(LiteralEvaluator),
            Box::new(DirSink::new(config.export.dir.clone())),
        )
        .with_types(TypeCatalog::with_types(&config.types.known))
        .with_export_options(ExportOptions {
            namespace: config.export.namespace.clone(),
            strict_types: config.export.strict_types,
        })
    }

    /// Replaces the type catalog.
    #[must_use]
    pub fn with_types(mut self, types: TypeCatalog) -> Self {
        self.types = types;
        self
    }

    /// Replaces the export options.
    #[must_use]
    pub fn with_export_options(mut self, options: ExportOptions) -> Self {
        self.export_options = options;
        self
    }

    /// The test registry.
    #[must_use]
    pub const fn tests(&self) -> &TestRegistry {
        &self.tests
    }

    /// The test registry, for mutation.
    pub const fn tests_mut(&mut self) -> &mut TestRegistry {
        &mut self.tests
    }

    /// The mock registry.
    #[must_use]
    pub const fn mocks(&self) -> &MockRegistry {
        &self.mocks
    }

    /// The mock registry, for mutation.
    pub const fn mocks_mut(&mut self) -> &mut MockRegistry {
        &mut self.mocks
    }

    /// The mock registry for mutation alongside the types it resolves
    /// against.
    pub const fn mocks_with_types(&mut self) -> (&mut MockRegistry, &TypeCatalog) {
        (&mut self.mocks, &self.types)
    }

    /// Known types.
    #[must_use]
    pub const fn types(&self) -> &TypeCatalog {
        &self.types
    }

    /// Known types, for declaring more.
    pub const fn types_mut(&mut self) -> &mut TypeCatalog {
        &mut self.types
    }

    /// Variable bindings visible to the evaluator.
    #[must_use]
    pub const fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// Binds `name` (without `$`) to `value`, replacing any earlier value.
    pub fn bind(&mut self, name: &str, value: Value) {
        debug!(variable = name, "variable bound");
        self.bindings.insert(String::from(name), value);
    }

    /// The evaluator collaborator.
    #[must_use]
    pub fn evaluator(&self) -> &dyn Evaluator {
        self.evaluator.as_ref()
    }

    /// The export sink collaborator.
    #[must_use]
    pub fn sink(&self) -> &dyn ExportSink {
        self.sink.as_ref()
    }

    /// Options applied when rendering test classes.
    #[must_use]
    pub const fn export_options(&self) -> &ExportOptions {
        &self.export_options
    }

    /// Discards every test, mock and binding. Declared types are kept.
    pub fn reset(&mut self) {
        self.tests.reset();
        self.mocks.reset();
        self.bindings.clear();
        debug!("shell context reset");
    }
}

impl std::fmt::Debug for ShellContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShellContext")
            .field("tests", &self.tests)
            .field("mocks", &self.mocks)
            .field("types", &self.types)
            .field("bindings", &self.bindings)
            .field("export_options", &self.export_options)
            .finish_non_exhaustive()
    }
}
