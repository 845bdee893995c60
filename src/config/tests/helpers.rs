//! Shared fixtures and helper functions for config tests.

use std::sync::Arc;

use mockable::MockEnv;
use ortho_config::MergeComposer;
use rstest::fixture;

use crate::config::ShellConfig;

/// Fixture providing a `ShellConfig` parsed from a full TOML example.
#[fixture]
pub fn shell_config_from_full_toml() -> ShellConfig {
    let toml = r#"
        prompt = "php> "

        [export]
        dir = "tests/Generated"
        namespace = "App\\Tests"
        strict_types = false

        [types]
        known = ["App\\Mailer", "App\\Clock"]
    "#;

    toml::from_str(toml).expect("TOML parsing should succeed")
}

/// Fixture providing a `ShellConfig` parsed from a minimal TOML example.
#[fixture]
pub fn shell_config_from_partial_toml() -> ShellConfig {
    let toml = r#"
        prompt = ">> "
    "#;

    toml::from_str(toml).expect("TOML parsing should succeed")
}

/// Fixture providing an environment with no variables set.
#[fixture]
pub fn empty_env() -> MockEnv {
    env_with(&[])
}

/// Helper: Builds a mocked environment answering from `pairs`.
pub fn env_with(pairs: &'static [(&'static str, &'static str)]) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string().returning(move |key| {
        pairs
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| String::from(*value))
    });
    env
}

/// Helper: Creates a `MergeComposer` with defaults layer already pushed.
pub fn create_composer_with_defaults() -> Result<MergeComposer, serde_json::Error> {
    let mut composer = MergeComposer::new();
    let defaults = ortho_config::serde_json::to_value(ShellConfig::default())?;
    composer.push_defaults(defaults);
    Ok(composer)
}

/// Helper: Merges layers from a composer into `ShellConfig`.
pub fn merge_config(
    composer: MergeComposer,
) -> Result<ShellConfig, Arc<ortho_config::OrthoError>> {
    ShellConfig::merge_from_layers(composer.layers())
}

/// Helper: Asserts that a config has all default values.
pub fn assert_config_has_defaults(config: &ShellConfig) {
    assert_eq!(config.prompt, "testshell> ", "prompt should be the default");
    assert_eq!(
        config.export.dir.as_str(),
        "tests",
        "export.dir should be tests"
    );
    assert!(
        config.export.namespace.is_none(),
        "export.namespace should be None"
    );
    assert!(
        config.export.strict_types,
        "export.strict_types should be true"
    );
    assert!(config.types.known.is_empty(), "types.known should be empty");
}
