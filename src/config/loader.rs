//! Configuration loading with layered precedence.
//!
//! This module provides functions to load configuration with the precedence order
//! (lowest to highest): application defaults, configuration file, environment
//! variables, command-line arguments.
//!
//! # Architecture Note: Why Manual Layer Composition?
//!
//! The `OrthoConfig` derive macro provides `load()` which handles discovery,
//! environment variables and CLI parsing automatically. This loader composes the
//! layers with `MergeComposer` instead because:
//!
//! 1. **CLI ownership**: the `Cli` struct also carries flags that are not
//!    configuration (`--script`), so clap parsing stays in `main`.
//!
//! 2. **Environment variable validation**: `OrthoConfig`'s environment layer
//!    silently ignores unparseable values. This loader fails fast on invalid
//!    typed values instead.
//!
//! 3. **Testable environment access**: variables are read through
//!    `mockable::Env`, so tests can supply them without touching the process
//!    environment.
//!
//! # Environment Variable Handling
//!
//! String fields (e.g., `TESTSHELL_PROMPT`) are always accepted. Typed fields
//! like booleans (`TESTSHELL_EXPORT_STRICT_TYPES`) must have valid values or the
//! configuration loading fails with a clear error. List fields
//! (`TESTSHELL_TYPES_KNOWN`) are comma-separated.

use camino::Utf8PathBuf;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use mockable::{DefaultEnv, Env};
use ortho_config::discovery::ConfigDiscovery;
use ortho_config::serde_json::{self, Map, Value};
use ortho_config::{MergeComposer, toml};
use tracing::debug;

use crate::config::{Cli, ShellConfig};
use crate::error::{ConfigError, Result};

// ============================================================================
// Environment Variable Specification Table
// ============================================================================

/// The type of value expected from an environment variable.
#[derive(Clone, Copy)]
enum EnvVarType {
    /// String value (always accepted).
    String,
    /// Boolean value (`true`/`false`). Invalid values return an error.
    Bool,
    /// Comma-separated list of strings; blank items are dropped.
    List,
}

/// Specification for a single environment variable mapping.
struct EnvVarSpec {
    /// The environment variable name (e.g., `TESTSHELL_PROMPT`).
    env_var: &'static str,
    /// The JSON path segments (e.g., `["export", "dir"]`).
    path: &'static [&'static str],
    /// The expected value type.
    var_type: EnvVarType,
}

/// Table of all environment variables and their JSON paths.
const ENV_VAR_SPECS: &[EnvVarSpec] = &[
    EnvVarSpec {
        env_var: "TESTSHELL_PROMPT",
        path: &["prompt"],
        var_type: EnvVarType::String,
    },
    // Export fields
    EnvVarSpec {
        env_var: "TESTSHELL_EXPORT_DIR",
        path: &["export", "dir"],
        var_type: EnvVarType::String,
    },
    EnvVarSpec {
        env_var: "TESTSHELL_EXPORT_NAMESPACE",
        path: &["export", "namespace"],
        var_type: EnvVarType::String,
    },
    EnvVarSpec {
        env_var: "TESTSHELL_EXPORT_STRICT_TYPES",
        path: &["export", "strict_types"],
        var_type: EnvVarType::Bool,
    },
    // Type fields
    EnvVarSpec {
        env_var: "TESTSHELL_TYPES_KNOWN",
        path: &["types", "known"],
        var_type: EnvVarType::List,
    },
];

/// Returns the list of environment variable names recognised by the config loader.
///
/// Tests use this to clear every `TESTSHELL_*` variable without keeping a
/// second, hard-coded list in sync.
#[must_use]
pub fn env_var_names() -> Vec<&'static str> {
    ENV_VAR_SPECS.iter().map(|spec| spec.env_var).collect()
}

/// Load a configuration file and push it to the composer.
///
/// Opens the parent directory with `cap_std::fs_utf8` and reads the file from
/// there.
fn load_config_file(path: &Utf8PathBuf, composer: &mut MergeComposer) -> Result<()> {
    let current_dir = Utf8PathBuf::from(".");
    let parent = path
        .parent()
        .filter(|p| !p.as_str().is_empty())
        .unwrap_or_else(|| current_dir.as_ref());
    let file_name = path.file_name().unwrap_or(path.as_str());

    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|e| {
        ConfigError::ParseError {
            message: format!("failed to open directory {parent}: {e}"),
        }
    })?;

    let content = dir
        .read_to_string(file_name)
        .map_err(|e| ConfigError::ParseError {
            message: format!("failed to read {path}: {e}"),
        })?;

    let value =
        toml::from_str::<serde_json::Value>(&content).map_err(|e| ConfigError::ParseError {
            message: format!("failed to parse {path}: {e}"),
        })?;

    debug!(path = %path, "configuration file loaded");
    composer.push_file(value, Some(path.clone()));
    Ok(())
}

/// Load configuration with full layer precedence from the process
/// environment.
///
/// # Errors
///
/// See [`load_config_with_env`].
pub fn load_config(cli: &Cli) -> Result<ShellConfig> {
    load_config_with_env(cli, &DefaultEnv::new())
}

/// Load configuration with full layer precedence.
///
/// This function loads configuration from all available sources:
/// 1. Application defaults defined in the struct
/// 2. Configuration file (`--config`, or discovered via `TESTSHELL_CONFIG_PATH`,
///    `.testshell.toml` and XDG paths)
/// 3. Environment variables prefixed with `TESTSHELL_`, read through `env`
/// 4. Command-line arguments (from the provided `Cli`)
///
/// Later sources override earlier ones.
///
/// # Errors
///
/// Returns `ConfigError` if configuration loading fails due to:
/// - Malformed configuration files
/// - Invalid typed environment variable values (e.g., non-boolean for
///   `TESTSHELL_EXPORT_STRICT_TYPES`)
/// - Values of the wrong type after merge
pub fn load_config_with_env<E: Env>(cli: &Cli, env: &E) -> Result<ShellConfig> {
    let mut composer = MergeComposer::new();

    // Layer 1: Defaults (serialised from ShellConfig::default()).
    let defaults =
        serde_json::to_value(ShellConfig::default()).map_err(|e| ConfigError::ParseError {
            message: format!("failed to serialise defaults: {e}"),
        })?;
    composer.push_defaults(defaults);

    // Layer 2: Configuration file.
    let config_path: Option<Utf8PathBuf> =
        cli.config.clone().filter(|p| p.exists()).or_else(|| {
            let discovery = ConfigDiscovery::builder("testshell")
                .env_var("TESTSHELL_CONFIG_PATH")
                .config_file_name("config.toml")
                .dotfile_name(".testshell.toml")
                .build();
            discovery
                .candidates()
                .into_iter()
                .filter(|p| p.exists())
                .find_map(|p| Utf8PathBuf::try_from(p).ok())
        });

    if let Some(ref path) = config_path {
        load_config_file(path, &mut composer)?;
    }

    // Layer 3: Environment variables.
    let env_values = collect_env_vars(env)?;
    if !env_values.is_null() {
        composer.push_environment(env_values);
    }

    // Layer 4: CLI overrides.
    let cli_overrides = build_cli_overrides(cli);
    if !cli_overrides.is_null() {
        composer.push_cli(cli_overrides);
    }

    let mut config =
        ShellConfig::merge_from_layers(composer.layers()).map_err(ConfigError::OrthoConfig)?;
    config.normalize();
    Ok(config)
}

/// Collect environment variables with the `TESTSHELL_` prefix into a JSON value.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` if a typed environment variable has an
/// unparseable value.
pub(crate) fn collect_env_vars<E: Env>(env: &E) -> Result<Value> {
    let mut root = Map::new();

    for spec in ENV_VAR_SPECS {
        let Some(raw_value) = env.string(spec.env_var) else {
            continue;
        };

        let json_value = match spec.var_type {
            EnvVarType::String => Value::String(raw_value),
            EnvVarType::Bool => match raw_value.parse::<bool>() {
                Ok(b) => Value::Bool(b),
                Err(_) => {
                    return Err(ConfigError::InvalidValue {
                        field: String::from(spec.env_var),
                        reason: format!("expected bool (true/false), got '{raw_value}'"),
                    }
                    .into());
                }
            },
            EnvVarType::List => Value::Array(
                raw_value
                    .split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(|item| Value::String(String::from(item)))
                    .collect(),
            ),
        };

        insert_at_path(&mut root, spec.path, json_value);
    }

    if root.is_empty() {
        Ok(Value::Null)
    } else {
        Ok(Value::Object(root))
    }
}

/// Insert a value at a nested path in a JSON map, creating intermediate
/// objects as needed.
fn insert_at_path(root: &mut Map<String, Value>, path: &[&str], value: Value) {
    let Some((&field, parents)) = path.split_last() else {
        return;
    };

    let mut current = root;
    for &segment in parents {
        let entry = current
            .entry(String::from(segment))
            .or_insert_with(|| Value::Object(Map::new()));
        let Some(obj) = entry.as_object_mut() else {
            return;
        };
        current = obj;
    }

    current.insert(String::from(field), value);
}

/// Build a JSON value containing CLI overrides.
fn build_cli_overrides(cli: &Cli) -> Value {
    let mut overrides = Map::new();

    if let Some(ref prompt) = cli.prompt {
        insert_at_path(&mut overrides, &["prompt"], Value::String(prompt.clone()));
    }

    if let Some(ref dir) = cli.export_dir {
        insert_at_path(
            &mut overrides,
            &["export", "dir"],
            Value::String(String::from(dir.as_str())),
        );
    }

    if overrides.is_empty() {
        Value::Null
    } else {
        Value::Object(overrides)
    }
}
