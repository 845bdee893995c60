//! Configuration data types for testshell.

use camino::Utf8PathBuf;
use ortho_config::{OrthoConfig, OrthoResult, PostMergeContext, PostMergeHook};
use serde::{Deserialize, Serialize};

/// Default prompt shown before each input line.
pub const DEFAULT_PROMPT: &str = "testshell> ";

/// Settings for generated test files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory exported files are written below.
    pub dir: Utf8PathBuf,

    /// Namespace declared in exported files.
    pub namespace: Option<String>,

    /// Emit `declare(strict_types=1);` at the top of exported files.
    pub strict_types: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: Utf8PathBuf::from("tests"),
            namespace: None,
            strict_types: true,
        }
    }
}

/// Types known to exist before any `type:declare`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TypesConfig {
    /// Fully-qualified class and interface names.
    pub known: Vec<String>,
}

/// Root application configuration.
///
/// Loaded from configuration files, environment variables and command-line
/// arguments. The precedence order (lowest to highest) is: defaults,
/// configuration file, environment variables, command-line arguments.
///
/// Configuration files are discovered in this order:
/// 1. Path specified via `TESTSHELL_CONFIG_PATH` environment variable
/// 2. `.testshell.toml` in the current working directory
/// 3. `.testshell.toml` in the home directory
/// 4. `~/.config/testshell/config.toml` (XDG default)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "TESTSHELL",
    post_merge_hook,
    discovery(
        app_name = "testshell",
        env_var = "TESTSHELL_CONFIG_PATH",
        config_file_name = "config.toml",
        dotfile_name = ".testshell.toml",
        config_cli_long = "config",
        config_cli_visible = true,
    )
)]
pub struct ShellConfig {
    /// Prompt shown before each input line in interactive mode.
    pub prompt: String,

    /// Export settings.
    #[serde(default)]
    #[ortho_config(skip_cli)]
    pub export: ExportConfig,

    /// Known types.
    #[serde(default)]
    #[ortho_config(skip_cli)]
    pub types: TypesConfig,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: String::from(DEFAULT_PROMPT),
            export: ExportConfig::default(),
            types: TypesConfig::default(),
        }
    }
}

impl ShellConfig {
    /// Tidies merged values: a blank namespace becomes `None`, namespace and
    /// type names lose their leading separator, and known types are sorted
    /// without duplicates. Running it twice changes nothing.
    pub fn normalize(&mut self) {
        self.export.namespace = self
            .export
            .namespace
            .as_deref()
            .map(|namespace| namespace.trim().trim_matches('\\'))
            .filter(|namespace| !namespace.is_empty())
            .map(String::from);

        let mut known: Vec<String> = self
            .types
            .known
            .iter()
            .map(|name| name.trim().trim_start_matches('\\'))
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect();
        known.sort();
        known.dedup();
        self.types.known = known;
    }
}

impl PostMergeHook for ShellConfig {
    fn post_merge(&mut self, _ctx: &PostMergeContext) -> OrthoResult<()> {
        self.normalize();
        Ok(())
    }
}
