//! Configuration system for testshell.
//!
//! This module provides the configuration structures, CLI definitions and the
//! layered loader. Precedence (lowest to highest): defaults, configuration
//! file, `TESTSHELL_*` environment variables, command-line flags.
//!
//! The configuration file is expected at `~/.config/testshell/config.toml` by
//! default, or `.testshell.toml` in the working directory.
//!
//! # Example Configuration
//!
//! ```toml
//! prompt = "php> "
//!
//! [export]
//! dir = "tests/Generated"
//! namespace = "App\\Tests"
//! strict_types = true
//!
//! [types]
//! known = ["App\\Mailer", "App\\Clock"]
//! ```

mod cli;
mod loader;
mod types;

#[cfg(test)]
mod tests;

pub use cli::Cli;
pub use loader::{env_var_names, load_config, load_config_with_env};
pub use types::{DEFAULT_PROMPT, ExportConfig, ShellConfig, TypesConfig};
