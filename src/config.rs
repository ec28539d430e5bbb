//! Configuration for failure reports.
//!
//! Defaults work without any setup. A YAML file named by `TABASSERT_CONFIG`
//! and a handful of environment variables can override them:
//!
//! | Variable              | Meaning                                  |
//! |-----------------------|------------------------------------------|
//! | `TABASSERT_CONFIG`    | path of a YAML config file               |
//! | `TABASSERT_TRACE`     | `on`/`off`: collect stack frames         |
//! | `TABASSERT_TEST_FILES`| regex selecting test source files        |
//! | `TABASSERT_COLOR`     | `auto`, `always` or `never`              |
//! | `TABASSERT_PADDING`   | column padding of the failure table      |

use crate::errors::AssertError;
use crate::table::TableConfig;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, PoisonError};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Source files whose frames appear in the `Trace:` row.
pub const DEFAULT_TEST_FILE_PATTERN: &str =
    r"(^|[/\\])tests[/\\]|(^|[/\\])tests?\.rs$|_tests?\.rs$";

/// Upper bound on the number of frames in the `Trace:` row.
pub const DEFAULT_MAX_FRAMES: usize = 16;

pub const ENV_CONFIG: &str = "TABASSERT_CONFIG";
pub const ENV_TRACE: &str = "TABASSERT_TRACE";
pub const ENV_TEST_FILES: &str = "TABASSERT_TEST_FILES";
pub const ENV_COLOR: &str = "TABASSERT_COLOR";
pub const ENV_PADDING: &str = "TABASSERT_PADDING";

// ============================================================================
// TYPES
// ============================================================================

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    pub table: TableConfig,
    pub trace: TraceConfig,
    pub color: ColorMode,
}

/// Controls the `Trace:` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TraceConfig {
    /// When false only the assertion's call site is reported.
    pub enabled: bool,
    pub test_file_pattern: String,
    pub max_frames: usize,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            test_file_pattern: DEFAULT_TEST_FILE_PATTERN.to_string(),
            max_frames: DEFAULT_MAX_FRAMES,
        }
    }
}

/// Compiled test file patterns, keyed by pattern text.
static FILTERS: Lazy<Mutex<HashMap<String, Regex>>> = Lazy::new(Default::default);

impl TraceConfig {
    /// The compiled test file pattern. Each distinct pattern is compiled once
    /// per process.
    pub fn test_file_filter(&self) -> Result<Regex, AssertError> {
        let mut filters = FILTERS.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(filter) = filters.get(&self.test_file_pattern) {
            return Ok(filter.clone());
        }

        let filter =
            Regex::new(&self.test_file_pattern).map_err(|source| AssertError::InvalidPattern {
                pattern: self.test_file_pattern.clone(),
                source,
            })?;
        filters.insert(self.test_file_pattern.clone(), filter.clone());
        Ok(filter)
    }
}

/// When failure output on stderr is colored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorMode {
    /// Color when stderr is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Some(ColorMode::Auto),
            "always" | "on" => Some(ColorMode::Always),
            "never" | "off" => Some(ColorMode::Never),
            _ => None,
        }
    }

    pub fn use_colors(self) -> bool {
        match self {
            ColorMode::Auto => atty::is(atty::Stream::Stderr),
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

// ============================================================================
// LOADING
// ============================================================================

impl Config {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, AssertError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validated()
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AssertError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| AssertError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Loads the config file named by `TABASSERT_CONFIG` (if set) and applies
    /// the environment overrides on top.
    pub fn from_env() -> Result<Self, AssertError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`Config::from_env`] with a custom variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AssertError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(ENV_CONFIG) {
            Some(path) if !path.is_empty() => Self::from_file(path)?,
            _ => Self::default(),
        };

        if let Some(value) = lookup(ENV_TRACE) {
            config.trace.enabled = parse_switch(&value).ok_or(AssertError::InvalidEnv {
                var: ENV_TRACE,
                value,
                expected: "on or off",
            })?;
        }
        if let Some(pattern) = lookup(ENV_TEST_FILES) {
            config.trace.test_file_pattern = pattern;
        }
        if let Some(value) = lookup(ENV_COLOR) {
            config.color = ColorMode::from_str(&value).ok_or(AssertError::InvalidEnv {
                var: ENV_COLOR,
                value,
                expected: "auto, always or never",
            })?;
        }
        if let Some(value) = lookup(ENV_PADDING) {
            config.table.padding = value.trim().parse().map_err(|_| AssertError::InvalidEnv {
                var: ENV_PADDING,
                value,
                expected: "a non-negative integer",
            })?;
        }

        config.validated()
    }

    fn validated(self) -> Result<Self, AssertError> {
        self.trace.test_file_filter()?;
        Ok(self)
    }
}

fn parse_switch(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "on" | "true" | "yes" => Some(true),
        "0" | "off" | "false" | "no" => Some(false),
        _ => None,
    }
}

/// Unwraps a loaded config, falling back to the defaults on error.
fn load_or_default(result: Result<Config, AssertError>) -> Config {
    match result {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(error = %err, "invalid tabassert configuration, using defaults");
            Config::default()
        }
    }
}

static GLOBAL: Lazy<Config> = Lazy::new(|| load_or_default(Config::from_env()));

/// The process-wide configuration, loaded from the environment on first use.
pub fn global() -> &'static Config {
    &GLOBAL
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::Arc;

    /// Collects formatted log output.
    #[derive(Clone, Default)]
    struct LogSink(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl LogSink {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.table, TableConfig::default());
        assert!(config.trace.enabled);
        assert_eq!(config.color, ColorMode::Auto);
        assert!(config.trace.test_file_filter().is_ok());
    }

    #[test]
    fn default_pattern_selects_test_files() {
        let re = TraceConfig::default().test_file_filter().unwrap();
        assert!(re.is_match("tests/equal.rs"));
        assert!(re.is_match("/home/me/crate/tests/common/mod.rs"));
        assert!(re.is_match("src/parser_test.rs"));
        assert!(re.is_match("src/tests.rs"));
        assert!(!re.is_match("src/assertions.rs"));
        assert!(!re.is_match("/rustc/abc/library/core/src/ops/function.rs"));
    }

    #[test]
    fn yaml_overrides_are_partial() {
        let config = Config::from_yaml_str("table:\n  padding: 2\ncolor: never\n").unwrap();
        assert_eq!(config.table.padding, 2);
        assert_eq!(config.table.pad_char, ' ');
        assert_eq!(config.color, ColorMode::Never);
        assert!(config.trace.enabled);
    }

    #[test]
    fn env_overrides() {
        let config = Config::from_lookup(lookup(&[
            (ENV_TRACE, "off"),
            (ENV_COLOR, "always"),
            (ENV_PADDING, "3"),
            (ENV_TEST_FILES, r"_spec\.rs$"),
        ]))
        .unwrap();
        assert!(!config.trace.enabled);
        assert_eq!(config.color, ColorMode::Always);
        assert_eq!(config.table.padding, 3);
        assert_eq!(config.trace.test_file_pattern, r"_spec\.rs$");
    }

    #[test]
    fn invalid_env_values_are_errors() {
        let err = Config::from_lookup(lookup(&[(ENV_PADDING, "wide")])).unwrap_err();
        assert!(matches!(err, AssertError::InvalidEnv { var: ENV_PADDING, .. }));

        let err = Config::from_lookup(lookup(&[(ENV_TEST_FILES, "(")])).unwrap_err();
        assert!(matches!(err, AssertError::InvalidPattern { .. }));
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let err =
            Config::from_lookup(lookup(&[(ENV_CONFIG, "/nonexistent/tabassert.yaml")])).unwrap_err();
        assert!(matches!(err, AssertError::ConfigRead { .. }));
    }

    #[test]
    fn filters_are_compiled_once() {
        let trace = TraceConfig {
            test_file_pattern: r"_cached_once\.rs$".to_string(),
            ..TraceConfig::default()
        };
        let first = trace.test_file_filter().unwrap();
        assert!(FILTERS.lock().unwrap().contains_key(&trace.test_file_pattern));
        let second = trace.test_file_filter().unwrap();
        assert_eq!(first.as_str(), second.as_str());
        assert!(second.is_match("src/cached_cached_once.rs"));
    }

    #[test]
    fn loaded_config_is_kept() {
        let loaded = Config::from_yaml_str("color: always\n").unwrap();
        assert_eq!(load_or_default(Ok(loaded.clone())), loaded);
    }

    #[test]
    fn load_error_falls_back_to_defaults_with_a_warning() {
        let sink = LogSink::default();
        let writer = sink.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let err = AssertError::InvalidEnv {
            var: ENV_COLOR,
            value: "purple".to_string(),
            expected: "auto, always or never",
        };
        let config = tracing::subscriber::with_default(subscriber, || load_or_default(Err(err)));

        assert_eq!(config, Config::default());
        let logs = sink.contents();
        assert!(logs.contains("WARN"), "no warning logged: {}", logs);
        assert!(logs.contains("using defaults"));
        assert!(logs.contains("purple"));
    }
}
