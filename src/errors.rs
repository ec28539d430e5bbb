//! Tabassert error handling.
//!
//! Assertion *failures* are not errors: they are reported through a
//! [`Reporter`](crate::Reporter) and the assertion returns `false`. The
//! [`AssertError`] type covers everything else that can go wrong: invalid
//! assertion arguments and configuration that cannot be loaded.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// ERROR TYPE
// ============================================================================

/// All errors produced by tabassert.
#[derive(Error, Diagnostic, Debug)]
pub enum AssertError {
    /// The operands of an (in)equality assertion cannot be compared.
    #[error("Invalid operation: {expected} == {actual} ({reason})")]
    #[diagnostic(code(tabassert::validate::invalid_operation))]
    InvalidOperation {
        expected: String,
        actual: String,
        reason: String,
    },

    /// The test-file pattern used to filter stack frames is not a valid regex.
    #[error("invalid test file pattern '{pattern}'")]
    #[diagnostic(
        code(tabassert::config::pattern),
        help("the pattern is matched against full source paths of stack frames")
    )]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The configuration file could not be read.
    #[error("failed to read config file '{}'", .path.display())]
    #[diagnostic(code(tabassert::config::read))]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML for [`Config`](crate::Config).
    #[error("failed to parse config")]
    #[diagnostic(code(tabassert::config::parse))]
    ConfigParse(#[from] serde_yaml::Error),

    /// An environment override holds a value that cannot be interpreted.
    #[error("invalid value '{value}' for {var} (expected {expected})")]
    #[diagnostic(code(tabassert::config::env))]
    InvalidEnv {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl AssertError {
    /// Builds the error for operands that cannot take part in an equality check.
    pub fn invalid_operation(
        expected: impl Into<String>,
        actual: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        AssertError::InvalidOperation {
            expected: expected.into(),
            actual: actual.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_operation_display() {
        let err = AssertError::invalid_operation("1", "2", "cannot take func type as argument");
        assert_eq!(
            err.to_string(),
            "Invalid operation: 1 == 2 (cannot take func type as argument)"
        );
    }

    #[test]
    fn invalid_env_carries_code() {
        let err = AssertError::InvalidEnv {
            var: "TABASSERT_PADDING",
            value: "wide".into(),
            expected: "a non-negative integer",
        };
        assert_eq!(
            err.to_string(),
            "invalid value 'wide' for TABASSERT_PADDING (expected a non-negative integer)"
        );
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("tabassert::config::env"));
    }
}
