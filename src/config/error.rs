//! Configuration errors.

use std::num::ParseIntError;

use thiserror::Error;

/// Errors raised while building [`Settings`](super::Settings).
///
/// Every variant is fatal: the service must not start with a partially
/// resolved configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An integer setting received a value that is not a base-10 integer.
    #[error("{var} must be a base-10 integer, got {value:?}")]
    MalformedInteger {
        var: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// A secret is unset, or still holds its published development default,
    /// in a production environment.
    #[error("{var} must be set to a non-default value when ENVIRONMENT is {environment:?}")]
    MissingSecret {
        var: &'static str,
        environment: String,
    },
}

impl ConfigError {
    /// Name of the environment variable that caused the error.
    pub fn var(&self) -> &'static str {
        match self {
            Self::MalformedInteger { var, .. } | Self::MissingSecret { var, .. } => var,
        }
    }
}

/// Result type alias for [`ConfigError`].
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_integer_names_variable_and_value() {
        let source = "abc".parse::<i64>().unwrap_err();
        let err = ConfigError::MalformedInteger {
            var: "ACCESS_TOKEN_EXPIRE_MINUTES",
            value: "abc".to_string(),
            source,
        };
        let message = err.to_string();
        assert!(message.contains("ACCESS_TOKEN_EXPIRE_MINUTES"));
        assert!(message.contains("\"abc\""));
        assert_eq!(err.var(), "ACCESS_TOKEN_EXPIRE_MINUTES");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn missing_secret_does_not_leak_a_value() {
        let err = ConfigError::MissingSecret {
            var: "SECRET_KEY",
            environment: "production".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "SECRET_KEY must be set to a non-default value when ENVIRONMENT is \"production\""
        );
        assert_eq!(err.var(), "SECRET_KEY");
    }
}
