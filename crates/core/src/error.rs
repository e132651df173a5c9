use thiserror::Error;

/// Everything that can stop the command line from becoming a `BarConfig`.
///
/// Parsing is fail-fast: the first problem aborts the scan and no partial
/// configuration is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The token does not name any recognised option.
    #[error("unknown option '{0}'")]
    UnknownOption(String),

    /// A value-taking flag had nothing (or another flag) after it.
    #[error("option '{0}' requires a value")]
    MissingValue(String),

    /// A value was supplied but does not fit the flag's grammar.
    #[error("invalid value '{raw}' for '{flag}': {reason}")]
    InvalidValue {
        flag:   String,
        raw:    String,
        reason: String,
    },

    /// `-h` / `--help` was given. Not a failure: print usage and exit 0.
    #[error("help requested")]
    HelpRequested,
}

impl ConfigError {
    pub fn invalid(flag: impl Into<String>, raw: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidValue {
            flag:   flag.into(),
            raw:    raw.into(),
            reason: reason.to_string(),
        }
    }

    /// `true` for the help signal, which callers treat as a clean exit.
    #[must_use]
    pub fn is_help(&self) -> bool {
        matches!(self, Self::HelpRequested)
    }

    /// The flag this error refers to, if any.
    pub fn flag(&self) -> Option<&str> {
        match self {
            Self::UnknownOption(flag) | Self::MissingValue(flag) => Some(flag.as_str()),
            Self::InvalidValue { flag, .. } => Some(flag.as_str()),
            Self::HelpRequested => None,
        }
    }
}

pub type Result<T, E = ConfigError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_value_message_names_flag_and_reason() {
        let err = ConfigError::invalid("-u", "abc", "not a non-negative integer");
        assert_eq!(
            err.to_string(),
            "invalid value 'abc' for '-u': not a non-negative integer"
        );
        assert_eq!(err.flag(), Some("-u"));
    }

    #[test]
    fn help_is_not_an_error_flag() {
        assert!(ConfigError::HelpRequested.is_help());
        assert!(!ConfigError::MissingValue("-B".into()).is_help());
        assert_eq!(ConfigError::HelpRequested.flag(), None);
    }
}
