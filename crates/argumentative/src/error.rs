use thiserror::Error;

/// Reasons a parse or validation pass stops.
///
/// The `Display` text of each variant is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A string option was reached through a multi-character single-dash token.
    #[error("options with parameters can not be combined {0}")]
    CombinedParameter(String),

    /// A string option alias appeared inside a cluster of boolean aliases.
    #[error("options with parameters can not be combined: {alias} in {token}")]
    CombinedParameterInCluster { alias: char, token: String },

    #[error("unknown flag {0}")]
    UnknownFlag(String),

    /// An alias character inside a short cluster is not registered.
    #[error("unknown flag -{0}")]
    UnknownAlias(char),

    #[error("unknown positional argument {0}")]
    UnknownPositional(String),

    /// A string option was the last token, with nothing left to consume.
    #[error("missing value for {0}")]
    MissingValue(String),

    #[error("required flag --{0} missing")]
    MissingRequiredFlag(String),

    #[error("required positional argument [{0}] missing")]
    MissingRequiredPositional(String),
}

impl ParseError {
    pub fn message(&self) -> String {
        self.to_string()
    }
}

pub type ParseResult<T> = Result<T, ParseError>;
