use thiserror::Error;

/// Why a `hyprbars-button` directive was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ButtonParseError {
    #[error("bgcolor and size cannot be empty")]
    MissingRequired,

    #[error("invalid widthxheight format (empty value)")]
    InvalidSizeFormat,

    #[error("failed to parse width/height: {0}")]
    InvalidSize(String),

    #[error("button size must be positive")]
    NonPositiveSize,

    #[error("invalid bgcolor")]
    InvalidBackground,

    #[error("invalid fgcolor")]
    InvalidForeground,
}

/// A rejected directive, reported back to the configuration loader.
/// Loading continues with the following directives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("hyprbars-button #{index} '{directive}': {source}")]
pub struct DirectiveError {
    /// Position of the directive in the config file's button list.
    pub index: usize,
    pub directive: String,
    #[source]
    pub source: ButtonParseError,
}
