use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A layer failed to parse, or a value had the wrong type.
    #[error("failed to load sitelog config: {0}")]
    Figment(#[from] figment::Error),

    /// A value parsed but cannot be used, such as an empty logger roster.
    #[error("bad value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}
