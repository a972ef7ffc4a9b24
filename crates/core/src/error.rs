use thiserror::Error;

/// Core error types for hook generation
#[derive(Debug, Error)]
pub enum Error {
    /// Generic error with a message
    #[error("{0}")]
    Generic(String),

    /// Error when parsing ABI, documentation or bytecode artifacts
    #[error("Failed to parse data: {0}")]
    Parse(String),

    /// Error in the generator configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error when registering or rendering a template
    #[error("Template error: {0}")]
    Template(String),

    /// Error when reading inputs or writing generated files
    #[error("I/O error: {0}")]
    Io(String),

    /// The host TypeScript toolchain is older than the generated code requires
    #[error("typechain-hooks needs TypeScript version {required} or newer, found {found}")]
    UnsupportedToolchain { required: String, found: String },

    /// Any other error with its source
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Create a new parse error
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        Error::Parse(msg.into())
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create a new template error
    pub fn template<S: Into<String>>(msg: S) -> Self {
        Error::Template(msg.into())
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(msg: S) -> Self {
        Error::Io(msg.into())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Generic(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Generic(s.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse(format!("JSON parsing error: {}", err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
