use reqwest::StatusCode;
use std::fmt;

/// Errors returned by the WealthEngine client.
///
/// Every failure is passed through to the caller as-is. Nothing is retried
/// and nothing is reclassified beyond picking the variant.
#[derive(Debug)]
pub enum WealthEngineError {
    /// Invalid client configuration (missing API key, unknown mode, bad base URL).
    Config(String),
    /// The lookup record could not be encoded as JSON.
    Serialization(serde_json::Error),
    /// The resource URL could not be built.
    Url(String),
    /// The request never produced a response.
    Transport(reqwest::Error),
    /// The response body could not be read.
    Read(reqwest::Error),
    /// The provider answered with a non-success HTTP status.
    Api {
        /// HTTP status returned by the provider.
        status: StatusCode,
        /// Raw response body, for diagnostics.
        body: String,
    },
    /// The response body did not match the expected shape.
    Decode(serde_json::Error),
    /// Error with context chain for better debugging.
    WithContext {
        /// The underlying source of the error.
        source: Box<WealthEngineError>,
        /// Additional context message.
        context: String,
    },
}

impl WealthEngineError {
    /// Returns the innermost error, skipping any context wrappers.
    pub fn root(&self) -> &WealthEngineError {
        match self {
            WealthEngineError::WithContext { source, .. } => source.root(),
            other => other,
        }
    }

    /// HTTP status of an `Api` error, looking through context wrappers.
    pub fn status(&self) -> Option<StatusCode> {
        match self.root() {
            WealthEngineError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for WealthEngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WealthEngineError::Config(msg) => write!(f, "Configuration error: {}", msg),
            WealthEngineError::Serialization(e) => write!(f, "Failed to encode request: {}", e),
            WealthEngineError::Url(msg) => write!(f, "Invalid resource URL: {}", msg),
            WealthEngineError::Transport(e) => write!(f, "WealthEngine request failed: {}", e),
            WealthEngineError::Read(e) => write!(f, "Failed to read response body: {}", e),
            WealthEngineError::Api { status, body } => {
                write!(f, "WealthEngine returned {}: {}", status, body)
            }
            WealthEngineError::Decode(e) => write!(f, "Failed to decode response: {}", e),
            WealthEngineError::WithContext { source, context } => {
                write!(f, "{}: {}", context, source)
            }
        }
    }
}

impl std::error::Error for WealthEngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WealthEngineError::Serialization(e) | WealthEngineError::Decode(e) => Some(e),
            WealthEngineError::Transport(e) | WealthEngineError::Read(e) => Some(e),
            WealthEngineError::WithContext { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<url::ParseError> for WealthEngineError {
    fn from(err: url::ParseError) -> Self {
        WealthEngineError::Url(err.to_string())
    }
}

/// Extension trait for adding context to errors.
/// Similar to `anyhow::Context` but for our `WealthEngineError` type.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T, WealthEngineError>;

    /// Add context lazily (only evaluated on error).
    fn with_context<F>(self, f: F) -> Result<T, WealthEngineError>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T, WealthEngineError> {
    fn context(self, context: impl Into<String>) -> Result<T, WealthEngineError> {
        self.map_err(|e| WealthEngineError::WithContext {
            source: Box::new(e),
            context: context.into(),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T, WealthEngineError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| WealthEngineError::WithContext {
            source: Box::new(e),
            context: f(),
        })
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = WealthEngineError> = std::result::Result<T, E>;
