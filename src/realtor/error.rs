//! Error types for the realtor client

/// Result type for realtor operations
pub type Result<T> = std::result::Result<T, RealtorError>;

/// Failures that are not a plain non-2xx status.
///
/// A non-2xx reply is never an error: every operation maps it to the empty
/// value of its own result shape.
#[derive(Debug, thiserror::Error)]
pub enum RealtorError {
    /// The request never produced a status (DNS, TLS, connection reset, body read)
    #[error("transport error on {endpoint}: {message}")]
    Transport { endpoint: &'static str, message: String },

    /// A 2xx reply whose body is not JSON
    #[error("invalid JSON from {endpoint}: {source}")]
    Json {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// An expected field is absent or has the wrong type
    #[error("unexpected response shape: missing or invalid `{path}`")]
    UnexpectedShape { path: String },

    /// Autocomplete returned no entry with `area_type == "address"`
    #[error("no address match in autocomplete results for {address:?}")]
    NoAddressMatch { address: String },

    /// Invalid or missing configuration
    #[error("configuration error: {0}")]
    Config(String),
}

impl RealtorError {
    pub fn shape<S: Into<String>>(path: S) -> Self {
        Self::UnexpectedShape { path: path.into() }
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }
}
