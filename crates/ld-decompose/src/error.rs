//! Errors of the decomposition client and the image loaders.

/// Everything that can go wrong between picking a file and inserting the
/// returned layers. The document is never touched when one of these is
/// returned.
#[derive(Debug, thiserror::Error)]
pub enum DecomposeError {
    /// The backend could not be reached at all.
    #[error("Backend error: {message}. Is the decomposition server running on {backend}?")]
    Unreachable { backend: String, message: String },

    /// The whole call exceeded its time budget.
    #[error("decomposition on {backend} timed out after {secs}s")]
    TimedOut { backend: String, secs: u64 },

    /// The backend answered with a non-success status.
    #[error("decomposition on {backend} failed with status {status}: {detail}")]
    Status { backend: String, status: u16, detail: String },

    /// The backend succeeded but returned no layers.
    #[error("No layers returned from AI")]
    EmptyResult,

    /// Rejected before any network call.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A returned layer image could not be fetched or decoded.
    #[error("could not read image {src}: {message}")]
    Probe { src: String, message: String },

    /// A success body that does not match the expected shape.
    #[error("unexpected backend response: {0}")]
    Response(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl DecomposeError {
    /// Whether the UI should offer to repeat the same action. Only a
    /// rejected input needs a different file first.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::InvalidInput(_))
    }
}
