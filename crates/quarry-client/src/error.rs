use thiserror::Error;

/// Ways a search request can fail.
///
/// Callers that only need "did it work" can treat every variant the same; the
/// distinction exists for logs and for the CLI's exit message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Connection refused, timeout, or the body could not be read.
    #[error("request failed: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("request failed: server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The body was not a valid search response.
    #[error("request failed: malformed response: {0}")]
    Decode(String),
}
