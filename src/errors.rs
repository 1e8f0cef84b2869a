use thiserror::Error;

/// Failures that stop the backend from starting or serving.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Remote calls from the client features. Always recovered locally.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Malformed(String),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FormError {
    #[error("Please complete required fields")]
    MissingRequired { fields: Vec<String> },
}

/// Local store file problems. Logged, never surfaced to callers.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to read store file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse store file: {0}")]
    Json(#[from] serde_json::Error),
}
