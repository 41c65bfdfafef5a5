use thiserror::Error;

/// Errors surfaced by the engine.
///
/// `NotFound` is deliberately absent: a missing document is a normal
/// `Ok(None)` result, not an error.
#[derive(Error, Debug)]
pub enum AppError {
    /// Remote document store is unreachable or was never configured.
    /// Local cache keeps the app usable; every remote operation fails fast.
    #[error("remote store is not configured")]
    NotConfigured,

    /// Identity could not be established. Aborts seeding and remote
    /// preference sync, never local-only operation.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// A non-forced write hit an existing document. Expected during
    /// seeding; counted as skipped, never shown to the end user.
    #[error("document already exists")]
    AlreadyExists,

    /// Generic remote store failure.
    #[error("store error: {0}")]
    Store(String),

    /// A document key that does not round-trip.
    #[error("invalid document key: {0}")]
    InvalidKey(String),

    /// An enumerant token that matches no known variant.
    #[error("unrecognized token: {0}")]
    UnknownToken(String),

    #[error("config error: {0}")]
    Config(String),

    /// Shared local storage could not be read or replaced.
    #[error("shared storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
