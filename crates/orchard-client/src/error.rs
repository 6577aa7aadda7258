use orchard_core::CoreError;

/// Errors building a [`crate::VerificationClient`].
///
/// Call failures are never errors; they are classified into outcomes.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),
}
