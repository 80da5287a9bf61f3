use snafu::prelude::*;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("invalid id {id:?} specified, should be in format \"{expected}\""))]
    MalformedIdentifier { id: String, expected: &'static str },
    #[snafu(display("{url} does not exist"))]
    NotFound { url: String },
    #[snafu(display("{method} {url} failed: {source}"))]
    RequestError {
        url: String,
        method: String,
        source: ureq::Error,
    },
    #[snafu(display("{message}"))]
    ResponseError { message: String },
    #[snafu(display("invalid {field}: {message}"))]
    ValidationError { field: String, message: String },
    #[snafu(display("{prefix}: {message}"))]
    ConfigError { message: String, prefix: String },
    #[snafu(display("{message}: {source}"))]
    SyncError {
        message: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl Error {
    /// True when the remote object is absent. Reconcilers map this to an
    /// absent outcome instead of a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
