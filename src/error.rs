use std::convert::From;
use thiserror;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Unknown property: {0}")]
    UnknownProperty(String),
    #[error("Property {0} does not accept a {1} value")]
    PropertyType(String, String),
    #[error("Invalid color specification: {0}")]
    InvalidColorSpec(String),
    #[error("Point size must be positive: {0}")]
    InvalidPointSize(f64),
    #[error("Mismatched data lengths: {0}")]
    LengthMismatch(String),
    #[error("Unable to parse config: {0}")]
    ConfigError(String),
    #[error("Unable to read point records: {0}")]
    ReaderError(String),
    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::ReaderError(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ConfigError(err.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::ConfigError(err.to_string())
    }
}
