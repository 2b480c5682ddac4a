use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

/// Will be used each time an error can occur
pub type Result<T> = core::result::Result<T, Error>;

/// Represent an error
#[derive(Debug, Serialize, Deserialize)]
pub enum Error {
    Render(RenderError),
    Encode(EncodeError),
    Config(ConfigError),
    Fs(FileError)
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::Encode(EncodeError::Io(value.to_string()))
    }
}

impl From<RenderError> for Error {
    fn from(value: RenderError) -> Self {
        Error::Render(value)
    }
}

impl From<EncodeError> for Error {
    fn from(value: EncodeError) -> Self {
        Error::Encode(value)
    }
}

impl From<ConfigError> for Error {
    fn from(value: ConfigError) -> Self {
        Error::Config(value)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Return true if this error was caused by the output sink
    pub fn is_io(&self) -> bool {
        matches!(self, Error::Encode(EncodeError::Io(_)) | Error::Fs(FileError::IOError(_)))
    }
}

/// Represent a contract violation detected before rendering starts
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum RenderError {
    /// Width, height or digit count is zero
    InvalidDimensions(String),
    /// The digit sequence doesn't contain anything to draw
    EmptySequence,
    /// A value of the digit sequence is outside of `0..=9`
    InvalidDigit(String),
}

/// Represent an error that can occur while the image is serialized
#[derive(Debug, Serialize, Deserialize)]
pub enum EncodeError {
    /// The output sink refused the bytes
    Io(String),
    /// The PNG encoder itself failed
    Png(String),
}

/// Represent an error that can occur inside the config system
#[derive(Debug, Serialize, Deserialize)]
pub enum ConfigError {
    InvalidFile(String),
    CannotReadFile(String),
    InvalidConfig(String),
    CannotWriteFile(String),
}

/// Represent an error that can occur with the file system
#[derive(Debug, Serialize, Deserialize)]
pub enum FileError {
    CannotWriteFile(String),
    IOError(String),
}
