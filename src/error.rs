// Copyright (c) 2021 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! A module which holds relevant error reporting structures/types.

use thiserror::Error;

/// A Result type alias over ZipError to minimise repetition.
pub type Result<V> = std::result::Result<V, ZipError>;

/// An enum of possible errors and their descriptions.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ZipError {
    #[error("compression not supported: {0}")]
    CompressionNotSupported(u16),

    #[error("unable to locate the end of central directory record")]
    UnableToLocateEOCDR,
    #[error("Encountered an unexpected header (actual: {0:#x}, expected: {1:#x}).")]
    UnexpectedHeaderError(u32, u32),
    #[error("unexpected end of input whilst reading {0}")]
    UnexpectedEof(&'static str),

    #[error("an upstream reader returned an error: {0}")]
    UpstreamReadError(std::io::Error),
    #[error("a computed CRC32 value did not match the expected value")]
    CRC32CheckError,
    #[error("entry index was out of bounds")]
    EntryIndexOutOfBounds,
    #[error("string is not UTF-8 encoded")]
    StringNotUtf8,
}

impl ZipError {
    /// Returns whether this error describes a structural violation of the ZIP format.
    ///
    /// Truncated records are included as a store which ends mid-record is malformed from the reader's perspective.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            ZipError::UnableToLocateEOCDR | ZipError::UnexpectedHeaderError(_, _) | ZipError::UnexpectedEof(_)
        )
    }

    /// Returns whether this error was produced by the truncated-record or bad-signature cases which terminate a
    /// central directory scan.
    pub(crate) fn terminates_directory(&self) -> bool {
        matches!(self, ZipError::UnexpectedHeaderError(_, _) | ZipError::UnexpectedEof(_))
    }
}

impl From<std::io::Error> for ZipError {
    fn from(err: std::io::Error) -> Self {
        // Errors raised from within our own AsyncRead implementations travel wrapped inside an io::Error.
        if !err.get_ref().map(|inner| inner.is::<ZipError>()).unwrap_or(false) {
            return ZipError::UpstreamReadError(err);
        }

        match err.into_inner().and_then(|inner| inner.downcast::<ZipError>().ok()) {
            Some(inner) => *inner,
            None => ZipError::UpstreamReadError(std::io::ErrorKind::InvalidData.into()),
        }
    }
}

impl From<ZipError> for std::io::Error {
    fn from(err: ZipError) -> Self {
        match err {
            ZipError::UpstreamReadError(inner) => inner,
            err => std::io::Error::new(std::io::ErrorKind::InvalidData, err),
        }
    }
}
