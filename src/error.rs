//! Error taxonomy shared by the codec, file, and network layers.
//!
//! Codec failures always carry the underlying library's error untouched so
//! callers can inspect the original diagnostic. Boundary failures (files,
//! transports) are separate types and wrap codec failures instead of
//! flattening them.

use crate::provider::Format;
use std::path::PathBuf;
use thiserror::Error;

/// A payload did not structurally match the target type.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid JSON5: {0}")]
    Json5(#[from] json5::Error),
    #[error("invalid property list: {0}")]
    Plist(#[from] ::plist::Error),
    #[error("JSON5 input is not UTF-8: {0}")]
    NotUtf8(#[from] std::str::Utf8Error),
}

impl DecodeError {
    /// Format whose codec rejected the payload.
    pub fn format(&self) -> Format {
        match self {
            DecodeError::Json(_) | DecodeError::Json5(_) | DecodeError::NotUtf8(_) => Format::Json,
            DecodeError::Plist(_) => Format::Plist,
        }
    }
}

/// A value could not be represented in the target format.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("cannot encode as JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot encode {0} as JSON: only finite numbers are representable")]
    NonFinite(f64),
    #[error("cannot encode as property list: {0}")]
    Plist(#[from] ::plist::Error),
}

impl EncodeError {
    pub fn format(&self) -> Format {
        match self {
            EncodeError::Json(_) | EncodeError::NonFinite(_) => Format::Json,
            EncodeError::Plist(_) => Format::Plist,
        }
    }
}

/// A format name that is neither `json` nor `plist`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown format '{0}'; expected json or plist")]
pub struct UnknownFormat(pub String);

/// Failure while reading or writing an encoded file.
///
/// A missing file is always `NotFound`, never an empty payload handed to the
/// decoder.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("{} does not exist", path.display())]
    NotFound { path: PathBuf },
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("decoding {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },
    #[error("encoding for {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: EncodeError,
    },
}

impl FileError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FileError::NotFound { .. })
    }

    pub fn path(&self) -> &std::path::Path {
        match self {
            FileError::NotFound { path }
            | FileError::Io { path, .. }
            | FileError::Decode { path, .. }
            | FileError::Encode { path, .. } => path,
        }
    }
}

/// Failure inside a [`Transport`](crate::network::Transport) before any
/// decoding happened.
#[derive(Debug, Error)]
pub enum TransportError {
    #[cfg(feature = "http")]
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },
    #[error("transport failure for {url}: {source}")]
    Other {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Failure of a network helper. Transport, encode and decode failures stay
/// distinguishable.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("encoding request body: {0}")]
    Encode(#[from] EncodeError),
    #[error("decoding response body: {0}")]
    Decode(#[from] DecodeError),
}
