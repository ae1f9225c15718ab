use std::{
    io, io::ErrorKind,
    sync::Arc,
};

use thiserror::Error;

/// Errors returned when opening or reading an asset.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The path isn't in the asset table (embedded mode), or isn't on disk
    /// (local mode).
    #[error("asset not found: {path}")]
    NotFound {
        /// Canonical path that was looked up
        path: String,
    },

    /// The embedded payload couldn't be decoded or decompressed. This is a
    /// packaging defect; the same error is returned on every access.
    #[error("corrupt asset {path}: {source}")]
    CorruptAsset {
        /// Canonical path of the broken record
        path: String,
        /// The cached unpacking failure
        #[source]
        source: Arc<UnpackError>,
    },

    /// Any other OS error from the local filesystem, passed through as-is.
    #[error("{path}: {source}")]
    Io {
        /// Path on disk
        path: String,
        /// Underlying error
        #[source]
        source: io::Error,
    },
}

impl AssetError {
    pub(crate) fn not_found(path: impl Into<String>) -> AssetError {
        AssetError::NotFound { path: path.into() }
    }
    /// Wraps an OS error. `NotFound` becomes [`AssetError::NotFound`], so
    /// that both backends report a missing asset the same way.
    pub(crate) fn from_io(path: impl Into<String>, err: io::Error)
        -> AssetError {
        if err.kind() == ErrorKind::NotFound {
            AssetError::NotFound { path: path.into() }
        }
        else {
            AssetError::Io { path: path.into(), source: err }
        }
    }
    /// The closest `std::io` error kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AssetError::NotFound { .. } => ErrorKind::NotFound,
            AssetError::CorruptAsset { .. } => ErrorKind::InvalidData,
            AssetError::Io { source, .. } => source.kind(),
        }
    }
    pub fn is_not_found(&self) -> bool {
        matches!(self, AssetError::NotFound { .. })
    }
    /// The path the error is about.
    pub fn path(&self) -> &str {
        match self {
            AssetError::NotFound { path }
            | AssetError::CorruptAsset { path, .. }
            | AssetError::Io { path, .. } => path,
        }
    }
}

impl From<AssetError> for io::Error {
    fn from(err: AssetError) -> io::Error {
        match err {
            AssetError::Io { source, .. } => source,
            other => io::Error::new(other.kind(), other),
        }
    }
}

/// Why an embedded payload couldn't be turned back into the original bytes.
#[derive(Debug, Error)]
pub enum UnpackError {
    /// The transport encoding (base64) is malformed
    #[error("bad payload encoding: {0}")]
    Encoding(#[from] base64::DecodeError),

    /// The compressed stream is malformed or truncated
    #[error("bad compressed stream: {0}")]
    Compression(#[from] io::Error),

    /// The payload decompressed fine, but not to the recorded size
    #[error("payload decompressed to {actual} bytes, expected {expected}")]
    SizeMismatch {
        /// Size recorded in the table
        expected: u64,
        /// Size actually produced
        actual: u64,
    },
}
