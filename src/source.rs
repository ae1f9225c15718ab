use crate::*;

use std::sync::Arc;

/// Something assets can be opened from.
///
/// Implemented by [`EmbeddedSource`], [`LocalSource`], [`SubdirSource`] and
/// the [`Backend`] choice between the first two. Code that only ever opens
/// assets should take an `impl AssetSource` (or `&dyn AssetSource`) and not
/// care which one it got.
pub trait AssetSource {
    /// Opens a given asset for reading.
    ///
    /// Takes: a path within the asset namespace. It is normalized (see
    /// [`path::clean`](path/fn.clean.html)) before use.
    fn open(&self, path: &str) -> Result<AssetFile, AssetError>;
}

impl<T: AssetSource + ?Sized> AssetSource for &T {
    fn open(&self, path: &str) -> Result<AssetFile, AssetError> {
        (**self).open(path)
    }
}

impl<T: AssetSource + ?Sized> AssetSource for Box<T> {
    fn open(&self, path: &str) -> Result<AssetFile, AssetError> {
        (**self).open(path)
    }
}

impl<T: AssetSource + ?Sized> AssetSource for Arc<T> {
    fn open(&self, path: &str) -> Result<AssetFile, AssetError> {
        (**self).open(path)
    }
}
