//! Asynchronous access, for consumers running on Tokio.
//!
//! Same sources, same paths, same errors as the blocking API. Local files are
//! read with `tokio::fs`. Embedded assets never block on I/O, but note that
//! the *first* open of an embedded asset decompresses it inline.

use crate::*;

use std::{
    io, io::{Cursor, SeekFrom},
    pin::Pin,
    task::{Context, Poll},
};

use async_trait::async_trait;
use tokio::{
    fs::File,
    io::{AsyncRead, AsyncReadExt, AsyncSeek, ReadBuf},
};

pub trait DataFile : AsyncRead + AsyncSeek + Unpin + Send {}
impl<T: AsRef<[u8]> + Unpin + Send> DataFile for Cursor<T> {}
impl DataFile for File {}

#[async_trait]
pub trait AsyncAssetSource {
    /// Opens a given asset for reading.
    ///
    /// Takes: a path within the asset namespace, normalized before use.
    async fn open_async(&self, path: &str)
        -> Result<AsyncAssetFile, AssetError>;
}

/// An open asset, readable and seekable with `tokio::io`.
pub struct AsyncAssetFile {
    info: AssetInfo,
    body: Box<dyn DataFile>,
}

impl AsyncAssetFile {
    fn new(info: AssetInfo, body: Box<dyn DataFile>) -> AsyncAssetFile {
        AsyncAssetFile { info, body }
    }
    pub fn info(&self) -> &AssetInfo { &self.info }
    /// Reads everything from the current position to the end.
    pub async fn read_all(mut self) -> Result<Vec<u8>, AssetError> {
        let mut buf = Vec::with_capacity(self.info.size() as usize);
        match self.body.read_to_end(&mut buf).await {
            Ok(_) => Ok(buf),
            Err(x) => Err(AssetError::from_io(self.info.name(), x)),
        }
    }
}

impl AsyncRead for AsyncAssetFile {
    fn poll_read(self: Pin<&mut Self>, cx: &mut Context<'_>,
                 buf: &mut ReadBuf<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().body).poll_read(cx, buf)
    }
}

impl AsyncSeek for AsyncAssetFile {
    fn start_seek(self: Pin<&mut Self>, position: SeekFrom)
        -> io::Result<()> {
        Pin::new(&mut self.get_mut().body).start_seek(position)
    }
    fn poll_complete(self: Pin<&mut Self>, cx: &mut Context<'_>)
        -> Poll<io::Result<u64>> {
        Pin::new(&mut self.get_mut().body).poll_complete(cx)
    }
}

impl std::fmt::Debug for AsyncAssetFile {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "AsyncAssetFile({:?})", self.info.name())
    }
}

#[async_trait]
impl AsyncAssetSource for EmbeddedSource {
    async fn open_async(&self, path: &str)
        -> Result<AsyncAssetFile, AssetError> {
        let key = path::clean_rooted(path);
        let (record, prepared) = self.table().prepare(&key)?;
        let info = AssetInfo::from_record(&prepared.name, record);
        Ok(AsyncAssetFile::new(info,
                               Box::new(Cursor::new(prepared.data.clone()))))
    }
}

#[async_trait]
impl AsyncAssetSource for LocalSource {
    async fn open_async(&self, path: &str)
        -> Result<AsyncAssetFile, AssetError> {
        let key = path::clean_rooted(path).into_owned();
        let os_path = self.resolve(&key)?;
        log::trace!("opening {:?} from {:?}", key, os_path);
        let display = os_path.to_string_lossy().into_owned();
        let file = File::open(&os_path).await
            .map_err(|x| AssetError::from_io(display.clone(), x))?;
        let metadata = file.metadata().await
            .map_err(|x| AssetError::from_io(display, x))?;
        let info = AssetInfo::from_metadata(path::base(&key), &metadata);
        Ok(AsyncAssetFile::new(info, Box::new(file)))
    }
}

#[async_trait]
impl<S: AsyncAssetSource + Send + Sync> AsyncAssetSource for SubdirSource<S> {
    async fn open_async(&self, path: &str)
        -> Result<AsyncAssetFile, AssetError> {
        let full = format!("{}{}", self.prefix(), path);
        self.inner().open_async(&full).await
    }
}

#[async_trait]
impl AsyncAssetSource for Backend {
    async fn open_async(&self, path: &str)
        -> Result<AsyncAssetFile, AssetError> {
        match self {
            Backend::Embedded(x) => x.open_async(path).await,
            Backend::Local(x) => x.open_async(path).await,
        }
    }
}

impl Assets {
    /// [`read_bytes`](#method.read_bytes), without blocking the runtime on
    /// disk reads.
    pub async fn read_bytes_async(&self, use_local: bool, path: &str)
        -> Result<Vec<u8>, AssetError> {
        self.filesystem(use_local).open_async(path).await?.read_all().await
    }
}
