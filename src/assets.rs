use crate::*;

use std::{
    io::Read,
    path as stdpath,
    sync::Arc,
};

/// Either of the two real sources. This is what the [`Assets`] facade hands
/// out, so callers get one concrete type no matter which mode is active.
#[derive(Clone, Debug)]
pub enum Backend {
    Embedded(EmbeddedSource),
    Local(LocalSource),
}

impl Backend {
    pub fn is_local(&self) -> bool {
        matches!(self, Backend::Local(..))
    }
}

impl AssetSource for Backend {
    fn open(&self, path: &str) -> Result<AssetFile, AssetError> {
        match self {
            Backend::Embedded(x) => x.open(path),
            Backend::Local(x) => x.open(path),
        }
    }
}

/// The front door. Holds the embedded table and the local setup, and picks
/// between them with a `use_local` flag on every call.
///
/// ```rust
/// # use std::sync::Arc;
/// # use embedded_vfs::*;
/// let assets = Assets::new(Arc::new(AssetTable::new([
///     ("/static", AssetRecord::directory(1519111881, "static")),
/// ])), "static");
/// let err = assets.read_string(false, "/static/missing.txt").unwrap_err();
/// assert!(err.is_not_found());
/// ```
#[derive(Clone, Debug)]
pub struct Assets {
    embedded: EmbeddedSource,
    local: LocalSource,
    use_local: bool,
}

impl Assets {
    /// Embedded assets come from `table`; local mode serves from
    /// `local_root`. The default mode is embedded.
    pub fn new(table: Arc<AssetTable>,
               local_root: impl Into<stdpath::PathBuf>) -> Assets {
        Assets {
            embedded: EmbeddedSource::new(table),
            local: LocalSource::new(local_root),
            use_local: false,
        }
    }
    pub fn from_config(table: Arc<AssetTable>, config: &AssetsConfig)
        -> Assets {
        let local = if config.resolve_through_table {
            LocalSource::with_table(config.local_root.clone(), table.clone())
        }
        else {
            LocalSource::new(config.local_root.clone())
        };
        Assets {
            embedded: EmbeddedSource::new(table),
            local,
            use_local: config.use_local,
        }
    }
    /// The mode this facade was configured with.
    pub fn default_mode(&self) -> bool { self.use_local }
    /// Returns the local source if `use_local`, the embedded one otherwise.
    /// Touches nothing.
    pub fn filesystem(&self, use_local: bool) -> Backend {
        if use_local {
            Backend::Local(self.local.clone())
        }
        else {
            Backend::Embedded(self.embedded.clone())
        }
    }
    /// [`filesystem`](#method.filesystem) in the configured mode.
    pub fn filesystem_default(&self) -> Backend {
        self.filesystem(self.use_local)
    }
    /// Like [`filesystem`](#method.filesystem), but mounted at `prefix`.
    pub fn directory(&self, use_local: bool, prefix: &str)
        -> SubdirSource<Backend> {
        SubdirSource::new(self.filesystem(use_local), prefix)
    }
    /// Opens an asset, reads all of it, and closes it.
    pub fn read_bytes(&self, use_local: bool, path: &str)
        -> Result<Vec<u8>, AssetError> {
        let mut file = self.filesystem(use_local).open(path)?;
        let mut buf = Vec::with_capacity(file.info().size() as usize);
        let read = file.read_to_end(&mut buf);
        file.close()?;
        match read {
            Ok(_) => Ok(buf),
            Err(x) => Err(AssetError::from_io(path, x)),
        }
    }
    /// Like [`read_bytes`](#method.read_bytes), for assets that must exist.
    ///
    /// # Panics
    ///
    /// If the asset can't be read for any reason. Use this for things the
    /// program can't run without (the main page of a UI, say), so a broken
    /// build falls over at startup instead of limping along.
    pub fn read_bytes_or_fatal(&self, use_local: bool, path: &str)
        -> Vec<u8> {
        match self.read_bytes(use_local, path) {
            Ok(x) => x,
            Err(x) => {
                log::error!("required asset unavailable: {}", x);
                panic!("required asset {:?} unavailable: {}", path, x)
            },
        }
    }
    /// [`read_bytes`](#method.read_bytes), as text. Bytes that aren't valid
    /// UTF-8 come out as U+FFFD rather than failing the read.
    pub fn read_string(&self, use_local: bool, path: &str)
        -> Result<String, AssetError> {
        self.read_bytes(use_local, path).map(into_text)
    }
    /// [`read_bytes_or_fatal`](#method.read_bytes_or_fatal), as text.
    ///
    /// # Panics
    ///
    /// Under the same conditions as `read_bytes_or_fatal`.
    pub fn read_string_or_fatal(&self, use_local: bool, path: &str)
        -> String {
        into_text(self.read_bytes_or_fatal(use_local, path))
    }
}

fn into_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(x) => x,
        Err(x) => String::from_utf8_lossy(x.as_bytes()).into_owned(),
    }
}
