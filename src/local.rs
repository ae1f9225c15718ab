use crate::*;

use std::{
    fs::File,
    path as stdpath,
    sync::Arc,
};

/// Serves assets straight off the disk. For development: edit a file, reload,
/// see the change, with no rebuild in between.
///
/// Nothing is cached; every `open` sees the disk as it is right now.
#[derive(Clone, Debug)]
pub struct LocalSource {
    root: stdpath::PathBuf,
    table: Option<Arc<AssetTable>>,
}

impl LocalSource {
    /// Asset path `/foo/bar` will be served from `<root>/foo/bar`.
    pub fn new(root: impl Into<stdpath::PathBuf>) -> LocalSource {
        LocalSource { root: root.into(), table: None }
    }
    /// Only paths that are in `table` can be opened, and each is served
    /// from the disk location the packer recorded for it. Relative locations
    /// are taken relative to `root`.
    ///
    /// This keeps local mode honest: an asset that was never packed is
    /// missing here too, even if the file exists on disk.
    pub fn with_table(root: impl Into<stdpath::PathBuf>,
                      table: Arc<AssetTable>) -> LocalSource {
        LocalSource { root: root.into(), table: Some(table) }
    }
    pub fn root(&self) -> &stdpath::Path { &self.root }
    /// Works out where on disk the given (rooted, canonical) asset path
    /// lives.
    pub(crate) fn resolve(&self, key: &str)
        -> Result<stdpath::PathBuf, AssetError> {
        match &self.table {
            None => Ok(self.root.join(&key[1..])),
            Some(table) => {
                let record = table.lookup(key)
                    .ok_or_else(|| AssetError::not_found(key))?;
                Ok(self.root.join(record.local_path()))
            },
        }
    }
}

impl AssetSource for LocalSource {
    // TODO: Map normalized asset paths to physical paths on case-insensitive
    // filesystems, so local mode fails on a case mismatch like embedded mode
    // does.
    fn open(&self, path: &str) -> Result<AssetFile, AssetError> {
        let key = path::clean_rooted(path);
        let os_path = self.resolve(&key)?;
        log::trace!("opening {:?} from {:?}", key, os_path);
        let display = os_path.to_string_lossy().into_owned();
        let file = File::open(&os_path)
            .map_err(|x| AssetError::from_io(display.clone(), x))?;
        let metadata = file.metadata()
            .map_err(|x| AssetError::from_io(display, x))?;
        let info = AssetInfo::from_metadata(path::base(&key), &metadata);
        Ok(AssetFile::on_disk(info, file, os_path))
    }
}
