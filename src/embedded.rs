use crate::*;

use std::sync::Arc;

/// Serves assets out of an [`AssetTable`], decompressing each one the first
/// time it's asked for.
#[derive(Clone, Debug)]
pub struct EmbeddedSource {
    table: Arc<AssetTable>,
}

impl EmbeddedSource {
    pub fn new(table: Arc<AssetTable>) -> EmbeddedSource {
        EmbeddedSource { table }
    }
    pub fn table(&self) -> &Arc<AssetTable> { &self.table }
    /// Returns the decompressed contents of an asset without going through a
    /// file handle. The buffer is shared with every other reader of the same
    /// asset.
    pub fn read_shared(&self, path: &str) -> Result<Arc<[u8]>, AssetError> {
        let key = path::clean_rooted(path);
        let (_, prepared) = self.table.prepare(&key)?;
        Ok(prepared.data.clone())
    }
    /// Like [`read_shared`](#method.read_shared), but returns an owned copy.
    pub fn read_bytes(&self, path: &str) -> Result<Vec<u8>, AssetError> {
        self.read_shared(path).map(|x| x.to_vec())
    }
}

impl AssetSource for EmbeddedSource {
    fn open(&self, path: &str) -> Result<AssetFile, AssetError> {
        let key = path::clean_rooted(path);
        let (record, prepared) = self.table.prepare(&key)?;
        let info = AssetInfo::from_record(&prepared.name, record);
        Ok(AssetFile::in_memory(info, prepared.data.clone()))
    }
}
