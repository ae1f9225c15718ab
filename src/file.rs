use crate::*;

use std::{
    fs,
    io, io::{Cursor, ErrorKind, Read, Seek, SeekFrom},
    path::PathBuf as StdPathBuf,
    sync::Arc,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

/// Metadata about an open asset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetInfo {
    name: String,
    size: u64,
    mod_time: SystemTime,
    is_dir: bool,
}

impl AssetInfo {
    pub(crate) fn from_record(name: &str, record: &AssetRecord) -> AssetInfo {
        AssetInfo {
            name: name.to_owned(),
            size: record.size(),
            mod_time: unix_time(record.mod_time()),
            is_dir: record.is_dir(),
        }
    }
    pub(crate) fn from_metadata(name: &str, metadata: &fs::Metadata)
        -> AssetInfo {
        AssetInfo {
            name: name.to_owned(),
            size: metadata.len(),
            // not every platform records it
            mod_time: metadata.modified().unwrap_or(UNIX_EPOCH),
            is_dir: metadata.is_dir(),
        }
    }
    /// Base name of the path the asset was opened with.
    pub fn name(&self) -> &str { &self.name }
    /// Size in bytes, after decompression.
    pub fn size(&self) -> u64 { self.size }
    pub fn mod_time(&self) -> SystemTime { self.mod_time }
    pub fn is_dir(&self) -> bool { self.is_dir }
}

/// Converts seconds since the UNIX epoch (possibly negative) to a
/// `SystemTime`.
pub(crate) fn unix_time(secs: i64) -> SystemTime {
    if secs >= 0 {
        UNIX_EPOCH + Duration::from_secs(secs as u64)
    }
    else {
        UNIX_EPOCH - Duration::from_secs(secs.unsigned_abs())
    }
}

enum Body {
    Memory(Cursor<Arc<[u8]>>),
    Disk { file: fs::File, path: StdPathBuf },
}

/// An open asset. Read it and seek around in it like any other file.
///
/// Embedded assets hold no OS resources: reading is a copy out of the shared
/// decompressed buffer, and [`close`](#method.close) does nothing. Assets
/// opened from disk hold an ordinary file.
pub struct AssetFile {
    info: AssetInfo,
    body: Body,
}

impl AssetFile {
    pub(crate) fn in_memory(info: AssetInfo, data: Arc<[u8]>) -> AssetFile {
        AssetFile { info, body: Body::Memory(Cursor::new(data)) }
    }
    pub(crate) fn on_disk(info: AssetInfo, file: fs::File, path: StdPathBuf)
        -> AssetFile {
        AssetFile { info, body: Body::Disk { file, path } }
    }
    pub fn info(&self) -> &AssetInfo { &self.info }
    /// True if the asset came out of an asset table rather than off the disk.
    pub fn is_embedded(&self) -> bool {
        matches!(self.body, Body::Memory(..))
    }
    /// Lists the directory this handle refers to.
    ///
    /// Embedded assets can't be enumerated, so for them this is always
    /// empty. Callers are expected to know the exact paths they want.
    pub fn read_dir(&self) -> Result<Vec<AssetInfo>, AssetError> {
        let path = match &self.body {
            Body::Memory(..) => return Ok(vec![]),
            Body::Disk { path, .. } => path,
        };
        let display = path.to_string_lossy();
        if !self.info.is_dir {
            return Err(AssetError::from_io(display,
                io::Error::from(ErrorKind::NotADirectory)))
        }
        let mut ret = vec![];
        let dir = fs::read_dir(path)
            .map_err(|x| AssetError::from_io(display.clone(), x))?;
        for entry in dir {
            let entry = entry
                .map_err(|x| AssetError::from_io(display.clone(), x))?;
            let name = match entry.file_name().into_string() {
                Ok(x) => x,
                Err(_) => continue,
            };
            let metadata = entry.metadata()
                .map_err(|x| AssetError::from_io(display.clone(), x))?;
            ret.push(AssetInfo::from_metadata(&name, &metadata));
        }
        ret.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(ret)
    }
    /// Reads everything from the current position to the end.
    pub fn into_bytes(mut self) -> Result<Vec<u8>, AssetError> {
        let mut buf = Vec::with_capacity(self.info.size as usize);
        match self.read_to_end(&mut buf) {
            Ok(_) => Ok(buf),
            Err(x) => Err(AssetError::from_io(self.disk_path(), x)),
        }
    }
    /// Closes the handle. Always succeeds.
    pub fn close(self) -> Result<(), AssetError> {
        Ok(())
    }
    fn disk_path(&self) -> String {
        match &self.body {
            Body::Memory(..) => self.info.name.clone(),
            Body::Disk { path, .. } => path.to_string_lossy().into_owned(),
        }
    }
}

impl Read for AssetFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match &mut self.body {
            Body::Memory(cursor) => cursor.read(buf),
            Body::Disk { file, .. } => file.read(buf),
        }
    }
}

impl Seek for AssetFile {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match &mut self.body {
            Body::Memory(cursor) => cursor.seek(pos),
            Body::Disk { file, .. } => file.seek(pos),
        }
    }
}

impl std::fmt::Debug for AssetFile {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match &self.body {
            Body::Memory(..) => write!(fmt, "AssetFile::Embedded({:?})",
                                       self.info.name),
            Body::Disk { path, .. } => write!(fmt, "AssetFile::Disk({:?})",
                                              path),
        }
    }
}
