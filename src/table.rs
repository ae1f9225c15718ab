use crate::*;

use std::{
    borrow::Cow,
    collections::HashMap,
    fmt,
    io::Read,
    sync::Arc,
};

use base64::Engine;
use flate2::read::MultiGzDecoder;
use once_cell::sync::OnceCell;

/// Turns the text stored in an [`AssetRecord`] back into the asset's bytes.
///
/// The default is [`Base64Gzip`]. Implementations must be pure: the table
/// calls `unpack` at most once per record and caches whatever it returns,
/// failure included.
pub trait Unpack: Send + Sync {
    fn unpack(&self, encoded: &str) -> Result<Vec<u8>, UnpackError>;
}

/// Standard base64 (line breaks allowed) wrapped around a gzip stream. This
/// is what the asset packer emits.
#[derive(Clone, Copy, Debug, Default)]
pub struct Base64Gzip;

impl Unpack for Base64Gzip {
    fn unpack(&self, encoded: &str) -> Result<Vec<u8>, UnpackError> {
        // the packer wraps its output at a fixed column
        let text: Vec<u8> = encoded.bytes()
            .filter(|&b| b != b'\n' && b != b'\r')
            .collect();
        let compressed = base64::engine::general_purpose::STANDARD
            .decode(&text)?;
        let mut data = Vec::new();
        MultiGzDecoder::new(&compressed[..]).read_to_end(&mut data)?;
        Ok(data)
    }
}

/// What a record turns into the first time somebody asks for it.
pub(crate) struct Prepared {
    pub(crate) name: String,
    pub(crate) data: Arc<[u8]>,
}

/// One entry of the asset table.
///
/// Everything except the decompressed data is fixed when the table is built.
/// The data is produced on first access, exactly once, no matter how many
/// threads get there at the same time.
pub struct AssetRecord {
    compressed: Cow<'static, str>,
    size: u64,
    mod_time: i64,
    local: String,
    is_dir: bool,
    prepared: OnceCell<Result<Prepared, Arc<UnpackError>>>,
}

impl AssetRecord {
    /// A record as written by the packer. `compressed` is only ever looked at
    /// if `size` is non-zero.
    pub fn new(compressed: impl Into<Cow<'static, str>>, size: u64,
               mod_time: i64, local: impl Into<String>, is_dir: bool)
        -> AssetRecord {
        AssetRecord {
            compressed: compressed.into(),
            size, mod_time,
            local: local.into(),
            is_dir,
            prepared: OnceCell::new(),
        }
    }
    /// A directory marker. Directories have no content.
    pub fn directory(mod_time: i64, local: impl Into<String>) -> AssetRecord {
        AssetRecord::new("", 0, mod_time, local, true)
    }
    /// Size of the asset once decompressed.
    pub fn size(&self) -> u64 { self.size }
    /// Modification time, in seconds since the UNIX epoch.
    pub fn mod_time(&self) -> i64 { self.mod_time }
    pub fn is_dir(&self) -> bool { self.is_dir }
    /// Where the asset was packed from. Used by
    /// [`LocalSource::with_table`](struct.LocalSource.html#method.with_table).
    pub fn local_path(&self) -> &str { &self.local }
    /// True once the first access has happened (successfully or not).
    pub fn is_prepared(&self) -> bool { self.prepared.get().is_some() }
    fn prepare(&self, key: &str, unpacker: &dyn Unpack)
        -> &Result<Prepared, Arc<UnpackError>> {
        self.prepared.get_or_init(|| {
            let name = path::base(key).to_owned();
            if self.size == 0 {
                return Ok(Prepared { name, data: Arc::from(&[][..]) })
            }
            let data = unpacker.unpack(&self.compressed)?;
            if data.len() as u64 != self.size {
                return Err(Arc::new(UnpackError::SizeMismatch {
                    expected: self.size,
                    actual: data.len() as u64,
                }))
            }
            log::debug!("decompressed {:?}: {} -> {} bytes", key,
                        self.compressed.len(), data.len());
            Ok(Prepared { name, data: data.into() })
        })
    }
}

impl fmt::Debug for AssetRecord {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        if self.is_dir {
            write!(fmt, "AssetRecord::Dir({:?})", self.local)
        }
        else {
            write!(fmt, "AssetRecord::File({:?}, {} bytes, {} packed)",
                   self.local, self.size, self.compressed.len())
        }
    }
}

/// The set of embedded assets, keyed by canonical path.
///
/// Build it once at startup and share it (usually in an `Arc`) with every
/// source that needs it. The table itself is immutable; only each record's
/// decompression cache is filled in, lazily.
pub struct AssetTable {
    records: HashMap<String, AssetRecord>,
    unpacker: Box<dyn Unpack>,
}

impl AssetTable {
    /// Builds a table that unpacks with [`Base64Gzip`].
    ///
    /// Panics if any path isn't canonical (see [`path::clean`]) or appears
    /// more than once. Those are bugs in the generated listing, not runtime
    /// conditions.
    pub fn new<K, I>(entries: I) -> AssetTable
    where K: Into<String>, I: IntoIterator<Item=(K, AssetRecord)> {
        AssetTable::with_unpacker(entries, Box::new(Base64Gzip))
    }
    /// Builds a table with a custom unpacker.
    pub fn with_unpacker<K, I>(entries: I, unpacker: Box<dyn Unpack>)
        -> AssetTable
    where K: Into<String>, I: IntoIterator<Item=(K, AssetRecord)> {
        let mut records = HashMap::new();
        for (key, record) in entries {
            let key = key.into();
            if !path::is_clean(&key) {
                panic!("BUG IN YOUR PROGRAM: \
                        AssetTable listing contained a non-canonical path! \
                        {:?} (should be {:?})", key, path::clean(&key))
            }
            if records.contains_key(&key) {
                panic!("BUG IN YOUR PROGRAM: \
                        AssetTable listing contained a duplicate! {:?}", key)
            }
            records.insert(key, record);
        }
        AssetTable { records, unpacker }
    }
    /// Looks up an already-canonical path.
    pub fn lookup(&self, path: &str) -> Option<&AssetRecord> {
        self.records.get(path)
    }
    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }
    /// Every path in the table, in no particular order.
    pub fn paths(&self) -> impl Iterator<Item=&str> {
        self.records.keys().map(String::as_str)
    }
    /// Looks up `path` (already canonical) and makes sure its data has been
    /// decompressed.
    pub(crate) fn prepare(&self, path: &str)
        -> Result<(&AssetRecord, &Prepared), AssetError> {
        let record = self.lookup(path)
            .ok_or_else(|| AssetError::not_found(path))?;
        match record.prepare(path, &*self.unpacker) {
            Ok(prepared) => Ok((record, prepared)),
            Err(err) => Err(AssetError::CorruptAsset {
                path: path.to_owned(),
                source: err.clone(),
            }),
        }
    }
}

impl fmt::Debug for AssetTable {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "AssetTable({} entries)", self.records.len())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testutil::*;
    #[test] #[should_panic]
    fn no_unclean_paths() {
        AssetTable::new([("/static//a.txt", record(b"x"))]);
    }
    #[test] #[should_panic]
    fn no_trailing_slash() {
        AssetTable::new([("/static/", AssetRecord::directory(0, "static"))]);
    }
    #[test] #[should_panic]
    fn no_duplicates() {
        AssetTable::new([("/a", record(b"x")), ("/a", record(b"y"))]);
    }
    #[test]
    fn round_trip() {
        const CONTENTS: &[(&str, &[u8])] = &[
            ("/static/a.txt", b"hello world"),
            ("/static/lipsum", b"Lorem ipsum dolor sit amet?"),
            ("/Pi", b"3.1415 etc."),
        ];
        let table = AssetTable::new(CONTENTS.iter()
            .map(|(path, data)| (*path, record(data))));
        assert_eq!(table.len(), CONTENTS.len());
        for (path, data) in CONTENTS {
            let (record, prepared) = table.prepare(path).unwrap();
            assert_eq!(&prepared.data[..], *data);
            assert_eq!(prepared.name, path::base(path));
            assert!(record.is_prepared());
        }
    }
    #[test]
    fn wrapped_base64() {
        let data: Vec<u8> = (0..4000u32).map(|x| (x * 7 % 251) as u8)
            .collect();
        let table = AssetTable::new([
            ("/big.bin", AssetRecord::new(wrapped(&pack(&data)), 4000,
                                          1519111881, "big.bin", false)),
        ]);
        let (_, prepared) = table.prepare("/big.bin").unwrap();
        assert_eq!(&prepared.data[..], &data[..]);
    }
    #[test]
    fn multiple_gzip_members() {
        let packed = pack_members(&[b"hello ", b"world"]);
        let table = AssetTable::new([
            ("/a.txt", AssetRecord::new(packed, 11, 0, "a.txt", false)),
        ]);
        let (_, prepared) = table.prepare("/a.txt").unwrap();
        assert_eq!(&prepared.data[..], b"hello world");
    }
    #[test]
    fn empty_records_never_unpack() {
        let (unpacker, calls) = CountingUnpack::new();
        let table = AssetTable::with_unpacker([
            ("/static", AssetRecord::directory(5, "static")),
            // garbage payload, but size zero so it's never looked at
            ("/static/empty", AssetRecord::new("!!!", 0, 5, "e", false)),
        ], Box::new(unpacker));
        for path in ["/static", "/static/empty"] {
            let (record, prepared) = table.prepare(path).unwrap();
            assert!(prepared.data.is_empty());
            assert_eq!(record.mod_time(), 5);
        }
        assert_eq!(calls.get(), 0);
    }
    #[test]
    fn missing() {
        let table = AssetTable::new([("/a", record(b"x"))]);
        match table.prepare("/b") {
            Err(AssetError::NotFound { path }) => assert_eq!(path, "/b"),
            x => panic!("expected NotFound, got {:?}",
                        x.map(|(r, _)| r)),
        }
    }
    #[test]
    fn bad_encoding_is_cached() {
        let (unpacker, calls) = CountingUnpack::new();
        let table = AssetTable::with_unpacker([
            ("/bad", AssetRecord::new("not base64 at all!", 5, 0, "bad",
                                      false)),
        ], Box::new(unpacker));
        let first = match table.prepare("/bad") {
            Err(AssetError::CorruptAsset { source, .. }) => source,
            x => panic!("expected CorruptAsset, got {:?}",
                        x.map(|(r, _)| r)),
        };
        assert!(matches!(*first, UnpackError::Encoding(_)));
        let second = match table.prepare("/bad") {
            Err(AssetError::CorruptAsset { source, .. }) => source,
            x => panic!("expected CorruptAsset, got {:?}",
                        x.map(|(r, _)| r)),
        };
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(calls.get(), 1);
    }
    #[test]
    fn flipped_byte_is_corrupt() {
        let mut packed = pack(b"hello world").into_bytes();
        // clobber a character in the middle of the deflate data
        let victim = packed.len() / 2;
        packed[victim] = if packed[victim] == b'A' { b'B' } else { b'A' };
        let packed = String::from_utf8(packed).unwrap();
        let table = AssetTable::new([
            ("/a.txt", AssetRecord::new(packed, 11, 0, "a.txt", false)),
        ]);
        for _ in 0..2 {
            match table.prepare("/a.txt") {
                Err(AssetError::CorruptAsset { path, .. }) =>
                    assert_eq!(path, "/a.txt"),
                x => panic!("expected CorruptAsset, got {:?}",
                            x.map(|(r, _)| r)),
            }
        }
    }
    #[test]
    fn wrong_size_is_corrupt() {
        let table = AssetTable::new([
            ("/a.txt", AssetRecord::new(pack(b"hello world"), 12, 0, "a.txt",
                                        false)),
        ]);
        match table.prepare("/a.txt") {
            Err(AssetError::CorruptAsset { source, .. }) => {
                match *source {
                    UnpackError::SizeMismatch { expected, actual } => {
                        assert_eq!(expected, 12);
                        assert_eq!(actual, 11);
                    },
                    ref x => panic!("expected SizeMismatch, got {:?}", x),
                }
            },
            x => panic!("expected CorruptAsset, got {:?}", x.map(|(r, _)| r)),
        }
    }
}
