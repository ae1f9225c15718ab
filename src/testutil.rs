//! Fixture builders shared by the unit tests.

use crate::*;

use std::{
    io::Write,
    sync::{Arc, atomic::{AtomicUsize, Ordering}},
    thread,
    time::Duration,
};

use base64::Engine;
use flate2::{Compression, write::GzEncoder};

/// Packs `data` the way the asset packer does: gzip, then base64.
pub fn pack(data: &[u8]) -> String {
    pack_members(&[data])
}

/// Packs several gzip members back to back.
pub fn pack_members(members: &[&[u8]]) -> String {
    let mut compressed = Vec::new();
    for member in members {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
        encoder.write_all(member).unwrap();
        compressed.extend(encoder.finish().unwrap());
    }
    base64::engine::general_purpose::STANDARD.encode(compressed)
}

/// Breaks base64 text into 76-column lines, with a leading newline, the way
/// it looks in a generated listing.
pub fn wrapped(text: &str) -> String {
    let mut ret = String::from("\n");
    for chunk in text.as_bytes().chunks(76) {
        ret.push_str(std::str::from_utf8(chunk).unwrap());
        ret.push('\n');
    }
    ret
}

/// A file record holding `data`.
pub fn record(data: &[u8]) -> AssetRecord {
    AssetRecord::new(pack(data), data.len() as u64, 1519111881, "", false)
}

#[derive(Clone)]
pub struct Calls(Arc<AtomicUsize>);

impl Calls {
    pub fn get(&self) -> usize { self.0.load(Ordering::SeqCst) }
}

/// [`Base64Gzip`] with a call counter, and a short nap before doing any work
/// so that racing threads really do race.
pub struct CountingUnpack {
    calls: Calls,
}

impl CountingUnpack {
    pub fn new() -> (CountingUnpack, Calls) {
        let calls = Calls(Arc::new(AtomicUsize::new(0)));
        (CountingUnpack { calls: calls.clone() }, calls)
    }
}

impl Unpack for CountingUnpack {
    fn unpack(&self, encoded: &str) -> Result<Vec<u8>, UnpackError> {
        self.calls.0.fetch_add(1, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(20));
        Base64Gzip.unpack(encoded)
    }
}

/// A small table: one directory, one text file under it, and an
/// "image" under `/assets`. All records count their unpacks.
pub fn sample_table() -> (Arc<AssetTable>, Calls) {
    const IMG: &[u8] = b"\x89PNG not really";
    let (unpacker, calls) = CountingUnpack::new();
    let table = AssetTable::with_unpacker([
        ("/static", AssetRecord::directory(1519111881, "static")),
        ("/static/a.txt", AssetRecord::new(pack(b"hello world"), 11,
                                           1519111881, "static/a.txt",
                                           false)),
        ("/assets/img.png", AssetRecord::new(pack(IMG), IMG.len() as u64,
                                             1519111900, "assets/img.png",
                                             false)),
    ], Box::new(unpacker));
    (Arc::new(table), calls)
}
