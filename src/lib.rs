//! This is a read-only virtual filesystem for assets that ship inside your
//! executable. Web pages, templates, images, whatever: a build step packs
//! them into a compressed table that gets compiled in, and this crate serves
//! them back out by path. During development, flip one flag and the very same
//! calls read the live files from disk instead, so you can edit and reload
//! without rebuilding.
//!
//! # Overview
//!
//! The packed assets live in an [`AssetTable`](struct.AssetTable.html), a
//! map from canonical path (`/static/index.html`) to an
//! [`AssetRecord`](struct.AssetRecord.html). Each record holds the packed
//! bytes (gzip, then base64), the unpacked size, a modification time, a
//! directory flag, and the on-disk location it was packed from.
//!
//! Assets are opened through a *source*, anything implementing
//! [`AssetSource`](trait.AssetSource.html):
//!
//! - [`EmbeddedSource`](struct.EmbeddedSource.html) serves from the table.
//! - [`LocalSource`](struct.LocalSource.html) serves from a directory on disk.
//! - [`SubdirSource`](struct.SubdirSource.html) wraps another source and
//!   mounts one of its subtrees as the root.
//!
//! Most programs only need the [`Assets`](struct.Assets.html) facade, which
//! holds both and picks one per call:
//!
//! ```rust
//! # use std::sync::Arc;
//! # use embedded_vfs::*;
//! # fn generated_table() -> AssetTable { AssetTable::new([
//! #     ("/static", AssetRecord::directory(1519111881, "static")),
//! #     ("/static/a.txt", AssetRecord::new(
//! #         "H4sIAAAAAAACA8tIzcnJVyjPL8pJAQCFEUoNCwAAAA==",
//! #         11, 1519111881, "static/a.txt", false)),
//! # ]) }
//! let assets = Assets::new(Arc::new(generated_table()), ".");
//! let use_local = false; // true while developing
//! let text = assets.read_string(use_local, "/static/a.txt").unwrap();
//! assert_eq!(text, "hello world");
//! ```
//!
//! ## Paths
//!
//! Paths are `/`-separated strings, and are normalized before use: `.` and
//! `..` components are resolved and repeated slashes collapse, so
//! `/static//img/../a.txt` is `/static/a.txt`. Sources treat every path as
//! rooted (`static/a.txt` is `/static/a.txt`), and nothing climbs above `/`.
//! Beyond that, nothing is validated or sanitized. See
//! [`path::clean`](path/fn.clean.html).
//!
//! ## Decompression
//!
//! Nothing is unpacked up front. The first time an asset is opened, its
//! record is decompressed, once, and the result is kept for the life of the
//! table. Threads that race to open the same asset first all wait for that
//! single decompression and then share its result. If a record turns out to
//! be corrupt, that failure is kept too: every later open returns the same
//! [`AssetError::CorruptAsset`](enum.AssetError.html) without trying again.
//!
//! Records with a size of zero (directories and empty files) are never
//! decompressed at all.
//!
//! ## Listings
//!
//! Embedded assets can't be listed. Opening a directory works, but
//! [`AssetFile::read_dir`](struct.AssetFile.html#method.read_dir) on it comes
//! back empty; callers are expected to know which paths they want. Local
//! directories list normally.
//!
//! ## Async
//!
//! With the `async` feature (on by default), every source also implements
//! [`AsyncAssetSource`](trait.AsyncAssetSource.html), which hands out files
//! readable with `tokio::io`.

pub mod path;

mod error;
pub use error::{AssetError, UnpackError};

mod table;
pub use table::{AssetRecord, AssetTable, Base64Gzip, Unpack};

mod file;
pub use file::{AssetFile, AssetInfo};

mod source;
pub use source::AssetSource;

mod embedded;
pub use embedded::EmbeddedSource;

mod local;
pub use local::LocalSource;

mod subdir;
pub use subdir::SubdirSource;

mod config;
pub use config::AssetsConfig;

mod assets;
pub use assets::{Assets, Backend};

#[cfg(feature = "async")]
mod aio;
#[cfg(feature = "async")]
pub use aio::{AsyncAssetFile, AsyncAssetSource, DataFile};

#[cfg(test)]
mod testutil;
