// Copyright (c) 2021-2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! # async_unzip
//!
//! An asynchronous, runtime-agnostic ZIP archive reader over random-access byte stores.
//!
//! ## Features
//! - Reads from anything implementing [`ByteStore`] (in-memory buffers, files, or custom positioned-read sources).
//! - Lazily decompresses and CRC32-verifies each entry through [`futures_lite::io::AsyncRead`].
//! - Support for the Stored and Deflate compression methods.
//! - Tolerates archive comments of any length and entry counts which have overflowed the 16-bit directory field.
//! - Supports entries whose sizes & CRC32 are deferred to a trailing data descriptor.
//!
//! [Read more.](https://pkware.cachefly.net/webdocs/casestudies/APPNOTE.TXT)
//!
//! ### Example
//! ```no_run
//! # use async_unzip::base::read::mem::ZipFileReader;
//! # use async_unzip::error::Result;
//! # use futures_lite::io::AsyncReadExt;
//! #
//! async fn run(data: Vec<u8>) -> Result<()> {
//!     let reader = ZipFileReader::new(data).await?;
//!
//!     for entry in reader.file().entries() {
//!         let mut data = Vec::new();
//!         reader.open(entry).await?.read_to_end_checked(&mut data).await?;
//!     }
//!
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod base;
pub mod error;

pub(crate) mod date;
pub(crate) mod entry;
pub(crate) mod file;
pub(crate) mod spec;
pub(crate) mod store;
pub(crate) mod string;
pub(crate) mod utils;

#[cfg(test)]
pub(crate) mod tests;

pub use crate::date::ZipDateTime;
pub use crate::entry::ZipEntry;
pub use crate::file::ZipFile;
pub use crate::spec::compression::Compression;
pub use crate::spec::header::GeneralPurposeFlag;
pub use crate::store::ByteStore;
pub use crate::string::{StringEncoding, ZipString};

pub use crate::base::read::io::range::ByteRange;
