// Copyright (c) 2022 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! A concurrent ZIP reader which acts over an owned vector of bytes.
//!
//! Concurrency is achieved as a result of wrapping the provided vector of bytes within an [`Arc`](std::sync::Arc) to
//! allow shared ownership, and reading it via positioned reads only.
//!
//! ### Concurrent Example
//! ```no_run
//! # use async_unzip::base::read::mem::ZipFileReader;
//! # use async_unzip::error::Result;
//! #
//! async fn run() -> Result<()> {
//!     let reader = ZipFileReader::new(Vec::new()).await?;
//!     let result = tokio::join!(read(&reader, 0), read(&reader, 1));
//!
//!     let data_0 = result.0?;
//!     let data_1 = result.1?;
//!
//!     // Use data within current scope.
//!
//!     Ok(())
//! }
//!
//! async fn read(reader: &ZipFileReader, index: usize) -> Result<Vec<u8>> {
//!     let mut entry = reader.entry(index).await?;
//!     let mut data = Vec::new();
//!     entry.read_to_end_checked(&mut data).await?;
//!     Ok(data)
//! }
//! ```

use crate::base::read::io::entry::ZipEntryReader;
use crate::base::read::store;
use crate::entry::ZipEntry;
use crate::error::Result;
use crate::file::ZipFile;

/// A concurrent ZIP reader which acts over an owned vector of bytes.
#[derive(Debug, Clone)]
pub struct ZipFileReader {
    reader: store::ZipFileReader<Vec<u8>>,
}

impl ZipFileReader {
    /// Constructs a new ZIP reader from an owned vector of bytes.
    pub async fn new(data: Vec<u8>) -> Result<ZipFileReader> {
        let size = data.len() as u64;
        Ok(ZipFileReader { reader: store::ZipFileReader::new(data, size).await? })
    }

    /// Returns this ZIP file's information.
    pub fn file(&self) -> &ZipFile {
        self.reader.file()
    }

    /// Returns the raw bytes provided to the reader during construction.
    pub fn data(&self) -> &[u8] {
        self.reader.store()
    }

    /// Returns a new entry reader if the provided index is valid.
    pub async fn entry(&self, index: usize) -> Result<ZipEntryReader<'_, Vec<u8>>> {
        self.reader.entry(index).await
    }

    /// Returns a new entry reader over the provided entry's data.
    pub async fn open(&self, entry: &ZipEntry) -> Result<ZipEntryReader<'_, Vec<u8>>> {
        self.reader.open(entry).await
    }
}
