// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! A concurrent ZIP reader which acts over any [`ByteStore`] of a known size.
//!
//! Concurrency is achieved as a result of:
//! - Wrapping the provided store within an [`Arc`] to allow shared ownership.
//! - Only ever issuing positioned reads against the store, with each entry reader tracking its own position.
//!
//! ### Usage
//! Entry readers borrow from the overarching [`ZipFileReader`], so any number of them can be constructed and read
//! concurrently (including multiple readers over the same entry). To read entries across thread boundaries, the
//! [`ZipFileReader`] should be cloned and moved into those contexts.
//!
//! ### Parallel Example
//! ```no_run
//! # use async_unzip::base::read::store::ZipFileReader;
//! # use async_unzip::error::Result;
//! #
//! async fn run(data: Vec<u8>) -> Result<()> {
//!     let size = data.len() as u64;
//!     let reader = ZipFileReader::new(data, size).await?;
//!
//!     let handle_0 = tokio::spawn(read(reader.clone(), 0));
//!     let handle_1 = tokio::spawn(read(reader.clone(), 1));
//!
//!     let data_0 = handle_0.await.expect("thread panicked")?;
//!     let data_1 = handle_1.await.expect("thread panicked")?;
//!
//!     // Use data within current scope.
//!
//!     Ok(())
//! }
//!
//! async fn read(reader: ZipFileReader<Vec<u8>>, index: usize) -> Result<Vec<u8>> {
//!     let mut entry = reader.entry(index).await?;
//!     let mut data = Vec::new();
//!     entry.read_to_end_checked(&mut data).await?;
//!     Ok(data)
//! }
//! ```

use crate::base::read::io::entry::ZipEntryReader;
use crate::entry::ZipEntry;
use crate::error::{Result, ZipError};
use crate::file::ZipFile;
use crate::store::ByteStore;

use std::sync::Arc;

struct Inner<S> {
    store: S,
    size: u64,
    file: ZipFile,
}

/// A concurrent ZIP reader which acts over any [`ByteStore`] of a known size.
pub struct ZipFileReader<S> {
    inner: Arc<Inner<S>>,
}

impl<S> std::fmt::Debug for ZipFileReader<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZipFileReader").field("size", &self.inner.size).field("file", &self.inner.file).finish()
    }
}

impl<S> Clone for ZipFileReader<S> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<S> ZipFileReader<S>
where
    S: ByteStore,
{
    /// Constructs a new ZIP reader from a store and its total size in bytes.
    ///
    /// This locates the end of central directory record and reads every central directory record. No partial reader
    /// is returned on failure.
    pub async fn new(store: S, size: u64) -> Result<ZipFileReader<S>> {
        let file = crate::base::read::file(&store, size).await?;
        Ok(ZipFileReader::from_raw_parts(store, size, file))
    }

    /// Constructs a ZIP reader from a store, its size, and ZIP file information derived from that store.
    ///
    /// Providing a [`ZipFile`] that wasn't derived from that store may lead to inaccurate parsing.
    pub fn from_raw_parts(store: S, size: u64, file: ZipFile) -> ZipFileReader<S> {
        ZipFileReader { inner: Arc::new(Inner { store, size, file }) }
    }

    /// Returns this ZIP file's information.
    pub fn file(&self) -> &ZipFile {
        &self.inner.file
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.inner.store
    }

    /// Returns the size of the underlying store provided during construction.
    pub fn size(&self) -> u64 {
        self.inner.size
    }

    /// Returns a new entry reader if the provided index is valid.
    pub async fn entry(&self, index: usize) -> Result<ZipEntryReader<'_, S>> {
        let entry = self.inner.file.entries.get(index).ok_or(ZipError::EntryIndexOutOfBounds)?;
        self.open(entry).await
    }

    /// Returns a new entry reader over the provided entry's data.
    ///
    /// Each call constructs an independent reader, so an entry can be opened (and verified) any number of times.
    pub async fn open(&self, entry: &ZipEntry) -> Result<ZipEntryReader<'_, S>> {
        crate::base::read::entry(&self.inner.store, self.inner.size, entry).await
    }
}
