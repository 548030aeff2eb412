// Copyright (c) 2022 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! A concurrent ZIP reader which acts over a file system path.
//!
//! The file is opened once and shared between all entry readers. Reads are issued via the OS's positioned read
//! primitive (`pread` on Unix), which don't disturb a shared cursor, so no locking or re-opening is needed to read
//! entries concurrently.
//!
//! Note that these positioned reads are blocking; each poll of an entry reader may block the calling thread on disk
//! I/O. Wrap reads in your runtime's blocking facility if that matters for your use case.
//!
//! ### Example
//! ```no_run
//! # use async_unzip::base::read::fs::ZipFileReader;
//! # use async_unzip::error::Result;
//! #
//! async fn run() -> Result<()> {
//!     let reader = ZipFileReader::new("./foo.zip").await?;
//!
//!     let mut data = Vec::new();
//!     reader.entry(0).await?.read_to_end_checked(&mut data).await?;
//!
//!     // Use data within current scope.
//!
//!     Ok(())
//! }
//! ```

use crate::base::read::io::entry::ZipEntryReader;
use crate::base::read::store;
use crate::entry::ZipEntry;
use crate::error::Result;
use crate::file::ZipFile;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A concurrent ZIP reader which acts over a file system path.
#[derive(Debug, Clone)]
pub struct ZipFileReader {
    path: Arc<PathBuf>,
    reader: store::ZipFileReader<File>,
}

impl ZipFileReader {
    /// Constructs a new ZIP reader from a file system path.
    pub async fn new<P>(path: P) -> Result<ZipFileReader>
    where
        P: AsRef<Path>,
    {
        let file = File::open(&path)?;
        let size = file.metadata()?.len();

        let reader = store::ZipFileReader::new(file, size).await?;
        Ok(ZipFileReader { path: Arc::new(path.as_ref().to_owned()), reader })
    }

    /// Returns this ZIP file's information.
    pub fn file(&self) -> &ZipFile {
        self.reader.file()
    }

    /// Returns the file system path provided to the reader during construction.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns a new entry reader if the provided index is valid.
    pub async fn entry(&self, index: usize) -> Result<ZipEntryReader<'_, File>> {
        self.reader.entry(index).await
    }

    /// Returns a new entry reader over the provided entry's data.
    pub async fn open(&self, entry: &ZipEntry) -> Result<ZipEntryReader<'_, File>> {
        self.reader.open(entry).await
    }
}
