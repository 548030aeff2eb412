// Copyright (c) 2023 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

#![allow(dead_code)]

//! Helpers which assemble ZIP files byte-by-byte, so tests can control every field (including malformed ones).

use async_compression::futures::bufread::DeflateEncoder;
use futures_lite::io::AsyncReadExt;

pub const STORED: u16 = 0;
pub const DEFLATE: u16 = 8;

pub const FLAG_DATA_DESCRIPTOR: u16 = 0x8;
pub const DATA_DESCRIPTOR_SIGNATURE: u32 = 0x8074b50;

/// 1980-01-01 00:00:00 in MS-DOS format.
pub const DOS_DATE: u16 = 0x21;
pub const DOS_TIME: u16 = 0;

/// Regular file with 0644 permissions.
pub const UNIX_FILE_ATTRIBUTES: u32 = 0o100644 << 16;

pub const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt...";

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// How an entry's CRC32 & sizes are recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sizes {
    /// In both headers.
    Inline,
    /// Zeroed in both headers, and written in a data descriptor without its optional signature.
    Deferred,
    /// Zeroed in both headers, and written in a data descriptor with its optional signature.
    DeferredSigned,
    /// Kept in the central directory, but also written in a signed data descriptor (as many streaming writers do).
    DeferredWithDirectorySizes,
}

#[derive(Debug, Clone)]
pub struct TestEntry {
    pub name: Vec<u8>,
    pub method: u16,
    pub body: Vec<u8>,
    pub crc: u32,
    pub uncompressed_size: u32,
    pub sizes: Sizes,
    pub comment: Vec<u8>,
}

impl TestEntry {
    pub fn stored(name: &str, data: &[u8]) -> Self {
        Self::raw(name, STORED, data.to_vec(), data)
    }

    pub async fn deflated(name: &str, data: &[u8]) -> Self {
        Self::raw(name, DEFLATE, deflate(data).await, data)
    }

    /// An entry with an arbitrary method code, whose body is the given bytes.
    pub fn raw(name: &str, method: u16, body: Vec<u8>, data: &[u8]) -> Self {
        Self {
            name: name.as_bytes().to_vec(),
            method,
            body,
            crc: crc32fast::hash(data),
            uncompressed_size: data.len() as u32,
            sizes: Sizes::Inline,
            comment: Vec::new(),
        }
    }

    pub fn sizes(mut self, sizes: Sizes) -> Self {
        self.sizes = sizes;
        self
    }

    pub fn comment(mut self, comment: &str) -> Self {
        self.comment = comment.as_bytes().to_vec();
        self
    }

    fn flags(&self) -> u16 {
        match self.sizes {
            Sizes::Inline => 0,
            _ => FLAG_DATA_DESCRIPTOR,
        }
    }

    /// The (crc, compressed size, uncompressed size) triple written into the local file header.
    fn local_sizes(&self) -> (u32, u32, u32) {
        match self.sizes {
            Sizes::Inline => (self.crc, self.body.len() as u32, self.uncompressed_size),
            _ => (0, 0, 0),
        }
    }

    /// The (crc, compressed size, uncompressed size) triple written into the central directory.
    fn directory_sizes(&self) -> (u32, u32, u32) {
        match self.sizes {
            Sizes::Inline | Sizes::DeferredWithDirectorySizes => {
                (self.crc, self.body.len() as u32, self.uncompressed_size)
            }
            _ => (0, 0, 0),
        }
    }
}

pub async fn deflate(data: &[u8]) -> Vec<u8> {
    let mut encoder = DeflateEncoder::new(data);
    let mut compressed = Vec::new();
    encoder.read_to_end(&mut compressed).await.expect("failed to deflate test data");
    compressed
}

/// Assembles a ZIP file from its entries, recording where each part landed.
#[derive(Debug, Default)]
pub struct ArchiveBuilder {
    data: Vec<u8>,
    directory: Vec<u8>,
    count: usize,
    /// The offset of each entry's data within the archive.
    pub data_offsets: Vec<usize>,
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(mut self, entry: &TestEntry) -> Self {
        self.push(entry);
        self
    }

    pub fn push(&mut self, entry: &TestEntry) {
        let header_offset = self.data.len() as u32;
        let (crc, compressed, uncompressed) = entry.local_sizes();

        put_u32(&mut self.data, 0x4034b50);
        put_u16(&mut self.data, 20);
        put_u16(&mut self.data, entry.flags());
        put_u16(&mut self.data, entry.method);
        put_u16(&mut self.data, DOS_TIME);
        put_u16(&mut self.data, DOS_DATE);
        put_u32(&mut self.data, crc);
        put_u32(&mut self.data, compressed);
        put_u32(&mut self.data, uncompressed);
        put_u16(&mut self.data, entry.name.len() as u16);
        put_u16(&mut self.data, 0);
        self.data.extend_from_slice(&entry.name);

        self.data_offsets.push(self.data.len());
        self.data.extend_from_slice(&entry.body);

        match entry.sizes {
            Sizes::Inline => (),
            Sizes::Deferred => self.descriptor(entry, false),
            Sizes::DeferredSigned | Sizes::DeferredWithDirectorySizes => self.descriptor(entry, true),
        }

        let (crc, compressed, uncompressed) = entry.directory_sizes();

        put_u32(&mut self.directory, 0x2014b50);
        put_u16(&mut self.directory, (3 << 8) | 20);
        put_u16(&mut self.directory, 20);
        put_u16(&mut self.directory, entry.flags());
        put_u16(&mut self.directory, entry.method);
        put_u16(&mut self.directory, DOS_TIME);
        put_u16(&mut self.directory, DOS_DATE);
        put_u32(&mut self.directory, crc);
        put_u32(&mut self.directory, compressed);
        put_u32(&mut self.directory, uncompressed);
        put_u16(&mut self.directory, entry.name.len() as u16);
        put_u16(&mut self.directory, 0);
        put_u16(&mut self.directory, entry.comment.len() as u16);
        put_u16(&mut self.directory, 0);
        put_u16(&mut self.directory, 0);
        put_u32(&mut self.directory, UNIX_FILE_ATTRIBUTES);
        put_u32(&mut self.directory, header_offset);
        self.directory.extend_from_slice(&entry.name);
        self.directory.extend_from_slice(&entry.comment);

        self.count += 1;
    }

    fn descriptor(&mut self, entry: &TestEntry, signed: bool) {
        if signed {
            put_u32(&mut self.data, DATA_DESCRIPTOR_SIGNATURE);
        }
        put_u32(&mut self.data, entry.crc);
        put_u32(&mut self.data, entry.body.len() as u32);
        put_u32(&mut self.data, entry.uncompressed_size);
    }

    /// Writes the central directory & EOCDR, declaring the true entry count truncated to a u16.
    pub fn finish(self, comment: &[u8]) -> Vec<u8> {
        let declared = self.count as u16;
        self.finish_with_count(comment, declared)
    }

    /// Writes the central directory & EOCDR, declaring the given entry count.
    pub fn finish_with_count(mut self, comment: &[u8], declared: u16) -> Vec<u8> {
        let directory_offset = self.data.len() as u32;
        let directory_size = self.directory.len() as u32;
        self.data.append(&mut self.directory);

        put_u32(&mut self.data, 0x6054b50);
        put_u16(&mut self.data, 0);
        put_u16(&mut self.data, 0);
        put_u16(&mut self.data, declared);
        put_u16(&mut self.data, declared);
        put_u32(&mut self.data, directory_size);
        put_u32(&mut self.data, directory_offset);
        put_u16(&mut self.data, comment.len() as u16);
        self.data.extend_from_slice(comment);

        self.data
    }
}

pub fn put_u16(buffer: &mut Vec<u8>, value: u16) {
    buffer.extend_from_slice(&value.to_le_bytes());
}

pub fn put_u32(buffer: &mut Vec<u8>, value: u32) {
    buffer.extend_from_slice(&value.to_le_bytes());
}
