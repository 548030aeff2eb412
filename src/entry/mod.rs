// Copyright (c) 2022 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::date::ZipDateTime;
use crate::error::Result;
use crate::spec::compression::Compression;
use crate::spec::header::{CentralDirectoryRecord, GeneralPurposeFlag};
use crate::string::ZipString;

/// The host system value (upper byte of "version made by") of archives created on Unix.
const UNIX_HOST: u16 = 3;

/// An immutable store of data about a ZIP entry, as recorded within the central directory.
///
/// # Deferred sizes
/// Entries with the [`GeneralPurposeFlag::data_descriptor()`] flag set were written by streaming archivers. Their
/// CRC32 & sizes may read as zero here; the authoritative values are only known once the entry has been read in full
/// (see [`ZipEntryReader::data_descriptor()`](crate::base::read::ZipEntryReader::data_descriptor)).
#[derive(Debug, Clone)]
pub struct ZipEntry {
    pub(crate) filename: ZipString,
    pub(crate) comment: ZipString,
    pub(crate) extra_field: Vec<u8>,
    pub(crate) compression: u16,
    pub(crate) flags: GeneralPurposeFlag,
    pub(crate) version_made_by: u16,
    pub(crate) version_needed: u16,
    pub(crate) last_modification_date: ZipDateTime,
    pub(crate) crc32: u32,
    pub(crate) compressed_size: u64,
    pub(crate) uncompressed_size: u64,
    pub(crate) external_file_attribute: u32,
    pub(crate) header_offset: u64,
}

impl ZipEntry {
    /// Constructs an entry from a central directory record and its variable-length fields.
    pub(crate) fn from_record(
        record: &CentralDirectoryRecord,
        filename: Vec<u8>,
        extra_field: Vec<u8>,
        comment: Vec<u8>,
    ) -> Self {
        let unicode = record.flags.filename_unicode();

        Self {
            filename: ZipString::detect(filename, unicode),
            comment: ZipString::detect(comment, unicode),
            extra_field,
            compression: record.compression,
            flags: record.flags,
            version_made_by: record.v_made_by,
            version_needed: record.v_needed,
            last_modification_date: ZipDateTime { date: record.mod_date, time: record.mod_time },
            crc32: record.crc,
            compressed_size: record.compressed_size.into(),
            uncompressed_size: record.uncompressed_size.into(),
            external_file_attribute: record.exter_attr,
            header_offset: record.lh_offset.into(),
        }
    }

    /// Returns the entry's filename.
    ///
    /// # Note
    /// This will return the raw filename stored during ZIP creation. If calling this method on entries retrieved from
    /// untrusted ZIP files, the filename should be sanitised before being used as a path to prevent [directory
    /// travesal attacks](https://en.wikipedia.org/wiki/Directory_traversal_attack).
    pub fn filename(&self) -> &ZipString {
        &self.filename
    }

    /// Returns the entry's file comment.
    pub fn comment(&self) -> &ZipString {
        &self.comment
    }

    /// Returns the entry's raw extra field data.
    pub fn extra_field(&self) -> &[u8] {
        &self.extra_field
    }

    /// Returns the entry's raw compression method code.
    pub fn compression_method(&self) -> u16 {
        self.compression
    }

    /// Returns the entry's compression method, or [`ZipError::CompressionNotSupported`] for unknown methods.
    ///
    /// [`ZipError::CompressionNotSupported`]: crate::error::ZipError::CompressionNotSupported
    pub fn compression(&self) -> Result<Compression> {
        Compression::try_from(self.compression)
    }

    /// Returns the entry's general purpose flag.
    pub fn flags(&self) -> GeneralPurposeFlag {
        self.flags
    }

    /// Returns whether the entry's CRC32 & sizes are deferred to a data descriptor following its data.
    pub fn data_descriptor(&self) -> bool {
        self.flags.data_descriptor()
    }

    /// Returns the raw "version made by" field.
    pub fn version_made_by(&self) -> u16 {
        self.version_made_by
    }

    /// Returns the raw "version needed to extract" field.
    pub fn version_needed(&self) -> u16 {
        self.version_needed
    }

    /// Returns the entry's last modification time & date.
    pub fn last_modification_date(&self) -> &ZipDateTime {
        &self.last_modification_date
    }

    /// Returns the entry's CRC32 value.
    pub fn crc32(&self) -> u32 {
        self.crc32
    }

    /// Returns the entry's compressed size.
    pub fn compressed_size(&self) -> u64 {
        self.compressed_size
    }

    /// Returns the entry's uncompressed size.
    pub fn uncompressed_size(&self) -> u64 {
        self.uncompressed_size
    }

    /// Returns the entry's external file attribute.
    pub fn external_file_attribute(&self) -> u32 {
        self.external_file_attribute
    }

    /// Returns the entry's Unix permission bits, if the entry was created on a Unix host.
    pub fn unix_permissions(&self) -> Option<u16> {
        if self.version_made_by >> 8 != UNIX_HOST {
            return None;
        }

        Some((self.external_file_attribute >> 16) as u16)
    }

    /// Returns the offset of the entry's local file header within the ZIP file.
    pub fn header_offset(&self) -> u64 {
        self.header_offset
    }

    /// Returns whether or not the entry represents a directory.
    pub fn dir(&self) -> bool {
        self.filename.as_bytes().ends_with(b"/")
    }
}
