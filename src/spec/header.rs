// Copyright (c) 2021 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! Fixed-field portions of each record, decoded by fixed-offset little-endian extraction.
//!
//! Each `From<[u8; N]>` conversion takes the full fixed-size record including its leading signature (where one
//! exists); asserting that signature is left to the caller.

use crate::spec::consts::{
    CDH_LENGTH, DATA_DESCRIPTOR_LENGTH, EOCDR_LENGTH, FLAG_DATA_DESCRIPTOR, FLAG_ENCRYPTED, FLAG_UTF8, LFH_LENGTH,
};
use crate::utils::{le_u16, le_u32};

// https://github.com/Majored/rs-async-zip/blob/main/SPECIFICATION.md#444
/// The general purpose bit flag of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GeneralPurposeFlag {
    pub(crate) raw: u16,
}

impl GeneralPurposeFlag {
    /// Returns the raw 16-bit flag value.
    pub fn raw(&self) -> u16 {
        self.raw
    }

    /// Returns whether the entry's data is encrypted.
    pub fn encrypted(&self) -> bool {
        self.raw & FLAG_ENCRYPTED != 0
    }

    /// Returns whether the entry's CRC32 & sizes follow its data in a data descriptor.
    pub fn data_descriptor(&self) -> bool {
        self.raw & FLAG_DATA_DESCRIPTOR != 0
    }

    /// Returns whether the entry's filename & comment are UTF-8 encoded.
    pub fn filename_unicode(&self) -> bool {
        self.raw & FLAG_UTF8 != 0
    }
}

impl From<u16> for GeneralPurposeFlag {
    fn from(raw: u16) -> GeneralPurposeFlag {
        GeneralPurposeFlag { raw }
    }
}

// https://github.com/Majored/rs-async-zip/blob/main/SPECIFICATION.md#437
/// The fields of a local file header needed to measure it.
///
/// The CRC & size copies held here are less authoritative than the central directory's and are never read.
#[derive(Debug, Clone, Copy)]
pub struct LocalFileHeader {
    pub signature: u32,
    pub file_name_length: u16,
    pub extra_field_length: u16,
}

impl LocalFileHeader {
    /// Returns the offset of the entry's data relative to the start of this header.
    pub fn data_offset(&self) -> u64 {
        LFH_LENGTH as u64 + self.file_name_length as u64 + self.extra_field_length as u64
    }
}

impl From<[u8; LFH_LENGTH]> for LocalFileHeader {
    fn from(value: [u8; LFH_LENGTH]) -> LocalFileHeader {
        LocalFileHeader {
            signature: le_u32(&value, 0),
            file_name_length: le_u16(&value, 26),
            extra_field_length: le_u16(&value, 28),
        }
    }
}

// https://github.com/Majored/rs-async-zip/blob/main/SPECIFICATION.md#4312
#[derive(Debug, Clone, Copy)]
pub struct CentralDirectoryRecord {
    pub v_made_by: u16,
    pub v_needed: u16,
    pub flags: GeneralPurposeFlag,
    pub compression: u16,
    pub mod_time: u16,
    pub mod_date: u16,
    pub crc: u32,
    pub compressed_size: u32,
    pub uncompressed_size: u32,
    pub file_name_length: u16,
    pub extra_field_length: u16,
    pub file_comment_length: u16,
    pub exter_attr: u32,
    pub lh_offset: u32,
}

impl From<[u8; CDH_LENGTH]> for CentralDirectoryRecord {
    fn from(value: [u8; CDH_LENGTH]) -> CentralDirectoryRecord {
        CentralDirectoryRecord {
            v_made_by: le_u16(&value, 4),
            v_needed: le_u16(&value, 6),
            flags: GeneralPurposeFlag::from(le_u16(&value, 8)),
            compression: le_u16(&value, 10),
            mod_time: le_u16(&value, 12),
            mod_date: le_u16(&value, 14),
            crc: le_u32(&value, 16),
            compressed_size: le_u32(&value, 20),
            uncompressed_size: le_u32(&value, 24),
            file_name_length: le_u16(&value, 28),
            extra_field_length: le_u16(&value, 30),
            file_comment_length: le_u16(&value, 32),
            // Skipped: disk number start (34..36) & internal attributes (36..38).
            exter_attr: le_u32(&value, 38),
            lh_offset: le_u32(&value, 42),
        }
    }
}

// https://github.com/Majored/rs-async-zip/blob/main/SPECIFICATION.md#4316
#[derive(Debug, Clone, Copy)]
pub struct EndOfCentralDirectoryHeader {
    pub(crate) disk_num: u16,
    pub(crate) start_cent_dir_disk: u16,
    pub(crate) num_of_entries_disk: u16,
    pub(crate) num_of_entries: u16,
    pub(crate) size_cent_dir: u32,
    pub(crate) cent_dir_offset: u32,
    pub(crate) file_comm_length: u16,
}

impl From<&[u8; EOCDR_LENGTH]> for EndOfCentralDirectoryHeader {
    fn from(value: &[u8; EOCDR_LENGTH]) -> EndOfCentralDirectoryHeader {
        EndOfCentralDirectoryHeader {
            disk_num: le_u16(value, 4),
            start_cent_dir_disk: le_u16(value, 6),
            num_of_entries_disk: le_u16(value, 8),
            num_of_entries: le_u16(value, 10),
            size_cent_dir: le_u32(value, 12),
            cent_dir_offset: le_u32(value, 16),
            file_comm_length: le_u16(value, 20),
        }
    }
}

// https://github.com/Majored/rs-async-zip/blob/main/SPECIFICATION.md#439
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataDescriptor {
    pub crc: u32,
    pub compressed_size: u32,
    pub uncompressed_size: u32,
}

impl From<&[u8]> for DataDescriptor {
    /// Decodes the descriptor from its first [`DATA_DESCRIPTOR_LENGTH`] bytes (signature already stripped).
    fn from(value: &[u8]) -> DataDescriptor {
        debug_assert!(value.len() >= DATA_DESCRIPTOR_LENGTH);
        DataDescriptor {
            crc: le_u32(value, 0),
            compressed_size: le_u32(value, 4),
            uncompressed_size: le_u32(value, 8),
        }
    }
}
