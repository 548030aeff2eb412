// Copyright (c) 2022-2023 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! A module which supports reading ZIP files.

#[cfg(any(unix, windows))]
pub mod fs;
pub mod mem;
pub mod store;

pub(crate) mod io;

// Re-exported as part of the public API.
pub use crate::base::read::io::entry::ZipEntryReader;
pub use crate::spec::header::DataDescriptor;

use crate::base::read::io::entry::ExpectedCrc;
use crate::base::read::io::range::ByteRange;
use crate::entry::ZipEntry;
use crate::error::{Result, ZipError};
use crate::file::ZipFile;
use crate::spec::consts::{CDH_LENGTH, CDH_RECORD, CDH_SIGNATURE, LFH_LENGTH, LFH_RECORD, LFH_SIGNATURE};
use crate::spec::header::{CentralDirectoryRecord, LocalFileHeader};
use crate::store::ByteStore;
use crate::string::{StringEncoding, ZipString};
use crate::utils::{assert_signature, read_array, read_bytes};

use futures_lite::io::{AsyncRead, AsyncReadExt, BufReader};

/// The max buffer size used when parsing the central directory, equal to 20MiB.
const MAX_CD_BUFFER_SIZE: usize = 20 * 1024 * 1024;

/// The min buffer size used when parsing the central directory, equal to 8KiB.
const MIN_CD_BUFFER_SIZE: usize = 8 * 1024;

/// Locates the end of central directory record and parses the central directory of a store with the given size.
#[tracing::instrument(skip(store))]
pub(crate) async fn file<S>(store: &S, size: u64) -> Result<ZipFile>
where
    S: ByteStore + ?Sized,
{
    let end = crate::base::read::io::locator::eocdr(store, size).await?;
    let comment = ZipString::new(end.comment, StringEncoding::Utf8);

    // Spanning/split fields are accepted as-is; this reader always treats the store as a single disk.
    let offset = end.header.cent_dir_offset as u64;
    tracing::debug!(
        offset,
        size = end.header.size_cent_dir,
        records = end.header.num_of_entries,
        records_on_disk = end.header.num_of_entries_disk,
        disk = end.header.disk_num,
        directory_disk = end.header.start_cent_dir_disk,
        "reading central directory"
    );

    // To avoid lots of small positioned reads when parsing the central directory, we use a BufReader that can read
    // the whole central directory at once.
    let remaining = size.saturating_sub(offset);
    let capacity = cd_buffer_capacity(end.header.size_cent_dir, remaining);
    let range = ByteRange::new(store, offset, remaining);
    let entries = cd(BufReader::with_capacity(capacity, range), end.header.num_of_entries).await?;

    Ok(ZipFile { entries, comment })
}

/// Sizes the central directory buffer from the declared directory size, which is untrusted, so it's also bounded by
/// the bytes actually remaining in the store.
pub(crate) fn cd_buffer_capacity(declared: u32, remaining: u64) -> usize {
    let remaining = usize::try_from(remaining).unwrap_or(usize::MAX);
    (declared as usize).min(remaining).clamp(MIN_CD_BUFFER_SIZE, MAX_CD_BUFFER_SIZE)
}

/// Reads central directory records until one fails to parse.
///
/// The count of entries stored within the EOCDR is truncated to fit within a u16, so it can't be trusted for archives
/// with more than 65535 entries. Instead, records are read until a bad signature or truncated record is encountered,
/// and that failure is only surfaced if the number of records read, modulo 65536, doesn't match the declared count.
pub(crate) async fn cd<R>(mut reader: R, declared: u16) -> Result<Vec<ZipEntry>>
where
    R: AsyncRead + Unpin,
{
    let mut entries = Vec::with_capacity(declared.into());

    let terminator = loop {
        match cd_record(&mut reader).await {
            Ok(entry) => entries.push(entry),
            Err(err) if err.terminates_directory() => break err,
            Err(err) => return Err(err),
        }
    };

    if entries.len() as u16 != declared {
        tracing::debug!(read = entries.len(), declared, "central directory count mismatch");
        return Err(terminator);
    }

    if entries.len() != declared as usize {
        tracing::warn!(read = entries.len(), declared, "central directory count only matches modulo 65536");
    }

    Ok(entries)
}

/// Reads a single central directory record, including its filename, extra field, and comment.
#[tracing::instrument(skip(reader))]
pub(crate) async fn cd_record<R>(mut reader: R) -> Result<ZipEntry>
where
    R: AsyncRead + Unpin,
{
    let record: [u8; CDH_LENGTH] = read_array(&mut reader, CDH_RECORD).await?;
    assert_signature(&record, CDH_SIGNATURE)?;

    let header = CentralDirectoryRecord::from(record);
    let filename = read_bytes(&mut reader, header.file_name_length.into(), CDH_RECORD).await?;
    let extra_field = read_bytes(&mut reader, header.extra_field_length.into(), CDH_RECORD).await?;
    let comment = read_bytes(&mut reader, header.file_comment_length.into(), CDH_RECORD).await?;

    Ok(ZipEntry::from_record(&header, filename, extra_field, comment))
}

/// Validates the local file header at `offset` and returns the offset of the entry's data relative to it.
///
/// Only the fixed portion of the header is read; the filename & extra field are skipped over using their lengths.
#[tracing::instrument(skip(store))]
pub(crate) async fn lfh<S>(store: &S, size: u64, offset: u64) -> Result<u64>
where
    S: ByteStore + ?Sized,
{
    let range = ByteRange::new(store, offset, size.saturating_sub(offset));
    let header = LocalFileHeader::from(read_array::<_, LFH_LENGTH>(range, LFH_RECORD).await?);

    if header.signature != LFH_SIGNATURE {
        return Err(ZipError::UnexpectedHeaderError(header.signature, LFH_SIGNATURE));
    }

    Ok(header.data_offset())
}

/// Constructs a verifying entry reader over an entry's data.
#[tracing::instrument(skip(store, entry), fields(filename = %entry.filename().to_string_lossy()))]
pub(crate) async fn entry<'a, S>(store: &'a S, size: u64, entry: &ZipEntry) -> Result<ZipEntryReader<'a, S>>
where
    S: ByteStore + ?Sized,
{
    // Fail before any I/O for methods we can't decompress.
    let compression = entry.compression()?;

    let data_offset = entry.header_offset() + lfh(store, size, entry.header_offset()).await?;
    let compressed_size = entry.compressed_size();

    let (range_end, limit, expected) = if entry.data_descriptor() {
        // The view spans to the end of the store so the descriptor remains readable after the data. If the size is
        // also unknown, we rely on the decoder to stop consuming once its stream has ended.
        let limit = if compressed_size == 0 { u64::MAX } else { compressed_size };
        (size, limit, ExpectedCrc::Deferred)
    } else {
        (data_offset.saturating_add(compressed_size), compressed_size, ExpectedCrc::Known(entry.crc32()))
    };

    tracing::debug!(data_offset, limit, "opening entry");

    let range = ByteRange::new(store, data_offset, range_end.saturating_sub(data_offset));
    let reader = BufReader::new(range).take(limit);

    Ok(ZipEntryReader::new(reader, compression, expected))
}
