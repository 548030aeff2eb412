// Copyright (c) 2022 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! <https://github.com/Majored/rs-async-zip/blob/main/SPECIFICATION.md#4316>
//!
//! As with other ZIP libraries, we face the predicament that the end of central directory record may contain a
//! variable-length file comment. As a result, we cannot just make the assumption that the start of this record is
//! 22 bytes offset from the end of the data - we must locate it ourselves.
//!
//! We read a window from the tail of the store and search it in reverse for the EOCDR signature. A signature match is
//! only accepted if the record's declared comment length accounts for every remaining byte of the window, which
//! rejects signature bytes that coincidentally appear within a comment or within entry data.
//!
//! Most archives have no (or a short) comment, so a small window is tried first. The second window covers the
//! largest possible record: 22 fixed bytes plus a comment of up to `u16::MAX` bytes.

use crate::base::read::io::range::ByteRange;
use crate::error::{Result, ZipError};
use crate::spec::consts::{EOCDR_LENGTH, EOCDR_RECORD, EOCDR_SIGNATURE, SIGNATURE_LENGTH};
use crate::spec::header::EndOfCentralDirectoryHeader;
use crate::store::ByteStore;
use crate::utils::{le_u16, map_eof};

use futures_lite::io::AsyncReadExt;

/// The tail windows searched for the EOCDR, in order.
const SEARCH_WINDOWS: [u64; 2] = [1024, 65 * 1024];

/// A located & parsed end of central directory record.
#[derive(Debug)]
pub(crate) struct DirectoryEnd {
    pub(crate) header: EndOfCentralDirectoryHeader,
    pub(crate) comment: Vec<u8>,
}

/// Locate and parse the `end of central directory record` of a store with the given size.
#[tracing::instrument(skip(store))]
pub(crate) async fn eocdr<S>(store: &S, size: u64) -> Result<DirectoryEnd>
where
    S: ByteStore + ?Sized,
{
    for window in SEARCH_WINDOWS {
        let length = std::cmp::min(window, size);
        let start = size - length;

        let mut buffer = vec![0; length as usize];
        ByteRange::new(store, start, length).read_exact(&mut buffer).await.map_err(map_eof(EOCDR_RECORD))?;

        if let Some(index) = reverse_search_record(&buffer) {
            let mut record = [0; EOCDR_LENGTH];
            record.copy_from_slice(&buffer[index..index + EOCDR_LENGTH]);

            let header = EndOfCentralDirectoryHeader::from(&record);
            let comment = buffer.split_off(index + EOCDR_LENGTH);

            tracing::debug!(
                offset = start + index as u64,
                comment_length = header.file_comm_length,
                "located end of central directory record"
            );
            return Ok(DirectoryEnd { header, comment });
        }

        // A larger window can't uncover anything new once the whole store has been searched.
        if length == size {
            break;
        }
    }

    Err(ZipError::UnableToLocateEOCDR)
}

/// A reverse linear search along the buffer for a self-consistent EOCDR, returning the index of its signature.
///
/// A candidate at index `i` is consistent when `i + EOCDR_LENGTH + comment_length == buffer.len()`.
pub(crate) fn reverse_search_record(buffer: &[u8]) -> Option<usize> {
    let signature = EOCDR_SIGNATURE.to_le_bytes();
    let last = buffer.len().checked_sub(EOCDR_LENGTH)?;

    for index in (0..=last).rev() {
        if buffer[index..index + SIGNATURE_LENGTH] != signature {
            continue;
        }

        let comment_length = le_u16(buffer, index + EOCDR_LENGTH - 2) as usize;
        if index + EOCDR_LENGTH + comment_length == buffer.len() {
            return Some(index);
        }
    }

    None
}
