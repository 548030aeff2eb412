// Copyright (c) 2021-2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::error::{Result, ZipError};

use futures_lite::io::{AsyncRead, AsyncReadExt};

/// Extracts a little-endian u16 from the two bytes at `offset`.
///
/// Callers index into fixed-size record arrays, so an out-of-range offset is a programming error.
#[inline]
pub(crate) fn le_u16(buffer: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([buffer[offset], buffer[offset + 1]])
}

/// Extracts a little-endian u32 from the four bytes at `offset`.
#[inline]
pub(crate) fn le_u32(buffer: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([buffer[offset], buffer[offset + 1], buffer[offset + 2], buffer[offset + 3]])
}

/// Maps a short read into [`ZipError::UnexpectedEof`], naming the record which was being read.
pub(crate) fn map_eof(record: &'static str) -> impl FnOnce(std::io::Error) -> ZipError {
    move |err| match err.kind() {
        std::io::ErrorKind::UnexpectedEof => ZipError::UnexpectedEof(record),
        _ => err.into(),
    }
}

/// Reads a fixed-size record from a reader which impls AsyncRead.
pub(crate) async fn read_array<R, const N: usize>(mut reader: R, record: &'static str) -> Result<[u8; N]>
where
    R: AsyncRead + Unpin,
{
    let mut buffer = [0; N];
    reader.read_exact(&mut buffer).await.map_err(map_eof(record))?;
    Ok(buffer)
}

/// Read and return a dynamic length vector of bytes from a reader which impls AsyncRead.
///
/// Unlike a bare `take()` + `read_to_end()`, this fails if the reader ends before `length` bytes were produced.
pub(crate) async fn read_bytes<R>(mut reader: R, length: usize, record: &'static str) -> Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let mut buffer = vec![0; length];
    reader.read_exact(&mut buffer).await.map_err(map_eof(record))?;
    Ok(buffer)
}

/// Assert that the first four bytes of a record match the expected signature.
pub(crate) fn assert_signature(record: &[u8], expected: u32) -> Result<()> {
    match le_u32(record, 0) {
        actual if actual == expected => Ok(()),
        actual => Err(ZipError::UnexpectedHeaderError(actual, expected)),
    }
}
