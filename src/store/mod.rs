// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! Random-access byte stores which ZIP files are read from.
//!
//! A [`ByteStore`] only offers positioned reads; there is no shared cursor. As a result, any number of entry readers
//! can be constructed over the same store concurrently, each tracking its own position within a
//! [`ByteRange`](crate::ByteRange).

use std::io::Result;
use std::sync::Arc;
use std::task::{Context, Poll};

/// A source of bytes which supports reads at arbitrary offsets.
///
/// Implementations return `Ok(0)` for reads starting at or beyond the end of the store. Reads may be short.
pub trait ByteStore {
    /// Attempts to read bytes starting at `offset` into `buf`, returning the number of bytes read.
    fn poll_read_at(&self, cx: &mut Context<'_>, offset: u64, buf: &mut [u8]) -> Poll<Result<usize>>;
}

impl ByteStore for [u8] {
    fn poll_read_at(&self, _: &mut Context<'_>, offset: u64, buf: &mut [u8]) -> Poll<Result<usize>> {
        let start = match usize::try_from(offset) {
            Ok(start) if start < self.len() => start,
            _ => return Poll::Ready(Ok(0)),
        };

        let available = &self[start..];
        let read = std::cmp::min(available.len(), buf.len());
        buf[..read].copy_from_slice(&available[..read]);

        Poll::Ready(Ok(read))
    }
}

impl ByteStore for Vec<u8> {
    fn poll_read_at(&self, cx: &mut Context<'_>, offset: u64, buf: &mut [u8]) -> Poll<Result<usize>> {
        self.as_slice().poll_read_at(cx, offset, buf)
    }
}

impl<T: ByteStore + ?Sized> ByteStore for &T {
    fn poll_read_at(&self, cx: &mut Context<'_>, offset: u64, buf: &mut [u8]) -> Poll<Result<usize>> {
        (**self).poll_read_at(cx, offset, buf)
    }
}

impl<T: ByteStore + ?Sized> ByteStore for Box<T> {
    fn poll_read_at(&self, cx: &mut Context<'_>, offset: u64, buf: &mut [u8]) -> Poll<Result<usize>> {
        (**self).poll_read_at(cx, offset, buf)
    }
}

impl<T: ByteStore + ?Sized> ByteStore for Arc<T> {
    fn poll_read_at(&self, cx: &mut Context<'_>, offset: u64, buf: &mut [u8]) -> Poll<Result<usize>> {
        (**self).poll_read_at(cx, offset, buf)
    }
}

/// A file read via the OS's positioned read primitive.
///
/// The read blocks the calling thread until the OS returns; it never returns [`Poll::Pending`].
#[cfg(any(unix, windows))]
impl ByteStore for std::fs::File {
    fn poll_read_at(&self, _: &mut Context<'_>, offset: u64, buf: &mut [u8]) -> Poll<Result<usize>> {
        #[cfg(unix)]
        let result = std::os::unix::fs::FileExt::read_at(self, buf, offset);
        #[cfg(windows)]
        let result = std::os::windows::fs::FileExt::seek_read(self, buf, offset);

        Poll::Ready(result)
    }
}
