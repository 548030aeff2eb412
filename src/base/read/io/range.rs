// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::base::read::io::poll_result_ok;
use crate::store::ByteStore;

use std::pin::Pin;
use std::task::{ready, Context, Poll};

use futures_lite::io::AsyncRead;

/// A read-only view over `[offset, offset + length)` of a [`ByteStore`].
///
/// Each view tracks its own position, so views over the same store never interfere with one another.
#[derive(Debug)]
pub struct ByteRange<'a, S: ?Sized> {
    store: &'a S,
    offset: u64,
    length: u64,
    position: u64,
}

impl<'a, S> ByteRange<'a, S>
where
    S: ByteStore + ?Sized,
{
    /// Constructs a new view over `length` bytes of the store, starting at `offset`.
    pub fn new(store: &'a S, offset: u64, length: u64) -> Self {
        Self { store, offset, length, position: 0 }
    }

    /// Returns the number of bytes which have not yet been read from this view.
    pub fn remaining(&self) -> u64 {
        self.length - self.position
    }

    /// Returns the number of bytes read from this view so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Returns the absolute offset within the store of the next byte to be read.
    pub fn absolute_position(&self) -> u64 {
        self.offset + self.position
    }
}

impl<S> AsyncRead for ByteRange<'_, S>
where
    S: ByteStore + ?Sized,
{
    fn poll_read(self: Pin<&mut Self>, c: &mut Context<'_>, b: &mut [u8]) -> Poll<std::io::Result<usize>> {
        let this = self.get_mut();

        let limit = std::cmp::min(this.remaining(), b.len() as u64) as usize;
        if limit == 0 {
            return Poll::Ready(Ok(0));
        }

        let offset = this.absolute_position();
        let read = poll_result_ok!(ready!(this.store.poll_read_at(c, offset, &mut b[..limit])));
        this.position += read as u64;

        Poll::Ready(Ok(read))
    }
}
