// Copyright (c) 2022 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::base::read::io::{compressed::CompressedReader, poll_result_ok, range::ByteRange};
use crate::error::{Result, ZipError};
use crate::spec::consts::{DATA_DESCRIPTOR_LENGTH, DATA_DESCRIPTOR_RECORD, DATA_DESCRIPTOR_SIGNATURE, SIGNATURE_LENGTH};
use crate::spec::header::DataDescriptor;
use crate::spec::Compression;
use crate::store::ByteStore;
use crate::utils::le_u32;

use std::pin::Pin;
use std::task::{ready, Context, Poll};

use crc32fast::Hasher;
use futures_lite::io::{AsyncBufRead, AsyncRead, AsyncReadExt, BufReader, Take};
use pin_project::pin_project;

/// The upstream reader of an entry: its bounded view, buffered, and limited to the compressed size when known.
pub(crate) type BodyReader<'a, S> = Take<BufReader<ByteRange<'a, S>>>;

/// Where the authoritative CRC32 value for an entry comes from.
#[derive(Debug, Clone, Copy)]
pub(crate) enum ExpectedCrc {
    /// The central directory's value.
    Known(u32),
    /// A data descriptor directly following the compressed data.
    Deferred,
}

#[derive(Debug)]
enum State {
    Reading,
    /// Collecting the data descriptor; `compressed` counts the bytes the decoder consumed.
    Descriptor { buffer: [u8; SIGNATURE_LENGTH + DATA_DESCRIPTOR_LENGTH], filled: usize, compressed: u64 },
    Finished,
    Mismatched,
    Truncated,
}

/// A ZIP entry reader which may implement decompression.
///
/// A CRC32 hash is computed over all bytes yielded by this reader. Once the decompressed data has been exhausted, the
/// hash is compared against the entry's CRC32 (read from the data descriptor for entries which defer it). A mismatch
/// is reported as a [`ZipError::CRC32CheckError`] (wrapped within an [`std::io::Error`]) in place of EOF.
///
/// Bytes yielded before a mismatch is detected are not retracted, so data should only be trusted once EOF has been
/// reached without error. [`ZipEntryReader::read_to_end_checked()`] does just that.
#[pin_project]
pub struct ZipEntryReader<'a, S: ?Sized> {
    #[pin]
    reader: CompressedReader<BodyReader<'a, S>>,
    hasher: Hasher,
    expected: ExpectedCrc,
    descriptor: Option<DataDescriptor>,
    state: State,
}

impl<S: ?Sized> std::fmt::Debug for ZipEntryReader<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZipEntryReader")
            .field("expected", &self.expected)
            .field("descriptor", &self.descriptor)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<'a, S> ZipEntryReader<'a, S>
where
    S: ByteStore + ?Sized,
{
    /// Constructs a new entry reader from its required parameters.
    pub(crate) fn new(reader: BodyReader<'a, S>, compression: Compression, expected: ExpectedCrc) -> Self {
        let reader = CompressedReader::new(reader, compression);
        Self { reader, hasher: Hasher::default(), expected, descriptor: None, state: State::Reading }
    }

    /// Returns the data descriptor read after the entry's compressed data, if the entry defers its CRC32 & sizes.
    ///
    /// This is only populated once EOF has been reached.
    pub fn data_descriptor(&self) -> Option<&DataDescriptor> {
        self.descriptor.as_ref()
    }

    /// Reads all bytes until EOF has been reached, appending them to buf, and verifies the CRC32 values.
    ///
    /// This is a helper function synonymous to [`AsyncReadExt::read_to_end()`].
    pub async fn read_to_end_checked(&mut self, buf: &mut Vec<u8>) -> Result<usize> {
        Ok(self.read_to_end(buf).await?)
    }

    /// Reads all bytes until EOF has been reached, placing them into buf, and verifies the CRC32 values.
    ///
    /// This is a helper function synonymous to [`AsyncReadExt::read_to_string()`].
    pub async fn read_to_string_checked(&mut self, buf: &mut String) -> Result<usize> {
        Ok(self.read_to_string(buf).await?)
    }
}

impl<S> AsyncRead for ZipEntryReader<'_, S>
where
    S: ByteStore + ?Sized,
{
    fn poll_read(self: Pin<&mut Self>, c: &mut Context<'_>, b: &mut [u8]) -> Poll<std::io::Result<usize>> {
        let mut project = self.project();

        loop {
            match project.state {
                State::Reading => {
                    let read = poll_result_ok!(ready!(project.reader.as_mut().poll_read(c, b)));

                    if read != 0 || b.is_empty() {
                        project.hasher.update(&b[..read]);
                        return Poll::Ready(Ok(read));
                    }

                    match project.expected {
                        ExpectedCrc::Known(crc) => return Poll::Ready(verify(project.hasher, project.state, *crc)),
                        ExpectedCrc::Deferred => {
                            let compressed = consumed(project.reader.as_mut());
                            let buffer = [0; SIGNATURE_LENGTH + DATA_DESCRIPTOR_LENGTH];
                            *project.state = State::Descriptor { buffer, filled: 0, compressed };
                        }
                    }
                }
                State::Descriptor { buffer, filled, compressed } => {
                    // Read 12 bytes, or 16 when they begin with the optional signature.
                    let signed = *filled >= SIGNATURE_LENGTH && le_u32(&buffer[..], 0) == DATA_DESCRIPTOR_SIGNATURE;
                    let wanted = match signed {
                        true => SIGNATURE_LENGTH + DATA_DESCRIPTOR_LENGTH,
                        false => DATA_DESCRIPTOR_LENGTH,
                    };

                    if *filled < wanted {
                        // The `Take` limit has been exhausted (or was unbounded), so read from the buffered view below it.
                        let take = Pin::into_inner(project.reader.as_mut().upstream());
                        let mut upstream = Pin::new(take.get_mut());

                        let data = poll_result_ok!(ready!(upstream.as_mut().poll_fill_buf(c)));
                        if !data.is_empty() {
                            let consumed = std::cmp::min(wanted - *filled, data.len());
                            buffer[*filled..*filled + consumed].copy_from_slice(&data[..consumed]);

                            upstream.consume(consumed);
                            *filled += consumed;
                            continue;
                        }

                        // An unsigned descriptor whose CRC resembles the signature may end the store after 12 bytes.
                        if *filled < DATA_DESCRIPTOR_LENGTH {
                            *project.state = State::Truncated;
                            continue;
                        }
                    }

                    let actual = project.hasher.clone().finalize();
                    let descriptor = select_descriptor(&buffer[..*filled], actual, *compressed);
                    tracing::debug!(?descriptor, "read data descriptor");

                    *project.descriptor = Some(descriptor);
                    return Poll::Ready(verify(project.hasher, project.state, descriptor.crc));
                }
                State::Finished => return Poll::Ready(Ok(0)),
                State::Mismatched => return Poll::Ready(Err(ZipError::CRC32CheckError.into())),
                State::Truncated => return Poll::Ready(Err(ZipError::UnexpectedEof(DATA_DESCRIPTOR_RECORD).into())),
            }
        }
    }
}

/// Compares the computed hash against the expected CRC32, moving into the relevant terminal state.
fn verify(hasher: &mut Hasher, state: &mut State, expected: u32) -> std::io::Result<usize> {
    let actual = std::mem::take(hasher).finalize();

    if actual == expected {
        *state = State::Finished;
        Ok(0)
    } else {
        tracing::debug!(actual, expected, "computed CRC32 did not match");
        *state = State::Mismatched;
        Err(ZipError::CRC32CheckError.into())
    }
}

/// Returns the number of compressed bytes consumed from the entry's body so far.
fn consumed<S>(reader: Pin<&mut CompressedReader<BodyReader<'_, S>>>) -> u64
where
    S: ByteStore + ?Sized,
{
    let buffered = Pin::into_inner(reader.upstream()).get_ref();
    buffered.get_ref().position() - buffered.buffer().len() as u64
}

/// Decodes a data descriptor from either 12 unsigned bytes, or 16 bytes which begin with the signature.
///
/// A CRC32 can itself equal the signature, so when 16 bytes are present the unsigned reading is kept only if it
/// agrees with the computed CRC32 & consumed size whilst the signed reading does not.
fn select_descriptor(bytes: &[u8], crc: u32, compressed: u64) -> DataDescriptor {
    let unsigned = DataDescriptor::from(bytes);

    if bytes.len() < SIGNATURE_LENGTH + DATA_DESCRIPTOR_LENGTH {
        return unsigned;
    }

    let signed = DataDescriptor::from(&bytes[SIGNATURE_LENGTH..]);
    let agrees = |descriptor: &DataDescriptor| {
        descriptor.crc == crc && descriptor.compressed_size as u64 == compressed & u32::MAX as u64
    };

    if agrees(&unsigned) && !agrees(&signed) {
        unsigned
    } else {
        signed
    }
}
