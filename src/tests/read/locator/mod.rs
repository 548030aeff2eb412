// Copyright (c) 2022 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::base::read::io::locator::{eocdr, reverse_search_record};
use crate::error::ZipError;
use crate::tests::{eocdr as record, init_logger};

#[test]
fn search_empty_test() {
    assert!(reverse_search_record(&[]).is_none());
    assert!(reverse_search_record(&[0x50, 0x4b, 0x05, 0x06]).is_none());
}

#[test]
fn search_exact_record_test() {
    let buffer = record(0, 0, 0, b"");
    assert_eq!(reverse_search_record(&buffer), Some(0));
}

#[test]
fn search_prefixed_record_test() {
    let mut buffer = vec![0xAA; 300];
    buffer.extend(record(3, 10, 20, b"comment"));

    assert_eq!(reverse_search_record(&buffer), Some(300));
}

#[test]
fn search_rejects_inconsistent_test() {
    let mut buffer = record(0, 0, 0, b"comment");
    buffer.push(0);
    assert!(reverse_search_record(&buffer).is_none());

    let mut buffer = record(0, 0, 0, b"comment");
    buffer.pop();
    assert!(reverse_search_record(&buffer).is_none());
}

#[test]
fn search_skips_signature_in_comment_test() {
    // The inner record claims a 2 byte comment, which doesn't reach the end of the buffer.
    let inner = record(0, 0, 0, b"xx");
    let mut comment = inner.clone();
    comment.extend_from_slice(b"more comment bytes");

    let buffer = record(1, 2, 3, &comment);
    assert_eq!(reverse_search_record(&buffer), Some(0));
}

#[test]
fn search_prefers_last_consistent_test() {
    // Here the inner record's comment does reach the end of the buffer, so it's the one accepted.
    let inner = record(0, 0, 0, b"");
    let buffer = record(1, 2, 3, &inner);

    assert_eq!(reverse_search_record(&buffer), Some(22));
}

#[tokio::test]
async fn locator_empty_test() {
    init_logger();

    let data = record(0, 0, 0, b"");
    let end = eocdr(&data, data.len() as u64).await.expect("failed to locate EOCDR");

    assert_eq!(end.header.num_of_entries, 0);
    assert!(end.comment.is_empty());
}

#[tokio::test]
async fn locator_empty_max_comment_test() {
    let comment = vec![b'c'; u16::MAX as usize];
    let data = record(0, 0, 0, &comment);
    let end = eocdr(&data, data.len() as u64).await.expect("failed to locate EOCDR");

    assert_eq!(end.header.file_comm_length, u16::MAX);
    assert_eq!(end.comment, comment);
}

#[tokio::test]
async fn locator_buffer_boundary_test() {
    // Places the signature either side of the first window's start.
    for comment_length in [1001, 1002, 1003] {
        let mut data = vec![0; 4096];
        data.extend(record(7, 46, 4096, &vec![b'c'; comment_length]));

        let end = eocdr(&data, data.len() as u64).await.expect("failed to locate EOCDR");
        assert_eq!(end.header.num_of_entries, 7);
        assert_eq!(end.header.cent_dir_offset, 4096);
        assert_eq!(end.comment.len(), comment_length);
    }
}

#[tokio::test]
async fn locator_store_size_smaller_than_data_test() {
    // Only the first `size` bytes of the store are considered part of the ZIP file.
    let mut data = record(0, 0, 0, b"");
    let size = data.len() as u64;
    data.extend_from_slice(b"appended bytes outside of the declared size");

    assert!(eocdr(&data, size).await.is_ok());
}

#[tokio::test]
async fn locator_not_found_test() {
    let data = vec![0x50; 100_000];
    assert!(matches!(eocdr(&data, data.len() as u64).await, Err(ZipError::UnableToLocateEOCDR)));
}

#[tokio::test]
async fn locator_size_beyond_store_test() {
    // A declared size larger than the store results in a short read of the tail window.
    let data = record(0, 0, 0, b"");
    let err = eocdr(&data, data.len() as u64 + 10).await.unwrap_err();

    assert!(matches!(err, ZipError::UnexpectedEof(_)));
}
