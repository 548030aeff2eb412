// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::base::read::io::range::ByteRange;

use futures_lite::io::AsyncReadExt;

#[tokio::test]
async fn range_middle_test() {
    let data = b"0123456789".to_vec();
    let mut range = ByteRange::new(&data, 3, 4);

    assert_eq!(range.remaining(), 4);
    assert_eq!(range.absolute_position(), 3);

    let mut output = Vec::new();
    range.read_to_end(&mut output).await.expect("failed to read range");

    assert_eq!(output, b"3456");
    assert_eq!(range.remaining(), 0);
    assert_eq!(range.absolute_position(), 7);
}

#[tokio::test]
async fn range_beyond_store_test() {
    let data = b"0123456789".to_vec();
    let mut range = ByteRange::new(&data, 8, 100);

    let mut output = Vec::new();
    range.read_to_end(&mut output).await.expect("failed to read range");
    assert_eq!(output, b"89");

    let mut range = ByteRange::new(&data, 20, 5);
    let mut output = Vec::new();
    range.read_to_end(&mut output).await.expect("failed to read range");
    assert!(output.is_empty());
}

#[tokio::test]
async fn range_independent_positions_test() {
    let data = b"0123456789".to_vec();
    let mut first = ByteRange::new(&data, 0, 10);
    let mut second = ByteRange::new(&data, 0, 10);

    let mut buffer = [0; 4];
    first.read_exact(&mut buffer).await.expect("failed to read range");
    assert_eq!(&buffer, b"0123");

    second.read_exact(&mut buffer[..2]).await.expect("failed to read range");
    assert_eq!(&buffer[..2], b"01");

    first.read_exact(&mut buffer[..2]).await.expect("failed to read range");
    assert_eq!(&buffer[..2], b"45");
}
