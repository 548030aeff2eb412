// Copyright (c) 2021 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)


/// Initialize the env logger for any tests that require it.
/// Safe to call multiple times.
pub(crate) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Builds a minimal EOCDR with the given declared entry count, directory location, and comment.
pub(crate) fn eocdr(entries: u16, size: u32, offset: u32, comment: &[u8]) -> Vec<u8> {
    let mut record = Vec::with_capacity(22 + comment.len());
    record.extend_from_slice(&0x6054b50u32.to_le_bytes());
    record.extend_from_slice(&[0; 4]);
    record.extend_from_slice(&entries.to_le_bytes());
    record.extend_from_slice(&entries.to_le_bytes());
    record.extend_from_slice(&size.to_le_bytes());
    record.extend_from_slice(&offset.to_le_bytes());
    record.extend_from_slice(&(comment.len() as u16).to_le_bytes());
    record.extend_from_slice(comment);
    record
}

/// Builds a central directory record for a stored entry with no data at offset zero.
pub(crate) fn cd_record(name: &str) -> Vec<u8> {
    let mut record = Vec::with_capacity(46 + name.len());
    record.extend_from_slice(&0x2014b50u32.to_le_bytes());
    record.extend_from_slice(&[0; 24]);
    record.extend_from_slice(&(name.len() as u16).to_le_bytes());
    record.extend_from_slice(&[0; 16]);
    record.extend_from_slice(name.as_bytes());
    record
}
