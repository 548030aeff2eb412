// Copyright (c) 2022 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! Record signatures and fixed lengths. All lengths include the leading signature where the record carries one.

pub const SIGNATURE_LENGTH: usize = 4;

// Local file header constants
//
// https://github.com/Majored/rs-async-zip/blob/main/SPECIFICATION.md#437
pub const LFH_SIGNATURE: u32 = 0x4034b50;
pub const LFH_LENGTH: usize = 30;

// Central directory header constants
//
// https://github.com/Majored/rs-async-zip/blob/main/SPECIFICATION.md#4312
pub const CDH_SIGNATURE: u32 = 0x2014b50;
pub const CDH_LENGTH: usize = 46;

// End of central directory record constants
//
// https://github.com/Majored/rs-async-zip/blob/main/SPECIFICATION.md#4316
pub const EOCDR_SIGNATURE: u32 = 0x6054b50;
pub const EOCDR_LENGTH: usize = 22;

// Data descriptor constants. The signature is optional and not counted in the length.
//
// https://github.com/Majored/rs-async-zip/blob/main/SPECIFICATION.md#439
pub const DATA_DESCRIPTOR_SIGNATURE: u32 = 0x8074b50;
pub const DATA_DESCRIPTOR_LENGTH: usize = 12;

// General purpose bit flags.
//
// https://github.com/Majored/rs-async-zip/blob/main/SPECIFICATION.md#444
pub const FLAG_ENCRYPTED: u16 = 0x1;
pub const FLAG_DATA_DESCRIPTOR: u16 = 0x8;
pub const FLAG_UTF8: u16 = 0x800;

// Record names used when reporting truncated input.
pub const EOCDR_RECORD: &str = "end of central directory record";
pub const CDH_RECORD: &str = "central directory record";
pub const LFH_RECORD: &str = "local file header";
pub const DATA_DESCRIPTOR_RECORD: &str = "data descriptor";
