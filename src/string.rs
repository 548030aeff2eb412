// Copyright (c) 2023 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::error::{Result, ZipError};

/// A string encoding supported by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringEncoding {
    Utf8,
    Raw,
}

/// A filename or comment as stored within a ZIP file, alongside its detected encoding.
///
/// ZIP files only mark strings as UTF-8 via a general purpose flag; anything else uses an archiver-defined encoding
/// (often a legacy code page). Such strings are kept as raw bytes unless they're plain ASCII.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZipString {
    encoding: StringEncoding,
    raw: Vec<u8>,
}

impl ZipString {
    /// Constructs a new encoded string from its raw bytes and its encoding type.
    ///
    /// # Note
    /// If the provided encoding is [`StringEncoding::Utf8`] but the raw bytes are not valid UTF-8 (ie. a call to
    /// `std::str::from_utf8()` fails), the encoding is defaulted back to [`StringEncoding::Raw`].
    pub fn new(raw: Vec<u8>, mut encoding: StringEncoding) -> Self {
        if let StringEncoding::Utf8 = encoding {
            if std::str::from_utf8(&raw).is_err() {
                encoding = StringEncoding::Raw;
            }
        }

        Self { encoding, raw }
    }

    /// Constructs a string from raw record bytes, given whether the entry's UTF-8 flag was set.
    pub(crate) fn detect(raw: Vec<u8>, flagged_utf8: bool) -> Self {
        // Don't trust bytes which merely look like UTF-8 without the flag; MBCS strings can be valid UTF-8 in form.
        if flagged_utf8 || raw.is_ascii() {
            Self::new(raw, StringEncoding::Utf8)
        } else {
            Self::new(raw, StringEncoding::Raw)
        }
    }

    /// Returns the raw bytes for this string.
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    /// Returns the encoding type for this string.
    pub fn encoding(&self) -> StringEncoding {
        self.encoding
    }

    /// Returns the raw bytes converted into a string slice.
    ///
    /// # Note
    /// A call to this method will only succeed if the encoding type is [`StringEncoding::Utf8`].
    pub fn as_str(&self) -> Result<&str> {
        if !matches!(self.encoding, StringEncoding::Utf8) {
            return Err(ZipError::StringNotUtf8);
        }

        std::str::from_utf8(&self.raw).map_err(|_| ZipError::StringNotUtf8)
    }

    /// Returns the string with any invalid UTF-8 sequences replaced, for display purposes.
    pub fn to_string_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.raw)
    }

    /// Returns whether this string has no bytes.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

impl From<String> for ZipString {
    fn from(value: String) -> Self {
        Self { encoding: StringEncoding::Utf8, raw: value.into_bytes() }
    }
}

impl From<&str> for ZipString {
    fn from(value: &str) -> Self {
        Self { encoding: StringEncoding::Utf8, raw: value.as_bytes().to_vec() }
    }
}

impl PartialEq<str> for ZipString {
    fn eq(&self, other: &str) -> bool {
        self.raw == other.as_bytes()
    }
}

impl PartialEq<&str> for ZipString {
    fn eq(&self, other: &&str) -> bool {
        self.raw == other.as_bytes()
    }
}
