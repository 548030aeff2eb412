// Copyright (c) 2022 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::entry::ZipEntry;
use crate::string::ZipString;

/// An immutable store of data about a ZIP file.
#[derive(Debug, Clone)]
pub struct ZipFile {
    pub(crate) entries: Vec<ZipEntry>,
    pub(crate) comment: ZipString,
}

impl ZipFile {
    /// Returns a list of this ZIP file's entries, in central directory order.
    pub fn entries(&self) -> &[ZipEntry] {
        &self.entries
    }

    /// Returns this ZIP file's trailing comment.
    pub fn comment(&self) -> &ZipString {
        &self.comment
    }

    /// Searches for the first entry with a specific filename.
    ///
    /// If an entry is found, a tuple containing the index it was found at, as well as a shared reference to the
    /// entry itself is returned. Else, None is returned.
    pub fn entry_by_name(&self, name: &str) -> Option<(usize, &ZipEntry)> {
        self.entries.iter().enumerate().find(|(_, entry)| entry.filename() == name)
    }
}
