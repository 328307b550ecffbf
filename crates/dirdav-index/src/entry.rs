use std::time::SystemTime;

/// One child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// File or directory name without any path prefix.
    pub name: String,
    /// Whether this entry is a directory.
    pub is_dir: bool,
    /// Size in bytes. Not shown for directories.
    pub size: u64,
    /// Last modification time, if the backend reports one.
    pub modified: Option<SystemTime>,
}

impl DirectoryEntry {
    /// Create a directory entry.
    pub fn dir(name: impl Into<String>, modified: Option<SystemTime>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
            size: 0,
            modified,
        }
    }

    /// Create a file entry.
    pub fn file(name: impl Into<String>, size: u64, modified: Option<SystemTime>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
            size,
            modified,
        }
    }

    /// Whether the entry is a dotfile.
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }
}

/// Sort entries with directories first, then by name (byte-wise, case-sensitive).
///
/// The sort is stable, so entries that compare equal keep their relative order.
pub fn sort_entries(entries: &mut [DirectoryEntry]) {
    entries.sort_by(|a, b| {
        b.is_dir
            .cmp(&a.is_dir)
            .then_with(|| a.name.as_bytes().cmp(b.name.as_bytes()))
    });
}
