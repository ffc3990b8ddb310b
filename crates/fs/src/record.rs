use std::path::{Path, PathBuf};

use bitflags::bitflags;

bitflags! {
    /// Attributes the command language can filter on.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FileAttrs: u8 {
        const WRITABLE   = 0b0000_0001;
        const EXECUTABLE = 0b0000_0010;
        /// Name starts with a dot.
        const HIDDEN     = 0b0000_0100;
    }
}

/// A regular file captured by a directory snapshot.
///
/// Records are never refreshed: every section in a run sees the same
/// values, regardless of what happens on disk in the meantime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub full_path: PathBuf,
    /// Absolute path as a string, used for lexical ordering.
    pub abs_path: String,
    /// Base name
    pub name: String,
    /// Length in bytes
    pub size: u64,
    pub attrs: FileAttrs,
}

impl FileRecord {
    /// Build a record from an absolute path and pre-computed metadata.
    pub fn from_parts(full_path: impl Into<PathBuf>, size: u64, attrs: FileAttrs) -> Self {
        let full_path = full_path.into();
        let name = base_name(&full_path);
        let abs_path = full_path.to_string_lossy().into_owned();

        Self {
            full_path,
            abs_path,
            name,
            size,
            attrs,
        }
    }

    /// Size in whole kilobytes (truncating).
    #[inline]
    pub fn size_kb(&self) -> u64 {
        self.size / 1024
    }

    #[inline]
    pub fn is_writable(&self) -> bool {
        self.attrs.contains(FileAttrs::WRITABLE)
    }

    #[inline]
    pub fn is_executable(&self) -> bool {
        self.attrs.contains(FileAttrs::EXECUTABLE)
    }

    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.attrs.contains(FileAttrs::HIDDEN)
    }
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
