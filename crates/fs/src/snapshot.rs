use std::{
    fs::{self, read_dir},
    io::Result,
    path::{self, Path},
};

use log::{debug, warn};

use crate::record::{FileAttrs, FileRecord};

/// Take a one-shot snapshot of the regular files directly inside `dir`.
///
/// Subdirectories are not descended into. Symlinks are followed, so a link
/// to a regular file is listed under the link's own name. Entries that
/// cannot be inspected are skipped with a warning; only failing to open
/// `dir` itself is an error.
pub fn snapshot_dir(dir: &Path) -> Result<Vec<FileRecord>> {
    let dir = path::absolute(dir)?;
    let rd = read_dir(&dir)?;

    let mut records = Vec::new();
    for entry_res in rd {
        let entry = match entry_res {
            Ok(e) => e,
            Err(e) => {
                warn!("[snapshot] error reading entry in {:?}: {e}", dir);
                continue;
            }
        };

        match inspect_fs_entry(&entry) {
            Ok(Some(record)) => records.push(record),
            Ok(None) => {}
            Err(e) => {
                warn!("[snapshot] inspect_fs_entry({:?}) failed: {e}", entry.path());
            }
        }
    }

    debug!("[snapshot] {} files in {:?}", records.len(), dir);
    Ok(records)
}

fn inspect_fs_entry(entry: &fs::DirEntry) -> Result<Option<FileRecord>> {
    let full_path = entry.path();
    // `fs::metadata` follows symlinks, unlike `DirEntry::metadata`.
    let metadata = fs::metadata(&full_path)?;

    if !metadata.is_file() {
        return Ok(None);
    }

    let name_os = entry.file_name();
    let Some(name) = name_os.to_str() else {
        warn!("[snapshot] skipping non UTF-8 name {:?}", name_os);
        return Ok(None);
    };

    let mut attrs = permission_attrs(&full_path, &metadata);
    if name.starts_with('.') {
        attrs |= FileAttrs::HIDDEN;
    }

    Ok(Some(FileRecord::from_parts(
        full_path,
        metadata.len(),
        attrs,
    )))
}

/// Writable and executable reflect what this process may actually do with
/// the file, so privileged users and ACLs are accounted for.
#[cfg(unix)]
fn permission_attrs(path: &Path, _metadata: &fs::Metadata) -> FileAttrs {
    let mut attrs = FileAttrs::empty();
    if can_access(path, libc::W_OK) {
        attrs |= FileAttrs::WRITABLE;
    }
    if can_access(path, libc::X_OK) {
        attrs |= FileAttrs::EXECUTABLE;
    }
    attrs
}

#[cfg(unix)]
fn can_access(path: &Path, mode: libc::c_int) -> bool {
    use std::{ffi::CString, os::unix::ffi::OsStrExt};

    let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    // SAFETY: `c_path` is NUL-terminated and outlives the call.
    unsafe { libc::access(c_path.as_ptr(), mode) == 0 }
}

#[cfg(not(unix))]
fn permission_attrs(_path: &Path, metadata: &fs::Metadata) -> FileAttrs {
    if metadata.permissions().readonly() {
        FileAttrs::empty()
    } else {
        FileAttrs::WRITABLE
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
