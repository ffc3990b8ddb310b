mod record;
mod snapshot;

pub use record::{FileAttrs, FileRecord};
pub use snapshot::snapshot_dir;
