//! Name-segment validation for storage paths
//!
//! Project and file names arrive from remote clients and are joined under
//! the storage root, so they must never be able to traverse out of it. A
//! valid segment is a plain name: non-empty, no path separators, not `.` or
//! `..`, and not an absolute path on any platform.

use std::path::Path;

use crate::{Error, Result};

/// Validate a single project or file name segment.
///
/// Returns the segment unchanged on success so call sites can chain into a
/// join.
pub fn validate_segment(name: &str) -> Result<&str> {
    if name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0')
        || Path::new(name).is_absolute()
    {
        return Err(Error::InvalidSegment {
            name: name.to_string(),
        });
    }
    Ok(name)
}
