//! Whole-file project loading.

use crate::{Error, Result};
use std::path::Path;
use swfir_core::Profile;

/// Read `path` into memory and parse it as a `.swproj` project.
///
/// The profile's source is the path as given.
pub fn read_profile<P: AsRef<Path>>(path: P, require_stereo: bool) -> Result<Profile> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    tracing::debug!(path = %path.display(), bytes = data.len(), "read project file");

    let profile = swfir_core::parse_with_source(&data, path, require_stereo)?;
    tracing::info!(
        path = %path.display(),
        channels = profile.len(),
        "parsed project"
    );
    Ok(profile)
}
