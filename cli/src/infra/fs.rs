//! Filesystem infrastructure: implements `LocalFs` and `ToolLocator`.

use std::path::Path;

use crate::application::ports::{LocalFs, ToolLocator};

/// Production filesystem queries.
pub struct HostFs;

impl LocalFs for HostFs {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    #[cfg(unix)]
    fn owner(&self, path: &Path) -> Option<(u32, u32)> {
        use std::os::unix::fs::MetadataExt;
        let meta = std::fs::metadata(path).ok()?;
        Some((meta.uid(), meta.gid()))
    }

    #[cfg(not(unix))]
    fn owner(&self, _path: &Path) -> Option<(u32, u32)> {
        None
    }
}

/// Resolves tools against the current `PATH` on every call, so binaries
/// installed earlier in the run are picked up.
pub struct PathLocator;

impl ToolLocator for PathLocator {
    fn is_available(&self, tool: &str) -> bool {
        which::which(tool).is_ok()
    }
}
