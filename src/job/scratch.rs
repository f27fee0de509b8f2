use std::path::Path;

use crate::foundation::error::{ReelError, ReelResult};

/// Job-scoped frame directory, unique per job and removed with everything in it when dropped.
///
/// Prefer [`ScratchDir::close`] on the normal path so a deletion failure gets logged; `Drop`
/// still removes the directory on early returns and panics.
#[derive(Debug)]
pub struct ScratchDir {
    dir: tempfile::TempDir,
}

impl ScratchDir {
    /// Create `<root>/_frames_<random>`, creating `root` first if needed.
    pub fn create_in(root: &Path) -> ReelResult<Self> {
        std::fs::create_dir_all(root).map_err(|e| {
            ReelError::fs(format!("create scratch root '{}'", root.display()), e)
        })?;
        let dir = tempfile::Builder::new()
            .prefix("_frames_")
            .tempdir_in(root)
            .map_err(|e| {
                ReelError::fs(
                    format!("create scratch directory in '{}'", root.display()),
                    e,
                )
            })?;
        tracing::debug!(dir = %dir.path().display(), "scratch directory created");
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Delete the directory now. Failures are logged and otherwise ignored.
    pub fn close(self) {
        let path = self.dir.path().to_path_buf();
        match self.dir.close() {
            Ok(()) => tracing::debug!(dir = %path.display(), "scratch directory removed"),
            Err(err) => {
                tracing::warn!(dir = %path.display(), error = %err, "failed to remove scratch directory")
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/job/scratch.rs"]
mod tests;
