use std::path::{Path, PathBuf};

use crate::foundation::core::Fps;
use crate::foundation::error::ReelResult;
use crate::render::sequencer::FrameSet;

pub mod ffmpeg;

/// Turns a complete frame sequence into one compressed video file.
///
/// Called once per job, only after every frame file exists. A returned `Ok` means the
/// file at the returned path is finished and valid.
pub trait Encoder: Send + Sync {
    fn encode(
        &self,
        frames: &FrameSet,
        fps: Fps,
        duration_secs: f64,
        out_path: &Path,
    ) -> ReelResult<PathBuf>;
}
