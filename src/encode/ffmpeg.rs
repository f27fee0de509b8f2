use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::encode::Encoder;
use crate::foundation::config::EncoderSettings;
use crate::foundation::core::Fps;
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::sequencer::FrameSet;

/// Encodes a PNG frame directory by shelling out to the system `ffmpeg`.
///
/// The system binary is used rather than linking libav, so no native dev headers are needed.
#[derive(Clone, Debug)]
pub struct FfmpegEncoder {
    settings: EncoderSettings,
}

impl FfmpegEncoder {
    pub fn new(settings: EncoderSettings) -> Self {
        Self { settings }
    }

    pub fn is_available(&self) -> bool {
        is_ffmpeg_on_path(&self.settings.program)
    }

    /// Full argument list for one encode, excluding the program itself.
    pub fn build_args(
        &self,
        frames: &FrameSet,
        fps: Fps,
        duration_secs: f64,
        out_path: &Path,
    ) -> Vec<OsString> {
        let s = &self.settings;
        let rate = format!("{}/{}", fps.num, fps.den);
        let crf = s.crf.to_string();
        let duration = format!("{duration_secs}");

        let mut args: Vec<OsString> = vec!["-y".into(), "-loglevel".into(), "error".into()];
        args.extend(["-framerate", rate.as_str(), "-i"].map(OsString::from));
        args.push(frames.pattern_path().into_os_string());
        args.extend(
            [
                "-an",
                "-c:v",
                s.codec.as_str(),
                "-pix_fmt",
                s.pix_fmt.as_str(),
                "-preset",
                s.preset.as_str(),
                "-crf",
                crf.as_str(),
                "-t",
                duration.as_str(),
                "-movflags",
                "+faststart",
            ]
            .map(OsString::from),
        );
        args.push(out_path.as_os_str().to_owned());
        args
    }
}

impl Encoder for FfmpegEncoder {
    fn encode(
        &self,
        frames: &FrameSet,
        fps: Fps,
        duration_secs: f64,
        out_path: &Path,
    ) -> ReelResult<PathBuf> {
        validate_input(frames, fps)?;
        ensure_parent_dir(out_path)?;

        if !self.is_available() {
            return Err(ReelError::encoder(format!(
                "'{}' is required for MP4 encoding, but could not be run",
                self.settings.program.display()
            )));
        }

        let args = self.build_args(frames, fps, duration_secs, out_path);
        tracing::debug!(program = %self.settings.program.display(), ?args, "spawning encoder");

        let output = Command::new(&self.settings.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                ReelError::encoder(format!(
                    "failed to spawn '{}' (is it installed and on PATH?): {e}",
                    self.settings.program.display()
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ReelError::encoder(format!(
                "ffmpeg exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(out_path.to_path_buf())
    }
}

fn validate_input(frames: &FrameSet, fps: Fps) -> ReelResult<()> {
    if fps.num == 0 || fps.den == 0 {
        return Err(ReelError::validation("encode fps must be non-zero"));
    }
    if frames.count == 0 {
        return Err(ReelError::validation("encode needs at least one frame"));
    }
    let (w, h) = (frames.canvas.width, frames.canvas.height);
    if w == 0 || h == 0 {
        return Err(ReelError::validation("encode width/height must be non-zero"));
    }
    if !w.is_multiple_of(2) || !h.is_multiple_of(2) {
        // yuv420p chroma subsampling needs even dimensions.
        return Err(ReelError::validation(
            "encode width/height must be even (required for yuv420p mp4 output)",
        ));
    }
    Ok(())
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> ReelResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            ReelError::fs(
                format!("create output directory '{}'", parent.display()),
                e,
            )
        })?;
    }
    Ok(())
}

/// Return `true` when `program -version` runs successfully.
pub fn is_ffmpeg_on_path(program: &Path) -> bool {
    Command::new(program)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
