use std::path::{Path, PathBuf};

use crate::encode::Encoder;
use crate::encode::ffmpeg::ensure_parent_dir;
use crate::foundation::cancel::CancelToken;
use crate::foundation::config::StudioConfig;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{ReelError, ReelResult};
use crate::job::request::{JobRequest, RenderJob};
use crate::job::scratch::ScratchDir;
use crate::render::raster::{Rasterizer, write_png};
use crate::render::sequencer::FrameSequencer;
use crate::templates::SceneCtx;

/// Outcome of a successful job.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderResult {
    pub output_path: PathBuf,
    pub byte_size: u64,
    pub frames: u64,
}

impl RenderResult {
    pub fn size_mb(&self) -> f64 {
        self.byte_size as f64 / (1024.0 * 1024.0)
    }
}

/// Runs render jobs end to end: scratch directory, frame sequence, encode, cleanup.
///
/// The output path only ever holds a finished video. The encoder writes to a `.partial`
/// sibling that is renamed into place after it reports success, and the scratch directory is
/// removed on every exit path.
pub struct RenderJobController<'a> {
    config: &'a StudioConfig,
    rasterizer: &'a dyn Rasterizer,
    encoder: &'a dyn Encoder,
    cancel: CancelToken,
}

impl<'a> RenderJobController<'a> {
    pub fn new(
        config: &'a StudioConfig,
        rasterizer: &'a dyn Rasterizer,
        encoder: &'a dyn Encoder,
    ) -> Self {
        Self {
            config,
            rasterizer,
            encoder,
            cancel: CancelToken::new(),
        }
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    pub fn run_request(&self, req: JobRequest) -> ReelResult<RenderResult> {
        let job = RenderJob::from_request(req, self.config, chrono::Local::now())?;
        self.run(&job)
    }

    #[tracing::instrument(skip_all, fields(template = %job.kind(), out = %job.output_path().display()))]
    pub fn run(&self, job: &RenderJob) -> ReelResult<RenderResult> {
        self.config.validate()?;
        let out = job.output_path();
        if !self.config.overwrite && out.exists() {
            return Err(ReelError::validation(format!(
                "output '{}' already exists and overwrite is disabled",
                out.display()
            )));
        }
        ensure_parent_dir(out)?;

        let scratch = ScratchDir::create_in(self.config.scratch_root())?;
        let result = self.render_and_encode(job, scratch.path());
        scratch.close();

        match &result {
            Ok(r) => tracing::info!(
                path = %r.output_path.display(),
                bytes = r.byte_size,
                frames = r.frames,
                "video saved"
            ),
            Err(err) => tracing::error!(error = %err, "render job failed"),
        }
        result
    }

    fn render_and_encode(&self, job: &RenderJob, dir: &Path) -> ReelResult<RenderResult> {
        let frames = self.sequencer(job).render_to_dir(dir)?;
        if self.cancel.is_cancelled() {
            return Err(ReelError::Cancelled);
        }

        let partial = job.partial_output_path();
        let mut guard = PartialOutputGuard(Some(partial.clone()));
        tracing::info!(frames = frames.count, "encoding");
        let written = self
            .encoder
            .encode(&frames, self.config.fps, job.duration_secs(), &partial)?;

        let out = job.output_path();
        std::fs::rename(&written, out).map_err(|e| {
            ReelError::fs(
                format!(
                    "move encoded video '{}' to '{}'",
                    written.display(),
                    out.display()
                ),
                e,
            )
        })?;
        guard.0 = None;

        let byte_size = std::fs::metadata(out)
            .map_err(|e| ReelError::fs(format!("stat output '{}'", out.display()), e))?
            .len();
        Ok(RenderResult {
            output_path: out.to_path_buf(),
            byte_size,
            frames: frames.count,
        })
    }

    /// Render the single frame shown at `at_secs` to a PNG, without touching the encoder.
    #[tracing::instrument(skip_all, fields(template = %job.kind(), at = at_secs))]
    pub fn render_preview_frame(
        &self,
        job: &RenderJob,
        at_secs: f64,
        out_png: &Path,
    ) -> ReelResult<FrameIndex> {
        self.config.validate()?;
        if !at_secs.is_finite() || at_secs < 0.0 || at_secs > job.duration_secs() {
            return Err(ReelError::validation(format!(
                "preview time {at_secs}s is outside the clip (0..={}s)",
                job.duration_secs()
            )));
        }

        let seq = self.sequencer(job);
        let last = seq.total_frames()? - 1;
        let frame = FrameIndex(((at_secs * self.config.fps.as_f64()).floor() as u64).min(last));

        let pixels = seq.render_frame(frame)?;
        ensure_parent_dir(out_png)?;
        write_png(&pixels, out_png)?;
        Ok(frame)
    }

    fn sequencer<'s>(&'s self, job: &'s RenderJob) -> FrameSequencer<'s> {
        FrameSequencer {
            template: job.options().template(),
            ctx: SceneCtx {
                canvas: self.config.canvas,
                duration_secs: job.duration_secs(),
                brand: &self.config.brand,
            },
            fps: self.config.fps,
            background: self.config.background,
            rasterizer: self.rasterizer,
            threads: self.config.threads,
            cancel: &self.cancel,
        }
    }
}

/// Removes a half-written encoder output unless disarmed.
struct PartialOutputGuard(Option<PathBuf>);

impl Drop for PartialOutputGuard {
    fn drop(&mut self) {
        if let Some(path) = self.0.take()
            && path.exists()
            && let Err(err) = std::fs::remove_file(&path)
        {
            tracing::warn!(path = %path.display(), error = %err, "failed to remove partial output");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/job/controller.rs"]
mod tests;
