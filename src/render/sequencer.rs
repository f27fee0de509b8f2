use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use rayon::prelude::*;

use crate::foundation::cancel::CancelToken;
use crate::foundation::core::{Canvas, Fps, FrameIndex, MAX_FRAMES, Rgb8, TimeSample};
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::raster::{FrameRGBA, Rasterizer, write_png};
use crate::scene::svg::scene_to_svg;
use crate::templates::{SceneCtx, Template};

/// `printf`-style pattern matching [`frame_file_name`], as understood by the encoder.
pub const FRAME_PATTERN: &str = "frame_%06d.png";

const PROGRESS_EVERY: u64 = 25;

/// `round(duration * fps)`, rejecting durations that produce no frames or overflow the
/// six-digit file naming.
pub fn total_frames(duration_secs: f64, fps: Fps) -> ReelResult<u64> {
    if !duration_secs.is_finite() || duration_secs <= 0.0 {
        return Err(ReelError::validation(format!(
            "duration must be a positive number of seconds (got {duration_secs})"
        )));
    }
    let total = fps.secs_to_frames_round(duration_secs);
    if total == 0 {
        return Err(ReelError::validation(format!(
            "duration {duration_secs}s is shorter than one frame at {}/{} fps",
            fps.num, fps.den
        )));
    }
    if total > MAX_FRAMES {
        return Err(ReelError::validation(format!(
            "{total} frames exceeds the maximum of {MAX_FRAMES}"
        )));
    }
    Ok(total)
}

/// Zero-padded so lexicographic order equals temporal order.
pub fn frame_file_name(frame: FrameIndex) -> String {
    format!("frame_{:06}.png", frame.0)
}

/// A complete, contiguous run of frame files `frame_000000.png ..` in one directory.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameSet {
    pub dir: PathBuf,
    pub count: u64,
    pub canvas: Canvas,
}

impl FrameSet {
    pub fn frame_path(&self, frame: FrameIndex) -> PathBuf {
        self.dir.join(frame_file_name(frame))
    }

    pub fn pattern_path(&self) -> PathBuf {
        self.dir.join(FRAME_PATTERN)
    }

    /// Fails if any frame in `0..count` is missing.
    pub fn verify_complete(&self) -> ReelResult<()> {
        for i in 0..self.count {
            let path = self.frame_path(FrameIndex(i));
            if !path.is_file() {
                return Err(ReelError::fs(
                    format!("frame file '{}' missing after render", path.display()),
                    std::io::Error::from(std::io::ErrorKind::NotFound),
                ));
            }
        }
        Ok(())
    }
}

/// Drives a template over the job's frame grid and writes one PNG per frame.
///
/// Frames are independent, so they are rendered on a bounded rayon pool; completion order
/// does not matter because the file name carries the frame index.
pub struct FrameSequencer<'a> {
    pub template: &'a dyn Template,
    pub ctx: SceneCtx<'a>,
    pub fps: Fps,
    pub background: Rgb8,
    pub rasterizer: &'a dyn Rasterizer,
    /// Worker threads; `None` uses every available core.
    pub threads: Option<usize>,
    pub cancel: &'a CancelToken,
}

impl FrameSequencer<'_> {
    pub fn total_frames(&self) -> ReelResult<u64> {
        total_frames(self.ctx.duration_secs, self.fps)
    }

    /// Serialized scene for one frame, exactly as handed to the rasterizer.
    pub fn scene_markup(&self, frame: FrameIndex) -> String {
        let sample = TimeSample::at(frame, self.fps);
        let scene = self.template.build_scene(sample.t, &self.ctx);
        scene_to_svg(&scene, self.ctx.canvas, self.background)
    }

    pub fn render_frame(&self, frame: FrameIndex) -> ReelResult<FrameRGBA> {
        let markup = self.scene_markup(frame);
        self.rasterizer
            .rasterize(&markup, self.ctx.canvas)
            .map_err(|e| e.with_frame(frame.0))
    }

    #[tracing::instrument(skip_all, fields(template = %self.template.kind(), dir = %dir.display()))]
    pub fn render_to_dir(&self, dir: &Path) -> ReelResult<FrameSet> {
        let total = self.total_frames()?;
        let pool = build_thread_pool(self.threads)?;
        let done = AtomicU64::new(0);

        tracing::info!(frames = total, threads = pool.current_num_threads(), "rendering frames");
        pool.install(|| {
            (0..total).into_par_iter().try_for_each(|i| {
                if self.cancel.is_cancelled() {
                    return Err(ReelError::Cancelled);
                }
                let frame = FrameIndex(i);
                let pixels = self.render_frame(frame)?;
                write_png(&pixels, &dir.join(frame_file_name(frame))).map_err(|e| e.with_frame(i))?;

                let n = done.fetch_add(1, Ordering::Relaxed) + 1;
                if n % PROGRESS_EVERY == 0 || n == total {
                    tracing::info!(rendered = n, total, percent = n * 100 / total, "progress");
                }
                Ok(())
            })
        })?;

        let set = FrameSet {
            dir: dir.to_path_buf(),
            count: total,
            canvas: self.ctx.canvas,
        };
        set.verify_complete()?;
        Ok(set)
    }
}

fn build_thread_pool(threads: Option<usize>) -> ReelResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ReelError::validation("frame worker threads must be >= 1 when set"));
    }

    let mut builder = rayon::ThreadPoolBuilder::new().thread_name(|i| format!("reel-frame-{i}"));
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ReelError::Other(anyhow::anyhow!("failed to build frame worker pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/sequencer.rs"]
mod tests;
