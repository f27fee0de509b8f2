use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::foundation::core::Canvas;
use crate::foundation::error::{ReelError, ReelResult};

/// Rasterized frame pixels, RGBA8 row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

/// Turns serialized scene markup into pixels.
///
/// Implementations are shared by every frame worker, so they must be `Sync` and keep no
/// per-frame state.
pub trait Rasterizer: Send + Sync {
    fn rasterize(&self, markup: &str, canvas: Canvas) -> ReelResult<FrameRGBA>;
}

/// SVG rasterizer backed by `usvg` + `resvg`.
///
/// The font database is loaded once and shared across frames.
pub struct SvgRasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl SvgRasterizer {
    /// System fonts plus any `.ttf`/`.otf`/`.ttc` files directly inside `font_dirs`.
    pub fn new(font_dirs: &[PathBuf]) -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        for dir in font_dirs {
            load_fonts_from_dir(&mut db, dir);
        }
        tracing::debug!(faces = db.len(), "font database ready");
        Self {
            fontdb: Arc::new(db),
        }
    }

    pub fn font_face_count(&self) -> usize {
        self.fontdb.len()
    }
}

impl Rasterizer for SvgRasterizer {
    fn rasterize(&self, markup: &str, canvas: Canvas) -> ReelResult<FrameRGBA> {
        let opts = usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(markup, &opts)
            .map_err(|e| ReelError::rasterization(format!("parse scene markup: {e}")))?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(canvas.width, canvas.height)
            .ok_or_else(|| {
                ReelError::rasterization(format!(
                    "failed to allocate {}x{} pixmap",
                    canvas.width, canvas.height
                ))
            })?;

        let sx = canvas.width as f32 / tree.size().width();
        let sy = canvas.height as f32 / tree.size().height();
        let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);
        resvg::render(&tree, xform, &mut pixmap.as_mut());

        Ok(FrameRGBA {
            width: canvas.width,
            height: canvas.height,
            data: pixmap.take(),
            premultiplied: true,
        })
    }
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "font directory not readable, skipping");
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(e) = db.load_font_file(&path) {
            tracing::warn!(font = %path.display(), error = %e, "failed to load font");
        }
    }
}

/// Encode `frame` as PNG at `path`, flushing before returning.
pub fn write_png(frame: &FrameRGBA, path: &Path) -> ReelResult<()> {
    let expected = frame.width as usize * frame.height as usize * 4;
    if frame.data.len() != expected {
        return Err(ReelError::rasterization(format!(
            "frame data is {} bytes, expected {expected} for {}x{}",
            frame.data.len(),
            frame.width,
            frame.height
        )));
    }

    let straight;
    let pixels = if frame.premultiplied {
        straight = demultiply_rgba8(&frame.data);
        &straight
    } else {
        &frame.data
    };

    let file = std::fs::File::create(path)
        .map_err(|e| ReelError::fs(format!("create frame '{}'", path.display()), e))?;
    let mut writer = std::io::BufWriter::new(file);
    image::write_buffer_with_format(
        &mut writer,
        pixels,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| match e {
        image::ImageError::IoError(io) => {
            ReelError::fs(format!("write frame '{}'", path.display()), io)
        }
        other => ReelError::rasterization(format!("encode png '{}': {other}", path.display())),
    })?;
    writer
        .flush()
        .map_err(|e| ReelError::fs(format!("flush frame '{}'", path.display()), e))?;
    Ok(())
}

fn demultiply_rgba8(src: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(src.len());
    for px in src.chunks_exact(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            out.extend_from_slice(&[0, 0, 0, 0]);
        } else if a == 255 {
            out.extend_from_slice(px);
        } else {
            for &c in &px[..3] {
                out.push(((u16::from(c) * 255 + a / 2) / a).min(255) as u8);
            }
            out.push(px[3]);
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
