use std::path::{Path, PathBuf};

use crate::foundation::core::{Canvas, Fps, Rgb8};
use crate::foundation::error::{ReelError, ReelResult};

/// Process-wide render settings, built once at startup and passed by reference.
///
/// Every field has a default, so a JSON config file only needs the keys it overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StudioConfig {
    /// Directory receiving finished videos (created if absent).
    pub output_dir: PathBuf,
    /// Parent directory for per-job scratch frame directories. Defaults to `output_dir`.
    pub scratch_dir: Option<PathBuf>,
    pub canvas: Canvas,
    pub fps: Fps,
    pub background: Rgb8,
    pub brand: BrandConfig,
    pub encoder: EncoderSettings,
    /// Frame worker threads. `None` uses every available core.
    pub threads: Option<usize>,
    pub overwrite: bool,
    /// Extra directories scanned for `.ttf`/`.otf`/`.ttc` fonts.
    pub font_dirs: Vec<PathBuf>,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("assets").join("videos"),
            scratch_dir: None,
            canvas: Canvas::default(),
            fps: Fps::default(),
            background: Rgb8::new(0x0A, 0x0A, 0x0A),
            brand: BrandConfig::default(),
            encoder: EncoderSettings::default(),
            threads: None,
            overwrite: true,
            font_dirs: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrandConfig {
    pub name: String,
    pub domain: String,
    pub accent: Rgb8,
}

impl Default for BrandConfig {
    fn default() -> Self {
        Self {
            name: "MEDICI".to_owned(),
            domain: "medici.codes".to_owned(),
            accent: Rgb8::new(0xC9, 0xA8, 0x4C),
        }
    }
}

/// Knobs handed to the external encoder.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncoderSettings {
    pub program: PathBuf,
    pub codec: String,
    pub preset: String,
    pub crf: u8,
    pub pix_fmt: String,
}

impl Default for EncoderSettings {
    fn default() -> Self {
        Self {
            program: PathBuf::from("ffmpeg"),
            codec: "libx264".to_owned(),
            preset: "fast".to_owned(),
            crf: 20,
            pix_fmt: "yuv420p".to_owned(),
        }
    }
}

impl StudioConfig {
    pub fn load(path: &Path) -> ReelResult<Self> {
        let bytes = std::fs::read(path)
            .map_err(|e| ReelError::fs(format!("read config '{}'", path.display()), e))?;
        let cfg: Self = serde_json::from_slice(&bytes).map_err(|e| {
            ReelError::validation(format!("parse config '{}': {e}", path.display()))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> ReelResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ReelError::validation("canvas width/height must be non-zero"));
        }
        if !self.canvas.width.is_multiple_of(2) || !self.canvas.height.is_multiple_of(2) {
            // yuv420p output needs even dimensions.
            return Err(ReelError::validation(
                "canvas width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        Fps::new(self.fps.num, self.fps.den)?;
        if self.encoder.crf > 51 {
            return Err(ReelError::validation("encoder crf must be in 0..=51"));
        }
        if self.threads == Some(0) {
            return Err(ReelError::validation("threads must be >= 1 when set"));
        }
        if self.brand.name.trim().is_empty() {
            return Err(ReelError::validation("brand name must not be empty"));
        }
        Ok(())
    }

    pub fn scratch_root(&self) -> &Path {
        self.scratch_dir.as_deref().unwrap_or(&self.output_dir)
    }

    /// `<output_dir>/<template>-<timestamp>.mp4`, unique to the millisecond.
    pub fn default_output_path(
        &self,
        template: &str,
        now: chrono::DateTime<chrono::Local>,
    ) -> PathBuf {
        self.output_dir.join(format!(
            "{template}-{}.mp4",
            now.format("%Y%m%d-%H%M%S%3f")
        ))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
