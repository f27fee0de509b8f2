use crate::animation::timing::{combine, ease_out_cubic, lerp};
use crate::foundation::core::Rgb8;
use crate::foundation::error::{ReelError, ReelResult};
use crate::scene::model::{FontWeight, Scene, TextRun};
use crate::templates::{OptionFields, SceneCtx, Template, TemplateKind};

/// Delay before the first phrase appears.
const LEAD_IN_SECS: f64 = 0.3;
/// Rise-in at the start of each slice.
const RISE_SECS: f64 = 0.2;
/// Fade-out at the end of each slice.
const EXIT_SECS: f64 = 0.15;
const RISE_OFFSET_PX: f64 = 20.0;

/// Kinetic typography: each phrase owns an equal slice of the clip, rising into place and
/// fading out at the end of its slice. The last phrase is the punchline.
#[derive(Clone, Debug, PartialEq)]
pub struct KineticOptions {
    pub phrases: Vec<String>,
}

impl KineticOptions {
    pub fn from_fields(fields: OptionFields) -> ReelResult<Self> {
        let kind = TemplateKind::Kinetic;
        if fields.texts.is_empty() {
            return Err(ReelError::invalid_options(
                kind.as_str(),
                "'texts' requires at least one phrase",
            ));
        }
        if let Some(idx) = fields.texts.iter().position(|p| p.trim().is_empty()) {
            return Err(ReelError::invalid_options(
                kind.as_str(),
                format!("phrase {idx} is empty"),
            ));
        }
        Ok(Self {
            phrases: fields.texts,
        })
    }

    /// Seconds each phrase owns: `(duration - 1) / count`.
    pub fn slice_secs(&self, duration_secs: f64) -> f64 {
        (duration_secs - 1.0) / self.phrases.len() as f64
    }

    /// `[start, end)` of phrase `idx`.
    pub fn phrase_window(&self, idx: usize, duration_secs: f64) -> (f64, f64) {
        let slice = self.slice_secs(duration_secs);
        let start = idx as f64 * slice + LEAD_IN_SECS;
        (start, start + slice)
    }
}

/// Opacity of a phrase owning `[start, end)` at time `t`, before the global fade.
///
/// The rise-in takes precedence over the exit when a slice is too short for both.
pub fn phrase_alpha(t: f64, start: f64, end: f64) -> f64 {
    if t >= start && t < start + RISE_SECS {
        ease_out_cubic((t - start) / RISE_SECS)
    } else if t >= start + RISE_SECS && t < end - EXIT_SECS {
        1.0
    } else if t >= end - EXIT_SECS && t < end {
        1.0 - (t - (end - EXIT_SECS)) / EXIT_SECS
    } else {
        0.0
    }
}

/// Downward offset in pixels while a phrase rises into place; 0 otherwise.
pub fn phrase_rise(t: f64, start: f64) -> f64 {
    if t >= start && t < start + RISE_SECS {
        lerp(RISE_OFFSET_PX, 0.0, ease_out_cubic((t - start) / RISE_SECS))
    } else {
        0.0
    }
}

impl Template for KineticOptions {
    fn kind(&self) -> TemplateKind {
        TemplateKind::Kinetic
    }

    fn validate(&self, duration_secs: f64) -> ReelResult<()> {
        if duration_secs <= 1.0 {
            return Err(ReelError::invalid_options(
                self.kind().as_str(),
                format!("duration must exceed 1s to give phrases a slice (got {duration_secs}s)"),
            ));
        }
        Ok(())
    }

    fn build_scene(&self, t: f64, ctx: &SceneCtx<'_>) -> Scene {
        let fade = ctx.global_fade(t);
        let center = ctx.canvas.center();
        let last = self.phrases.len().saturating_sub(1);

        let mut scene = ctx.chrome();
        for (idx, phrase) in self.phrases.iter().enumerate() {
            let (start, end) = self.phrase_window(idx, ctx.duration_secs);
            let y = center.y + 20.0 + phrase_rise(t, start);
            let run = if idx == last {
                TextRun::new(phrase.clone(), center.x, y, 80.0, ctx.brand.accent)
                    .weight(FontWeight::Bold)
            } else {
                TextRun::new(phrase.clone(), center.x, y, 64.0, Rgb8::WHITE)
            };
            scene.push(run.opacity(combine(phrase_alpha(t, start, end), fade)));
        }
        scene.push(ctx.corner_mark(18.0, 0.5 * fade));
        scene
    }
}

#[cfg(test)]
#[path = "../../tests/unit/templates/kinetic.rs"]
mod tests;
