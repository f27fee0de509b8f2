//! Named, parameterized animations.
//!
//! A template is a pure function of `(elapsed seconds, options)` to a [`Scene`]. The options
//! type of each template *is* the template: [`TemplateOptions`] is the tagged union over them,
//! so a job can only ever carry fields its template understands.

use std::str::FromStr;

use crate::animation::timing::fade_out;
use crate::foundation::config::BrandConfig;
use crate::foundation::core::{Canvas, Rgb8};
use crate::foundation::error::{ReelError, ReelResult};
use crate::scene::model::{FilledRect, Scene, TextAnchor, TextRun};

pub mod intro;
pub mod kinetic;
pub mod testimonial;

pub use intro::IntroOptions;
pub use kinetic::KineticOptions;
pub use testimonial::TestimonialOptions;

/// Seconds of the end-of-clip fade applied to every element.
pub const GLOBAL_FADE_SECS: f64 = 0.5;

pub(crate) const MUTED: Rgb8 = Rgb8::new(0xAA, 0xAA, 0xAA);
pub(crate) const DIM: Rgb8 = Rgb8::new(0x66, 0x66, 0x66);
pub(crate) const INK: Rgb8 = Rgb8::new(0x0A, 0x0A, 0x0A);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    Intro,
    Kinetic,
    Testimonial,
}

impl TemplateKind {
    pub const ALL: [Self; 3] = [Self::Intro, Self::Kinetic, Self::Testimonial];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Intro => "intro",
            Self::Kinetic => "kinetic",
            Self::Testimonial => "testimonial",
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            Self::Intro => "brand reveal: headline and subtitle fade in",
            Self::Kinetic => "kinetic typography: phrases rise in sequence",
            Self::Testimonial => "quote card with optional body and call-to-action pill",
        }
    }

    pub fn default_duration_secs(self) -> f64 {
        match self {
            Self::Intro => 6.0,
            Self::Kinetic => 8.0,
            Self::Testimonial => 7.0,
        }
    }

    /// Options that must be supplied; everything else has a default or is optional.
    pub fn required_options(self) -> &'static [&'static str] {
        match self {
            Self::Intro => &[],
            Self::Kinetic => &["texts"],
            Self::Testimonial => &["headline"],
        }
    }

    /// Every option the template reads.
    pub fn accepted_options(self) -> &'static [&'static str] {
        match self {
            Self::Intro => &["headline", "subtitle"],
            Self::Kinetic => &["texts"],
            Self::Testimonial => &["headline", "body", "cta"],
        }
    }
}

impl FromStr for TemplateKind {
    type Err = ReelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ReelError::TemplateNotFound(s.to_owned()))
    }
}

impl std::fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Untyped option values as they arrive from the command line.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OptionFields {
    pub headline: Option<String>,
    pub subtitle: Option<String>,
    pub texts: Vec<String>,
    pub body: Option<String>,
    pub cta: Option<String>,
}

impl OptionFields {
    /// Names of the fields that were actually supplied.
    pub fn provided(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.headline.is_some() {
            out.push("headline");
        }
        if self.subtitle.is_some() {
            out.push("subtitle");
        }
        if !self.texts.is_empty() {
            out.push("texts");
        }
        if self.body.is_some() {
            out.push("body");
        }
        if self.cta.is_some() {
            out.push("cta");
        }
        out
    }

    fn reject_unused(&self, kind: TemplateKind) -> ReelResult<()> {
        let accepted = kind.accepted_options();
        let extra: Vec<_> = self
            .provided()
            .into_iter()
            .filter(|name| !accepted.contains(name))
            .collect();
        if extra.is_empty() {
            return Ok(());
        }
        Err(ReelError::invalid_options(
            kind.as_str(),
            format!(
                "unsupported option(s): {} (accepted: {})",
                extra.join(", "),
                accepted.join(", ")
            ),
        ))
    }
}

/// Take an optional text field, rejecting blank values.
pub(crate) fn non_blank(
    kind: TemplateKind,
    name: &str,
    value: Option<String>,
) -> ReelResult<Option<String>> {
    match value {
        Some(v) if v.trim().is_empty() => Err(ReelError::invalid_options(
            kind.as_str(),
            format!("'{name}' must not be empty"),
        )),
        other => Ok(other),
    }
}

/// Per-job inputs shared by every frame of a template.
#[derive(Clone, Copy, Debug)]
pub struct SceneCtx<'a> {
    pub canvas: Canvas,
    pub duration_secs: f64,
    pub brand: &'a BrandConfig,
}

impl SceneCtx<'_> {
    /// End-of-clip fade multiplier: 1 until the last half second, then down to 0.
    pub fn global_fade(&self, t: f64) -> f64 {
        fade_out(t, self.duration_secs - GLOBAL_FADE_SECS, GLOBAL_FADE_SECS)
    }

    /// Fresh scene carrying the frame chrome: a thin accent stripe across the top.
    pub fn chrome(&self) -> Scene {
        let mut scene = Scene::new();
        scene.push(FilledRect::new(
            0.0,
            0.0,
            self.canvas.w(),
            4.0,
            self.brand.accent,
        ));
        scene
    }

    /// Brand name in the bottom-right corner.
    pub fn corner_mark(&self, size: f64, opacity: f64) -> TextRun {
        TextRun::new(
            self.brand.name.clone(),
            self.canvas.w() - 60.0,
            self.canvas.h() - 40.0,
            size,
            self.brand.accent,
        )
        .anchor(TextAnchor::End)
        .opacity(opacity)
    }
}

pub trait Template: Send + Sync {
    fn kind(&self) -> TemplateKind;

    fn required_options(&self) -> &'static [&'static str] {
        self.kind().required_options()
    }

    fn default_duration_secs(&self) -> f64 {
        self.kind().default_duration_secs()
    }

    /// Checks that need the clip duration. Runs before any frame is rendered.
    fn validate(&self, duration_secs: f64) -> ReelResult<()> {
        let _ = duration_secs;
        Ok(())
    }

    fn build_scene(&self, t: f64, ctx: &SceneCtx<'_>) -> Scene;
}

#[derive(Clone, Debug, PartialEq)]
pub enum TemplateOptions {
    Intro(IntroOptions),
    Kinetic(KineticOptions),
    Testimonial(TestimonialOptions),
}

impl TemplateOptions {
    /// Build typed options for `kind`, applying defaults and rejecting fields it does not use.
    pub fn from_fields(
        kind: TemplateKind,
        fields: OptionFields,
        brand: &BrandConfig,
    ) -> ReelResult<Self> {
        fields.reject_unused(kind)?;
        Ok(match kind {
            TemplateKind::Intro => Self::Intro(IntroOptions::from_fields(fields, brand)?),
            TemplateKind::Kinetic => Self::Kinetic(KineticOptions::from_fields(fields)?),
            TemplateKind::Testimonial => {
                Self::Testimonial(TestimonialOptions::from_fields(fields)?)
            }
        })
    }

    pub fn kind(&self) -> TemplateKind {
        self.template().kind()
    }

    pub fn template(&self) -> &dyn Template {
        match self {
            Self::Intro(t) => t,
            Self::Kinetic(t) => t,
            Self::Testimonial(t) => t,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/templates/mod.rs"]
mod tests;
