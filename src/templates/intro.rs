use crate::animation::timing::{combine, fade_in};
use crate::foundation::config::BrandConfig;
use crate::foundation::core::Rgb8;
use crate::foundation::error::ReelResult;
use crate::scene::model::{SANS, Scene, TextRun};
use crate::templates::{DIM, MUTED, OptionFields, SceneCtx, Template, TemplateKind, non_blank};

pub const DEFAULT_HEADLINE: &str = "Growth, engineered.";

/// Brand reveal: headline, subtitle and brand mark fade in one after another.
#[derive(Clone, Debug, PartialEq)]
pub struct IntroOptions {
    pub headline: String,
    pub subtitle: String,
}

impl IntroOptions {
    /// Missing headline falls back to [`DEFAULT_HEADLINE`], missing subtitle to the brand domain.
    pub fn from_fields(fields: OptionFields, brand: &BrandConfig) -> ReelResult<Self> {
        let kind = TemplateKind::Intro;
        Ok(Self {
            headline: non_blank(kind, "headline", fields.headline)?
                .unwrap_or_else(|| DEFAULT_HEADLINE.to_owned()),
            subtitle: non_blank(kind, "subtitle", fields.subtitle)?
                .unwrap_or_else(|| brand.domain.clone()),
        })
    }
}

impl Template for IntroOptions {
    fn kind(&self) -> TemplateKind {
        TemplateKind::Intro
    }

    fn build_scene(&self, t: f64, ctx: &SceneCtx<'_>) -> Scene {
        let fade = ctx.global_fade(t);
        let center = ctx.canvas.center();
        let bottom = ctx.canvas.h();

        let mut scene = ctx.chrome();
        scene.push(
            TextRun::new(
                self.headline.clone(),
                center.x,
                center.y - 20.0,
                72.0,
                Rgb8::WHITE,
            )
            .opacity(combine(fade_in(t, 0.8, 0.6), fade)),
        );
        scene.push(
            TextRun::new(self.subtitle.clone(), center.x, center.y + 60.0, 28.0, MUTED)
                .font(SANS)
                .opacity(combine(fade_in(t, 1.8, 0.6), fade)),
        );
        scene.push(
            TextRun::new(
                ctx.brand.name.clone(),
                center.x,
                bottom - 80.0,
                24.0,
                ctx.brand.accent,
            )
            .opacity(combine(fade_in(t, 3.0, 0.5), fade)),
        );
        scene.push(
            TextRun::new(ctx.brand.domain.clone(), center.x, bottom - 50.0, 16.0, DIM)
                .opacity(combine(fade_in(t, 3.3, 0.5), fade)),
        );
        scene
    }
}

#[cfg(test)]
#[path = "../../tests/unit/templates/intro.rs"]
mod tests;
