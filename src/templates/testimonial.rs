use crate::animation::timing::{combine, fade_in};
use crate::foundation::core::Rgb8;
use crate::foundation::error::{ReelError, ReelResult};
use crate::scene::model::{FilledRect, FontWeight, SANS, Scene, TextAnchor, TextRun};
use crate::templates::{INK, MUTED, OptionFields, SceneCtx, Template, TemplateKind, non_blank};

/// Quote card: accent bar, headline, optional body and an optional call-to-action pill.
#[derive(Clone, Debug, PartialEq)]
pub struct TestimonialOptions {
    pub headline: String,
    pub body: Option<String>,
    pub cta: Option<String>,
}

impl TestimonialOptions {
    pub fn from_fields(fields: OptionFields) -> ReelResult<Self> {
        let kind = TemplateKind::Testimonial;
        let headline = non_blank(kind, "headline", fields.headline)?
            .ok_or_else(|| ReelError::invalid_options(kind.as_str(), "'headline' is required"))?;
        Ok(Self {
            headline,
            body: non_blank(kind, "body", fields.body)?,
            cta: non_blank(kind, "cta", fields.cta)?,
        })
    }
}

impl Template for TestimonialOptions {
    fn kind(&self) -> TemplateKind {
        TemplateKind::Testimonial
    }

    fn build_scene(&self, t: f64, ctx: &SceneCtx<'_>) -> Scene {
        let fade = ctx.global_fade(t);
        let accent = ctx.brand.accent;

        let mut scene = ctx.chrome();
        // Bar size is fixed; it does not follow the text length.
        scene.push(
            FilledRect::new(80.0, 320.0, 4.0, 160.0, accent)
                .opacity(combine(fade_in(t, 0.4, 0.3), fade)),
        );
        scene.push(
            TextRun::new(self.headline.clone(), 120.0, 380.0, 52.0, Rgb8::WHITE)
                .anchor(TextAnchor::Start)
                .opacity(combine(fade_in(t, 0.8, 0.6), fade)),
        );
        if let Some(body) = &self.body {
            scene.push(
                TextRun::new(body.clone(), 120.0, 440.0, 26.0, MUTED)
                    .anchor(TextAnchor::Start)
                    .opacity(combine(fade_in(t, 1.5, 0.6), fade)),
            );
        }
        if let Some(cta) = &self.cta {
            let alpha = combine(fade_in(t, 2.8, 0.4), fade);
            scene.push(
                FilledRect::new(120.0, 500.0, 280.0, 52.0, accent)
                    .rounded(26.0)
                    .opacity(alpha),
            );
            scene.push(
                TextRun::new(cta.clone(), 260.0, 532.0, 20.0, INK)
                    .weight(FontWeight::Bold)
                    .font(SANS)
                    .opacity(alpha),
            );
        }
        scene.push(ctx.corner_mark(20.0, 0.5 * fade));
        scene
    }
}

#[cfg(test)]
#[path = "../../tests/unit/templates/testimonial.rs"]
mod tests;
