use super::*;
use crate::foundation::config::BrandConfig;
use crate::foundation::core::{Canvas, Rect};
use crate::scene::model::Element;

fn opts(body: Option<&str>, cta: Option<&str>) -> TestimonialOptions {
    TestimonialOptions::from_fields(OptionFields {
        headline: Some("10x faster".into()),
        body: body.map(str::to_owned),
        cta: cta.map(str::to_owned),
        ..OptionFields::default()
    })
    .unwrap()
}

fn scene_at(opts: &TestimonialOptions, t: f64) -> Scene {
    let brand = BrandConfig::default();
    let ctx = SceneCtx {
        canvas: Canvas::default(),
        duration_secs: 7.0,
        brand: &brand,
    };
    opts.build_scene(t, &ctx)
}

#[test]
fn headline_is_required() {
    assert!(matches!(
        TestimonialOptions::from_fields(OptionFields::default()),
        Err(ReelError::InvalidTemplateOptions { .. })
    ));
    assert!(
        TestimonialOptions::from_fields(OptionFields {
            headline: Some("h".into()),
            cta: Some("".into()),
            ..OptionFields::default()
        })
        .is_err()
    );
}

#[test]
fn optional_parts_are_omitted_when_absent() {
    let scene = scene_at(&opts(None, None), 4.0);
    // stripe, bar, headline, corner mark
    assert_eq!(scene.len(), 4);

    let scene = scene_at(&opts(Some("AI-powered"), Some("Book a call")), 4.0);
    // + body, pill, label
    assert_eq!(scene.len(), 7);
}

#[test]
fn accent_bar_size_ignores_text_length() {
    let short = opts(None, None);
    let mut long = opts(None, None);
    long.headline = "a much, much longer headline than the first one".repeat(3);

    for o in [&short, &long] {
        let scene = scene_at(o, 4.0);
        let Element::Rect(bar) = &scene.elements()[1] else {
            panic!("accent bar follows the chrome stripe");
        };
        assert_eq!(bar.rect, Rect::new(80.0, 320.0, 84.0, 480.0));
        assert_eq!(bar.opacity, 1.0);
    }
}

#[test]
fn parts_fade_in_left_to_right_top_to_bottom() {
    let o = opts(Some("body"), Some("cta"));
    let opacity = |t: f64| -> Vec<f64> {
        scene_at(&o, t)
            .elements()
            .iter()
            .map(Element::opacity)
            .collect()
    };

    // [stripe, bar, headline, body, pill, label, mark]
    let at = opacity(0.55);
    assert!((at[1] - 0.5).abs() < 1e-9);
    assert_eq!(&at[2..6], &[0.0, 0.0, 0.0, 0.0]);

    let at = opacity(1.1);
    assert_eq!(at[1], 1.0);
    assert!((at[2] - 0.5).abs() < 1e-9);
    assert_eq!(at[3], 0.0);

    let at = opacity(3.0);
    assert_eq!(at[3], 1.0);
    assert!((at[4] - 0.5).abs() < 1e-9);
    assert_eq!(at[4], at[5], "pill and label share one fade");
    assert_eq!(at[6], 0.5);
}

#[test]
fn cta_pill_is_rounded_with_dark_bold_label() {
    let scene = scene_at(&opts(None, Some("Book a call")), 4.0);
    let els = scene.elements();
    let Element::Rect(pill) = &els[3] else {
        panic!("pill expected");
    };
    assert_eq!(pill.rect, Rect::new(120.0, 500.0, 400.0, 552.0));
    assert_eq!(pill.corner_radius, Some(26.0));

    let Element::Text(label) = &els[4] else {
        panic!("label expected");
    };
    assert_eq!(label.content, "Book a call");
    assert_eq!(label.color, INK);
    assert_eq!(label.weight, FontWeight::Bold);
    assert_eq!(label.anchor, TextAnchor::Middle);
}

#[test]
fn text_is_left_aligned() {
    let scene = scene_at(&opts(Some("body"), None), 4.0);
    let Element::Text(headline) = &scene.elements()[2] else {
        panic!("headline expected");
    };
    assert_eq!(headline.anchor, TextAnchor::Start);
    assert_eq!(headline.pos.x, 120.0);
}
