use super::*;
use crate::foundation::config::BrandConfig;
use crate::foundation::core::Canvas;
use crate::scene::model::Element;

fn abc() -> KineticOptions {
    KineticOptions::from_fields(OptionFields {
        texts: vec!["A".into(), "B".into(), "C".into()],
        ..OptionFields::default()
    })
    .unwrap()
}

fn phrase_runs(scene: &Scene) -> Vec<&TextRun> {
    // Skip the chrome stripe and the trailing corner mark.
    scene
        .elements()
        .iter()
        .filter_map(|e| match e {
            Element::Text(t) => Some(t),
            _ => None,
        })
        .filter(|t| t.content != "MEDICI")
        .collect()
}

#[test]
fn slices_split_duration_minus_one_evenly() {
    let opts = abc();
    let slice = opts.slice_secs(8.0);
    assert!((slice - 7.0 / 3.0).abs() < 1e-12);
    for idx in 0..3 {
        let (start, end) = opts.phrase_window(idx, 8.0);
        assert!((start - (idx as f64 * 7.0 / 3.0 + 0.3)).abs() < 1e-12);
        assert!((end - start - slice).abs() < 1e-12);
    }
}

#[test]
fn phrases_are_invisible_before_their_slice_and_after_it_ends() {
    let opts = abc();
    for idx in 0..3 {
        let (start, end) = opts.phrase_window(idx, 8.0);
        assert_eq!(phrase_alpha(start - 1e-6, start, end), 0.0);
        assert_eq!(phrase_alpha(start, start, end), 0.0);
        assert!(phrase_alpha(start + 0.1, start, end) > 0.0);
        assert_eq!(phrase_alpha(start + 0.5, start, end), 1.0);
        assert!(phrase_alpha(end - 0.05, start, end) < 0.5);
        assert_eq!(phrase_alpha(end, start, end), 0.0);
        assert_eq!(phrase_alpha(end + 1.0, start, end), 0.0);
    }
}

#[test]
fn exit_fade_is_linear_over_last_slice_segment() {
    let (start, end) = (0.3, 2.3);
    assert!((phrase_alpha(end - 0.15, start, end) - 1.0).abs() < 1e-9);
    assert!((phrase_alpha(end - 0.075, start, end) - 0.5).abs() < 1e-9);
}

#[test]
fn rise_eases_from_twenty_pixels_to_rest() {
    let start = 1.0;
    assert_eq!(phrase_rise(start, start), 20.0);
    let mid = phrase_rise(start + 0.1, start);
    assert!(mid > 0.0 && mid < 10.0, "ease-out covers most distance early: {mid}");
    assert_eq!(phrase_rise(start + 0.2, start), 0.0);
    assert_eq!(phrase_rise(start - 0.1, start), 0.0);
}

#[test]
fn last_phrase_is_emphasized() {
    let opts = abc();
    let brand = BrandConfig::default();
    let ctx = SceneCtx {
        canvas: Canvas::default(),
        duration_secs: 8.0,
        brand: &brand,
    };
    let scene = opts.build_scene(1.0, &ctx);
    let runs = phrase_runs(&scene);
    assert_eq!(runs.len(), 3);
    for run in &runs[..2] {
        assert_eq!(run.size, 64.0);
        assert_eq!(run.color, Rgb8::WHITE);
        assert_eq!(run.weight, FontWeight::Normal);
    }
    assert_eq!(runs[2].size, 80.0);
    assert_eq!(runs[2].color, brand.accent);
    assert_eq!(runs[2].weight, FontWeight::Bold);
}

#[test]
fn only_the_active_phrase_is_visible_mid_slice() {
    let opts = abc();
    let brand = BrandConfig::default();
    let ctx = SceneCtx {
        canvas: Canvas::default(),
        duration_secs: 8.0,
        brand: &brand,
    };
    let (start_b, end_b) = opts.phrase_window(1, 8.0);
    let scene = opts.build_scene((start_b + end_b) / 2.0, &ctx);
    let runs = phrase_runs(&scene);
    assert_eq!(runs[0].opacity, 0.0);
    assert_eq!(runs[1].opacity, 1.0);
    assert_eq!(runs[1].pos.y, 560.0);
    assert_eq!(runs[2].opacity, 0.0);
}

#[test]
fn adjacent_slices_hand_over_at_the_seam() {
    let opts = abc();
    let (_, end_a) = opts.phrase_window(0, 8.0);
    let (start_b, end_b) = opts.phrase_window(1, 8.0);
    assert!((end_a - start_b).abs() < 1e-12);
    // A is still fading out while B has not started.
    let t = end_a - 0.05;
    assert!(phrase_alpha(t, 0.3, end_a) > 0.0);
    assert_eq!(phrase_alpha(t, start_b, end_b), 0.0);
}

#[test]
fn corner_mark_follows_global_fade() {
    let opts = abc();
    let brand = BrandConfig::default();
    let ctx = SceneCtx {
        canvas: Canvas::default(),
        duration_secs: 8.0,
        brand: &brand,
    };
    let mark = |t: f64| match opts.build_scene(t, &ctx).elements().last() {
        Some(Element::Text(run)) => run.clone(),
        _ => panic!("corner mark must be the last element"),
    };
    assert_eq!(mark(1.0).opacity, 0.5);
    assert_eq!(mark(1.0).size, 18.0);
    assert_eq!(mark(1.0).anchor, crate::scene::model::TextAnchor::End);
    assert!((mark(7.75).opacity - 0.25).abs() < 1e-9);
}

#[test]
fn rejects_empty_phrases_and_too_short_duration() {
    assert!(KineticOptions::from_fields(OptionFields::default()).is_err());
    assert!(
        KineticOptions::from_fields(OptionFields {
            texts: vec!["ok".into(), " ".into()],
            ..OptionFields::default()
        })
        .is_err()
    );
    let opts = abc();
    assert!(opts.validate(8.0).is_ok());
    assert!(matches!(
        opts.validate(1.0),
        Err(ReelError::InvalidTemplateOptions { .. })
    ));
}
