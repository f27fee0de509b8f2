use super::*;
use std::sync::Mutex;

use crate::foundation::config::BrandConfig;
use crate::templates::{OptionFields, TemplateKind, TemplateOptions};

/// Returns a transparent frame of the requested size and remembers what it was asked to draw.
#[derive(Default)]
struct RecordingRasterizer {
    calls: Mutex<Vec<String>>,
    fail_on_marker: Option<&'static str>,
}

impl Rasterizer for RecordingRasterizer {
    fn rasterize(&self, markup: &str, canvas: Canvas) -> ReelResult<FrameRGBA> {
        if let Some(marker) = self.fail_on_marker
            && markup.contains(marker)
        {
            return Err(ReelError::rasterization("backend rejected scene"));
        }
        self.calls.lock().unwrap().push(markup.to_owned());
        Ok(FrameRGBA {
            width: canvas.width,
            height: canvas.height,
            data: vec![0; (canvas.width * canvas.height * 4) as usize],
            premultiplied: true,
        })
    }
}

const SMALL: Canvas = Canvas {
    width: 4,
    height: 2,
};

fn intro(brand: &BrandConfig) -> TemplateOptions {
    TemplateOptions::from_fields(TemplateKind::Intro, OptionFields::default(), brand).unwrap()
}

fn sequencer<'a>(
    opts: &'a TemplateOptions,
    brand: &'a BrandConfig,
    raster: &'a dyn Rasterizer,
    cancel: &'a CancelToken,
    duration_secs: f64,
) -> FrameSequencer<'a> {
    FrameSequencer {
        template: opts.template(),
        ctx: SceneCtx {
            canvas: SMALL,
            duration_secs,
            brand,
        },
        fps: Fps::new(10, 1).unwrap(),
        background: Rgb8::BLACK,
        rasterizer: raster,
        threads: Some(3),
        cancel,
    }
}

#[test]
fn total_frames_is_rounded_duration_times_rate() {
    let fps = Fps::new(25, 1).unwrap();
    assert_eq!(total_frames(6.0, fps).unwrap(), 150);
    assert_eq!(total_frames(7.0, fps).unwrap(), 175);
    assert_eq!(total_frames(2.5, Fps::new(30, 1).unwrap()).unwrap(), 75);
    assert_eq!(total_frames(1.01, fps).unwrap(), 25);
}

#[test]
fn total_frames_rejects_degenerate_durations() {
    let fps = Fps::new(25, 1).unwrap();
    for bad in [0.0, -1.0, f64::NAN, f64::INFINITY, 0.01] {
        assert!(total_frames(bad, fps).is_err(), "{bad} should be rejected");
    }
    assert!(total_frames(40_000.0, fps).is_err());
    assert_eq!(total_frames(39_999.96, fps).unwrap(), MAX_FRAMES);
}

#[test]
fn file_names_are_fixed_width_and_sort_temporally() {
    assert_eq!(frame_file_name(FrameIndex(0)), "frame_000000.png");
    assert_eq!(frame_file_name(FrameIndex(149)), "frame_000149.png");
    assert_eq!(frame_file_name(FrameIndex(MAX_FRAMES)), "frame_999999.png");

    let mut names: Vec<_> = [1000u64, 9, 10, 0, 99, 100, 999_999]
        .into_iter()
        .map(|i| (i, frame_file_name(FrameIndex(i))))
        .collect();
    names.sort_by(|a, b| a.1.cmp(&b.1));
    let order: Vec<_> = names.iter().map(|(i, _)| *i).collect();
    assert_eq!(order, vec![0, 9, 10, 99, 100, 1000, 999_999]);
}

#[test]
fn renders_every_frame_into_the_directory() {
    let brand = BrandConfig::default();
    let opts = intro(&brand);
    let raster = RecordingRasterizer::default();
    let cancel = CancelToken::new();
    let dir = tempfile::tempdir().unwrap();

    let seq = sequencer(&opts, &brand, &raster, &cancel, 1.0);
    let set = seq.render_to_dir(dir.path()).unwrap();

    assert_eq!(set.count, 10);
    assert_eq!(set.canvas, SMALL);
    assert_eq!(set.pattern_path(), dir.path().join("frame_%06d.png"));
    assert_eq!(raster.calls.lock().unwrap().len(), 10);

    let mut names: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    let expected: Vec<_> = (0..10).map(|i| frame_file_name(FrameIndex(i))).collect();
    assert_eq!(names, expected);
}

#[test]
fn first_frame_markup_skips_invisible_text() {
    let brand = BrandConfig::default();
    let opts = intro(&brand);
    let raster = RecordingRasterizer::default();
    let cancel = CancelToken::new();
    let seq = sequencer(&opts, &brand, &raster, &cancel, 6.0);

    let first = seq.scene_markup(FrameIndex(0));
    assert!(!first.contains("<text"));
    // By 4s (frame 40 at 10 fps) every intro text is on screen.
    let later = seq.scene_markup(FrameIndex(40));
    assert_eq!(later.matches("<text").count(), 4);
}

#[test]
fn rasterizer_failure_reports_frame_index() {
    let brand = BrandConfig::default();
    let opts = intro(&brand);
    let raster = RecordingRasterizer {
        fail_on_marker: Some("<text"),
        ..Default::default()
    };
    let cancel = CancelToken::new();
    let seq = sequencer(&opts, &brand, &raster, &cancel, 6.0);

    assert!(seq.render_frame(FrameIndex(0)).is_ok());
    match seq.render_frame(FrameIndex(40)) {
        Err(ReelError::Rasterization { frame, .. }) => assert_eq!(frame, Some(40)),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn cancelled_token_stops_rendering() {
    let brand = BrandConfig::default();
    let opts = intro(&brand);
    let raster = RecordingRasterizer::default();
    let cancel = CancelToken::new();
    cancel.cancel();
    let dir = tempfile::tempdir().unwrap();

    let seq = sequencer(&opts, &brand, &raster, &cancel, 1.0);
    assert!(matches!(
        seq.render_to_dir(dir.path()),
        Err(ReelError::Cancelled)
    ));
    assert!(raster.calls.lock().unwrap().is_empty());
}

#[test]
fn verify_complete_detects_gaps() {
    let dir = tempfile::tempdir().unwrap();
    let set = FrameSet {
        dir: dir.path().to_path_buf(),
        count: 2,
        canvas: SMALL,
    };
    std::fs::write(set.frame_path(FrameIndex(0)), b"x").unwrap();
    assert!(matches!(
        set.verify_complete(),
        Err(ReelError::Filesystem { .. })
    ));
    std::fs::write(set.frame_path(FrameIndex(1)), b"x").unwrap();
    assert!(set.verify_complete().is_ok());
}
