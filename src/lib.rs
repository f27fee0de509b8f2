//! Reelsmith renders short branded promo clips from named templates.
//!
//! A job picks a template (`intro`, `kinetic`, `testimonial`), samples it on a fixed frame
//! grid, rasterizes each frame to PNG in a scratch directory and hands the sequence to an
//! external encoder:
//!
//! - Build a [`StudioConfig`] once at startup
//! - Turn CLI input into a [`RenderJob`]
//! - Run it through a [`RenderJobController`] with a [`Rasterizer`] and an [`Encoder`]
#![forbid(unsafe_code)]

/// Easing curves and fade envelopes.
pub mod animation;
/// External encoder port and the `ffmpeg` implementation.
pub mod encode;
pub mod foundation;
/// Job construction, scratch directory lifecycle and orchestration.
pub mod job;
/// Rasterization port and the frame sequencer.
pub mod render;
/// Backend-neutral drawable elements and their SVG serialization.
pub mod scene;
/// The built-in animated templates.
pub mod templates;

pub use crate::encode::Encoder;
pub use crate::encode::ffmpeg::FfmpegEncoder;
pub use crate::foundation::cancel::CancelToken;
pub use crate::foundation::config::{BrandConfig, EncoderSettings, StudioConfig};
pub use crate::foundation::core::{Canvas, Fps, FrameIndex, Rgb8, TimeSample};
pub use crate::foundation::error::{ReelError, ReelResult};
pub use crate::job::controller::{RenderJobController, RenderResult};
pub use crate::job::request::{JobRequest, RenderJob};
pub use crate::render::raster::{FrameRGBA, Rasterizer, SvgRasterizer};
pub use crate::render::sequencer::{FrameSequencer, FrameSet};
pub use crate::scene::model::{Element, Scene};
pub use crate::templates::{OptionFields, Template, TemplateKind, TemplateOptions};
