use crate::foundation::core::{Circle, Line, Point, Rect, Rgb8};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    #[default]
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_svg(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl FontWeight {
    pub fn as_svg(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Bold => "bold",
        }
    }
}

pub const SERIF: &str = "Georgia, serif";
pub const SANS: &str = "Inter, sans-serif";

/// A single line of text anchored at `pos` (baseline).
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    pub content: String,
    pub pos: Point,
    pub size: f64,
    pub color: Rgb8,
    pub opacity: f64,
    pub anchor: TextAnchor,
    pub weight: FontWeight,
    pub font_family: String,
}

impl TextRun {
    /// Centered, regular-weight serif text at full opacity.
    pub fn new(content: impl Into<String>, x: f64, y: f64, size: f64, color: Rgb8) -> Self {
        Self {
            content: content.into(),
            pos: Point::new(x, y),
            size,
            color,
            opacity: 1.0,
            anchor: TextAnchor::Middle,
            weight: FontWeight::Normal,
            font_family: SERIF.to_owned(),
        }
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    pub fn font(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FilledRect {
    pub rect: Rect,
    pub color: Rgb8,
    pub opacity: f64,
    pub corner_radius: Option<f64>,
}

impl FilledRect {
    pub fn new(x: f64, y: f64, w: f64, h: f64, color: Rgb8) -> Self {
        Self {
            rect: Rect::new(x, y, x + w, y + h),
            color,
            opacity: 1.0,
            corner_radius: None,
        }
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn rounded(mut self, radius: f64) -> Self {
        self.corner_radius = Some(radius);
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LineSegment {
    pub line: Line,
    pub color: Rgb8,
    pub opacity: f64,
    pub width: f64,
}

impl LineSegment {
    pub fn new(p0: Point, p1: Point, width: f64, color: Rgb8) -> Self {
        Self {
            line: Line::new(p0, p1),
            color,
            opacity: 1.0,
            width,
        }
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CircleShape {
    pub circle: Circle,
    pub color: Rgb8,
    pub opacity: f64,
    /// `Some(width)` draws only the outline with that stroke width.
    pub stroke_width: Option<f64>,
}

impl CircleShape {
    pub fn new(center: Point, radius: f64, color: Rgb8) -> Self {
        Self {
            circle: Circle::new(center, radius),
            color,
            opacity: 1.0,
            stroke_width: None,
        }
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn outline(mut self, width: f64) -> Self {
        self.stroke_width = Some(width);
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    Text(TextRun),
    Rect(FilledRect),
    Line(LineSegment),
    Circle(CircleShape),
}

impl Element {
    pub fn opacity(&self) -> f64 {
        match self {
            Self::Text(e) => e.opacity,
            Self::Rect(e) => e.opacity,
            Self::Line(e) => e.opacity,
            Self::Circle(e) => e.opacity,
        }
    }

    /// Elements at or below zero opacity (or NaN) are skipped entirely when painting.
    pub fn is_visible(&self) -> bool {
        self.opacity() > 0.0
    }
}

impl From<TextRun> for Element {
    fn from(value: TextRun) -> Self {
        Self::Text(value)
    }
}

impl From<FilledRect> for Element {
    fn from(value: FilledRect) -> Self {
        Self::Rect(value)
    }
}

impl From<LineSegment> for Element {
    fn from(value: LineSegment) -> Self {
        Self::Line(value)
    }
}

impl From<CircleShape> for Element {
    fn from(value: CircleShape) -> Self {
        Self::Circle(value)
    }
}

/// Drawable content of one frame, in paint order (later elements on top).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    elements: Vec<Element>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, element: impl Into<Element>) {
        self.elements.push(element.into());
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn visible(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(|e| e.is_visible())
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
