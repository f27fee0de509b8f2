use std::fmt::Write as _;

use crate::foundation::core::{Canvas, Rgb8};
use crate::scene::model::{CircleShape, Element, FilledRect, LineSegment, Scene, TextRun};

/// Escape the five XML-reserved characters so arbitrary user text can be embedded
/// in element content or attribute values.
///
/// Characters XML 1.0 cannot carry at all (C0 controls other than tab/newline/carriage
/// return, U+FFFE, U+FFFF) become U+FFFD.
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if !is_xml_char(c) => out.push(char::REPLACEMENT_CHARACTER),
            _ => out.push(c),
        }
    }
    out
}

fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r') || (c >= ' ' && c != '\u{FFFE}' && c != '\u{FFFF}')
}

/// Serialize `scene` as a standalone SVG document of `canvas` size over a solid
/// `background`.
///
/// Invisible elements (opacity <= 0) are not written at all.
pub fn scene_to_svg(scene: &Scene, canvas: Canvas, background: Rgb8) -> String {
    let mut out = String::with_capacity(256 + scene.len() * 200);
    let _ = write!(
        out,
        r#"<svg width="{w}" height="{h}" viewBox="0 0 {w} {h}" xmlns="http://www.w3.org/2000/svg">"#,
        w = canvas.width,
        h = canvas.height,
    );
    out.push('\n');
    let _ = writeln!(
        out,
        r#"  <rect width="{}" height="{}" fill="{background}"/>"#,
        canvas.width, canvas.height
    );

    for element in scene.visible() {
        out.push_str("  ");
        match element {
            Element::Text(e) => write_text(&mut out, e),
            Element::Rect(e) => write_rect(&mut out, e),
            Element::Line(e) => write_line(&mut out, e),
            Element::Circle(e) => write_circle(&mut out, e),
        }
        out.push('\n');
    }

    out.push_str("</svg>\n");
    out
}

fn write_text(out: &mut String, e: &TextRun) {
    let _ = write!(
        out,
        r#"<text x="{}" y="{}" font-family="{}" font-size="{}" font-weight="{}" fill="{}" opacity="{}" text-anchor="{}">{}</text>"#,
        e.pos.x,
        e.pos.y,
        escape_markup(&e.font_family),
        e.size,
        e.weight.as_svg(),
        e.color,
        opacity_attr(e.opacity),
        e.anchor.as_svg(),
        escape_markup(&e.content),
    );
}

fn write_rect(out: &mut String, e: &FilledRect) {
    let _ = write!(
        out,
        r#"<rect x="{}" y="{}" width="{}" height="{}""#,
        e.rect.x0,
        e.rect.y0,
        e.rect.width(),
        e.rect.height(),
    );
    if let Some(r) = e.corner_radius {
        let _ = write!(out, r#" rx="{r}""#);
    }
    let _ = write!(
        out,
        r#" fill="{}" opacity="{}"/>"#,
        e.color,
        opacity_attr(e.opacity)
    );
}

fn write_line(out: &mut String, e: &LineSegment) {
    let _ = write!(
        out,
        r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}" opacity="{}"/>"#,
        e.line.p0.x,
        e.line.p0.y,
        e.line.p1.x,
        e.line.p1.y,
        e.color,
        e.width,
        opacity_attr(e.opacity),
    );
}

fn write_circle(out: &mut String, e: &CircleShape) {
    let _ = write!(
        out,
        r#"<circle cx="{}" cy="{}" r="{}""#,
        e.circle.center.x, e.circle.center.y, e.circle.radius,
    );
    match e.stroke_width {
        Some(w) => {
            let _ = write!(out, r#" fill="none" stroke="{}" stroke-width="{w}""#, e.color);
        }
        None => {
            let _ = write!(out, r#" fill="{}""#, e.color);
        }
    }
    let _ = write!(out, r#" opacity="{}"/>"#, opacity_attr(e.opacity));
}

fn opacity_attr(opacity: f64) -> String {
    format!("{:.3}", opacity.clamp(0.0, 1.0))
}

#[cfg(test)]
#[path = "../../tests/unit/scene/svg.rs"]
mod tests;
