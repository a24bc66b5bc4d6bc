//! SVG markup for a [`Scene`].

use crate::scene::Scene;

pub const CAPTION_FONT_FAMILY: &str = "Inter, sans-serif";

/// Render a scene as a standalone SVG document.
///
/// Filled dots are solid circles; empty dots are outlines inset by half the
/// stroke so they stay inside the same square as a filled dot.
pub fn render_svg(scene: &Scene) -> String {
    let width = num(scene.canvas.width);
    let height = num(scene.canvas.height);
    let fg = scene.foreground.to_svg_rgb();

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );

    let bg = &scene.background;
    if bg.a == 255 {
        svg.push_str(&format!(
            r#"<rect width="{width}" height="{height}" fill="{}"/>"#,
            bg.to_svg_rgb()
        ));
    } else if bg.a > 0 {
        svg.push_str(&format!(
            r#"<rect width="{width}" height="{height}" fill="{}" fill-opacity="{}"/>"#,
            bg.to_svg_rgb(),
            num(bg.opacity())
        ));
    }

    let radius = scene.layout.dot_diameter / 2.0;
    let fg_opacity = scene.foreground.opacity();

    svg.push_str(&format!(r#"<g fill="{fg}""#));
    if fg_opacity < 1.0 {
        svg.push_str(&format!(r#" opacity="{}""#, num(fg_opacity)));
    }
    svg.push('>');
    for dot in scene.dots.iter().filter(|d| d.filled) {
        svg.push_str(&format!(
            r#"<circle cx="{}" cy="{}" r="{}"/>"#,
            num(dot.center_x),
            num(dot.center_y),
            num(radius)
        ));
    }
    svg.push_str("</g>");

    let stroke = scene.empty_stroke_width;
    let empty_radius = (radius - stroke / 2.0).max(0.0);
    svg.push_str(&format!(
        r#"<g fill="none" stroke="{fg}" stroke-width="{}" opacity="{}">"#,
        num(stroke),
        num(scene.empty_opacity * fg_opacity)
    ));
    for dot in scene.dots.iter().filter(|d| !d.filled) {
        svg.push_str(&format!(
            r#"<circle cx="{}" cy="{}" r="{}"/>"#,
            num(dot.center_x),
            num(dot.center_y),
            num(empty_radius)
        ));
    }
    svg.push_str("</g>");

    if let Some(caption) = &scene.caption {
        svg.push_str(&format!(
            r#"<text x="{}" y="{}" font-size="{}" font-family="{CAPTION_FONT_FAMILY}" fill="{fg}" text-anchor="middle" opacity="{}">{}</text>"#,
            num(caption.x),
            num(caption.y),
            num(caption.font_size),
            num(caption.opacity * fg_opacity),
            escape(&caption.text)
        ));
    }

    svg.push_str("</svg>");
    svg
}

/// Format a coordinate with at most two decimals and no trailing zeros.
fn num(value: f64) -> String {
    let mut s = format!("{value:.2}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
