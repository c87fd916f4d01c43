// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG serialization of a panel's current marks.

use figkit_core::{MarkPayload, TextAnchor, TextBaseline};
use peniko::Brush;

use crate::figure::Panel;

/// Serializes the marks of `panel` in paint order, sized to the panel's viewport.
pub fn panel_svg(panel: &Panel) -> String {
    let view_box = panel.frame.outer();
    let mut out = String::new();
    out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
    out.push_str(&format!(
        r#"viewBox="{} {} {} {}" preserveAspectRatio="xMinYMin meet" data-panel="{}">"#,
        view_box.x0,
        view_box.y0,
        view_box.width(),
        view_box.height(),
        escape_xml(&panel.name),
    ));
    out.push('\n');

    for (_id, _z, payload) in panel.scene.iter_sorted() {
        match payload {
            MarkPayload::Rect(r) => {
                out.push_str(&format!(
                    r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                    r.rect.x0,
                    r.rect.y0,
                    r.rect.width(),
                    r.rect.height(),
                ));
                write_paint_attr(&mut out, "fill", &r.fill);
                write_stroke(&mut out, &r.stroke, r.stroke_width, None);
                out.push_str("/>\n");
            }
            MarkPayload::Circle(c) => {
                out.push_str(&format!(
                    r#"<circle cx="{}" cy="{}" r="{}""#,
                    c.center.x, c.center.y, c.radius
                ));
                write_paint_attr(&mut out, "fill", &c.fill);
                write_stroke(&mut out, &c.stroke, c.stroke_width, None);
                out.push_str("/>\n");
            }
            MarkPayload::Path(p) => {
                let d = p.path.to_svg();
                out.push_str(&format!(r#"<path d="{d}""#));
                write_paint_attr(&mut out, "fill", &p.fill);
                write_stroke(&mut out, &p.stroke, p.stroke_width, p.dash);
                out.push_str("/>\n");
            }
            MarkPayload::Text(t) => {
                let baseline = match t.baseline {
                    TextBaseline::Middle => "middle",
                    TextBaseline::Alphabetic => "alphabetic",
                    TextBaseline::Hanging => "hanging",
                };
                out.push_str(&format!(
                    r#"<text x="{}" y="{}" font-size="{}" dominant-baseline="{}""#,
                    t.pos.x, t.pos.y, t.font_size, baseline
                ));
                if t.angle != 0.0 {
                    out.push_str(&format!(
                        r#" transform="rotate({} {} {})""#,
                        t.angle, t.pos.x, t.pos.y
                    ));
                }
                out.push_str(match t.anchor {
                    TextAnchor::Start => r#" text-anchor="start""#,
                    TextAnchor::Middle => r#" text-anchor="middle""#,
                    TextAnchor::End => r#" text-anchor="end""#,
                });
                write_paint_attr(&mut out, "fill", &t.fill);
                out.push('>');
                out.push_str(&escape_xml(&t.text));
                out.push_str("</text>\n");
            }
        }
    }

    out.push_str("</svg>\n");
    out
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let paint = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (paint, opacity)
        }
        _ => ("none".to_owned(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    out.push_str(&format!(r#" {name}="{value}""#));
    if let Some(o) = opacity {
        out.push_str(&format!(r#" {name}-opacity="{o}""#));
    }
}

fn write_stroke(out: &mut String, brush: &Brush, width: f64, dash: Option<f64>) {
    if width <= 0.0 {
        return;
    }
    write_paint_attr(out, "stroke", brush);
    out.push_str(&format!(r#" stroke-width="{width}""#));
    if let Some(dash) = dash {
        out.push_str(&format!(r#" stroke-dasharray="{dash}""#));
    }
}

/// Escapes the five XML special characters.
pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    extern crate std;

    use figkit_charts::{
        CircleMarkSpec, Frame, Layer, Margin, RuleMarkSpec, TextMarkSpec, apply_layers,
    };
    use figkit_core::{GroupId, Transition};
    use kurbo::Point;
    use peniko::Color;
    use peniko::color::palette::css;

    use super::*;

    #[test]
    fn marks_serialize_with_paint_and_dash() {
        let mut panel = Panel::new("swarm", Frame::new(600.0, 350.0, Margin::uniform(10.0)));
        let group = GroupId::named("svg-test");
        let marks = vec![
            CircleMarkSpec::new(group, "dot", Point::new(10.0, 20.0), 7.0)
                .with_fill(Color::TRANSPARENT)
                .with_stroke(css::STEEL_BLUE, 2.0)
                .mark(),
            RuleMarkSpec::horizontal(group, "zero", 50.0, 0.0, 100.0)
                .with_stroke(css::GRAY, 1.0)
                .with_dash(4.0)
                .mark(),
            TextMarkSpec::new(group, "label", Point::new(5.0, 5.0))
                .with_text("X!Tandem & <Comet>")
                .with_angle(-90.0)
                .mark(),
        ];
        apply_layers(
            &mut panel.scene,
            [Layer::with_marks(group, marks, Transition::NONE)],
            0.0,
        );
        let svg = panel_svg(&panel);
        assert!(svg.starts_with("<svg"), "root element");
        assert!(svg.contains(r#"viewBox="0 0 600 350""#), "panel viewport");
        assert!(svg.contains(r#"<circle cx="10" cy="20" r="7""#), "circle geometry");
        assert!(svg.contains(r#"fill-opacity="0""#), "transparent fill");
        assert!(svg.contains(r##"stroke="#4682b4""##), "steelblue ring");
        assert!(svg.contains(r#"stroke-dasharray="4""#), "dashed rule");
        assert!(svg.contains("X!Tandem &amp; &lt;Comet&gt;"), "escaped text");
        assert!(svg.contains(r#"rotate(-90 5 5)"#), "rotated label");
    }
}
