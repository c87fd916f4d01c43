// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The HTML page embedding every figure with its dropdowns.

use crate::figure::{Control, Figure};
use crate::page::{FigureStatus, Page};
use crate::svg::{escape_xml, panel_svg};

/// Renders `page` as a standalone HTML document.
///
/// Figures that failed to load keep their section, with the reason in place of the panels.
pub fn render_page(title: &str, page: &Page) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", escape_xml(title)));
    out.push_str(STYLE);
    out.push_str("</head>\n<body>\n");
    out.push_str(&format!("<h1>{}</h1>\n", escape_xml(title)));
    for figure in page.figures() {
        let status = page.status(figure.id()).unwrap_or(&FigureStatus::Pending);
        write_figure(&mut out, figure, status);
    }
    out.push_str("</body>\n</html>\n");
    out
}

fn write_figure(out: &mut String, figure: &dyn Figure, status: &FigureStatus) {
    let id = escape_xml(figure.id());
    out.push_str(&format!("<section class=\"figure\" id=\"{id}\">\n"));
    out.push_str(&format!("<h2>{}</h2>\n", escape_xml(figure.title())));
    for control in figure.controls() {
        write_control(out, control);
    }
    match status {
        FigureStatus::Ready => {
            out.push_str("<div class=\"panels\">\n");
            for panel in figure.panels() {
                out.push_str(&panel_svg(panel));
            }
            out.push_str("</div>\n");
        }
        FigureStatus::Pending => out.push_str("<p class=\"status\">Not rendered.</p>\n"),
        FigureStatus::Failed(reason) => out.push_str(&format!(
            "<p class=\"status\">Could not load this figure: {}</p>\n",
            escape_xml(reason)
        )),
    }
    out.push_str("</section>\n");
}

fn write_control(out: &mut String, control: &Control) {
    out.push_str("<div class=\"title\">");
    if !control.label.is_empty() {
        out.push_str(&format!("{} ", escape_xml(&control.label)));
    }
    out.push_str(&format!(
        "<select class=\"select-mixture\" name=\"{}\">",
        escape_xml(&control.id)
    ));
    for (value, label) in &control.options {
        let selected = if *value == control.selected { " selected" } else { "" };
        out.push_str(&format!(
            "<option value=\"{}\"{selected}>{}</option>",
            escape_xml(value),
            escape_xml(label)
        ));
    }
    out.push_str("</select>");
    if !control.suffix.is_empty() {
        out.push_str(&format!(" {}", escape_xml(&control.suffix)));
    }
    out.push_str("</div>\n");
}

const STYLE: &str = "<style>
body { font-family: sans-serif; max-width: 960px; margin: 0 auto; }
.figure { margin: 2em 0; }
.title { text-align: center; margin: 0.5em 0; }
.panels { display: flex; flex-wrap: wrap; justify-content: center; }
.panels svg { flex: 1 1 300px; max-width: 600px; }
.status { color: #a00; }
</style>
";
