// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use super::{Canvas, Fill, Point};
use std::fmt::Write;

/// Physical size of one figure unit at scale 1.
const INCHES_PER_UNIT: f64 = 0.5;
const STROKE_WIDTH: f64 = 0.03;

/// Collects drawing calls into an SVG document.
#[derive(Debug)]
pub struct SvgCanvas {
    width: f64,
    height: f64,
    scale: f64,
    body: String,
}

impl SvgCanvas {
    /// A canvas `width` by `height` figure units, printed `scale` times
    /// its natural size.
    #[must_use]
    pub fn new(width: f64, height: f64, scale: f64) -> Self {
        Self {
            width,
            height,
            scale,
            body: String::new(),
        }
    }

    /// The complete document.
    #[must_use]
    pub fn finish(self) -> String {
        let inches = INCHES_PER_UNIT * self.scale;
        format!(
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.3}in" height="{:.3}in" viewBox="0 0 {:.3} {:.3}">"#,
                "\n",
                r#"<rect x="0" y="0" width="100%" height="100%" fill="white"/>"#,
                "\n{}</svg>\n"
            ),
            self.width * inches,
            self.height * inches,
            self.width,
            self.height,
            self.body,
        )
    }
}

impl Canvas for SvgCanvas {
    fn line(&mut self, from: Point, to: Point) {
        let _ = writeln!(
            self.body,
            r#"<line x1="{:.3}" y1="{:.3}" x2="{:.3}" y2="{:.3}" stroke="black" stroke-width="{STROKE_WIDTH}"/>"#,
            from.x, from.y, to.x, to.y
        );
    }

    fn rect(&mut self, top_left: Point, width: f64, height: f64) {
        let _ = writeln!(
            self.body,
            r#"<rect x="{:.3}" y="{:.3}" width="{width:.3}" height="{height:.3}" fill="white" stroke="black" stroke-width="{STROKE_WIDTH}"/>"#,
            top_left.x, top_left.y
        );
    }

    fn circle(&mut self, center: Point, radius: f64, fill: Fill) {
        let fill = match fill {
            Fill::Solid => "black",
            Fill::Hollow => "white",
        };
        let _ = writeln!(
            self.body,
            r#"<circle cx="{:.3}" cy="{:.3}" r="{radius:.3}" fill="{fill}" stroke="black" stroke-width="{STROKE_WIDTH}"/>"#,
            center.x, center.y
        );
    }

    fn text(&mut self, at: Point, text: &str, size: f64) {
        let _ = writeln!(
            self.body,
            r#"<text x="{:.3}" y="{:.3}" font-size="{size:.3}" font-family="serif" text-anchor="middle" dominant-baseline="central">{}</text>"#,
            at.x,
            at.y,
            escape(text)
        );
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
