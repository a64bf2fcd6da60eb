//! Canonicalization of payload fields that a discriminant makes irrelevant.
//!
//! Normalization is idempotent and only ever zeroes fields, so a normalized
//! payload that was valid before stays valid.

use crate::attr::{FillAttr, LineAttr};
use crate::object::ObjectData;

/// Normalize `data` in place.
pub fn normalize(data: &mut ObjectData) {
    match data {
        ObjectData::Arc(d) => normalize_line(&mut d.line),
        ObjectData::Box(d) => {
            normalize_line(&mut d.line);
            normalize_fill(&mut d.fill);
        }
        ObjectData::Circle(d) => {
            normalize_line(&mut d.line);
            normalize_fill(&mut d.fill);
        }
        ObjectData::Line(d) => normalize_line(&mut d.line),
        ObjectData::Path(d) => {
            normalize_string(&mut d.pathdata);
            normalize_line(&mut d.line);
            normalize_fill(&mut d.fill);
        }
        ObjectData::Text(d) => normalize_string(&mut d.text),
        ObjectData::Component(_) | ObjectData::Net(_) | ObjectData::Picture(_) => {}
    }
}

/// Solid and dotted lines have no dash length; solid lines have no dash
/// spacing either.
pub fn normalize_line(line: &mut LineAttr) {
    if line.dash_style == LineAttr::SOLID || line.dash_style == LineAttr::DOTTED {
        line.dash_length = 0.0;
    }
    if line.dash_style == LineAttr::SOLID {
        line.dash_space = 0.0;
    }
}

/// Only mesh and hatch fills carry hatch geometry; only mesh carries the
/// second angle/pitch pair.
pub fn normalize_fill(fill: &mut FillAttr) {
    if !fill.is_hatched() {
        fill.width = 0.0;
        fill.angle0 = 0;
        fill.pitch0 = 0.0;
    }
    if fill.fill_type != FillAttr::MESH {
        fill.angle1 = 0;
        fill.pitch1 = 0.0;
    }
}

/// An empty string owns no buffer.
fn normalize_string(s: &mut String) {
    if s.is_empty() {
        *s = String::new();
    }
}
