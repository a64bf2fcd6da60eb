//! Atomic bulk setters.
//!
//! Each setter rewrites one field on every selected object whose type has
//! that field and leaves other objects alone. All new payloads are validated
//! before any is installed, so an invalid value changes nothing.

use tracing::debug;
use xorn_store::{Revision, Selection, StoreResult};
use xorn_types::{Double2, FillAttr, LineAttr, ObjectData};

/// Apply `edit` to a copy of every selected payload; `edit` returns `false`
/// when the payload has no such field.
fn apply(
    rev: &mut Revision,
    sel: &Selection,
    field: &'static str,
    edit: impl Fn(&mut ObjectData) -> bool,
) -> StoreResult<()> {
    let mut updates = Vec::new();
    for id in rev.get_selected_objects(sel) {
        let Some(current) = rev.get_object_data(&id) else {
            continue;
        };
        let mut data = current.clone();
        if edit(&mut data) {
            updates.push((id, data));
        }
    }
    let count = updates.len();
    rev.set_objects_data(updates)?;
    debug!(field, count, "bulk update");
    Ok(())
}

pub fn set_color(rev: &mut Revision, sel: &Selection, color: i32) -> StoreResult<()> {
    apply(rev, sel, "color", |data| {
        let slot = match data {
            ObjectData::Arc(d) => &mut d.color,
            ObjectData::Box(d) => &mut d.color,
            ObjectData::Circle(d) => &mut d.color,
            ObjectData::Line(d) => &mut d.color,
            ObjectData::Net(d) => &mut d.color,
            ObjectData::Path(d) => &mut d.color,
            ObjectData::Text(d) => &mut d.color,
            ObjectData::Component(_) | ObjectData::Picture(_) => return false,
        };
        *slot = color;
        true
    })
}

pub fn set_line(rev: &mut Revision, sel: &Selection, line: LineAttr) -> StoreResult<()> {
    apply(rev, sel, "line", |data| {
        let slot = match data {
            ObjectData::Arc(d) => &mut d.line,
            ObjectData::Box(d) => &mut d.line,
            ObjectData::Circle(d) => &mut d.line,
            ObjectData::Line(d) => &mut d.line,
            ObjectData::Path(d) => &mut d.line,
            _ => return false,
        };
        *slot = line;
        true
    })
}

pub fn set_fill(rev: &mut Revision, sel: &Selection, fill: FillAttr) -> StoreResult<()> {
    apply(rev, sel, "fill", |data| {
        let slot = match data {
            ObjectData::Box(d) => &mut d.fill,
            ObjectData::Circle(d) => &mut d.fill,
            ObjectData::Path(d) => &mut d.fill,
            _ => return false,
        };
        *slot = fill;
        true
    })
}

pub fn set_pos(rev: &mut Revision, sel: &Selection, pos: Double2) -> StoreResult<()> {
    apply(rev, sel, "pos", |data| {
        let slot = match data {
            ObjectData::Arc(d) => &mut d.pos,
            ObjectData::Box(d) => &mut d.pos,
            ObjectData::Circle(d) => &mut d.pos,
            ObjectData::Component(d) => &mut d.pos,
            ObjectData::Line(d) => &mut d.pos,
            ObjectData::Net(d) => &mut d.pos,
            ObjectData::Picture(d) => &mut d.pos,
            ObjectData::Text(d) => &mut d.pos,
            ObjectData::Path(_) => return false,
        };
        *slot = pos;
        true
    })
}

pub fn set_text_size(rev: &mut Revision, sel: &Selection, text_size: i32) -> StoreResult<()> {
    apply(rev, sel, "text_size", |data| match data {
        ObjectData::Text(d) => {
            d.text_size = text_size;
            true
        }
        _ => false,
    })
}
