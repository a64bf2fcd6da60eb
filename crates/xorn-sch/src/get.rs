//! Tri-state field getters.

use xorn_store::{Revision, Selection};
use xorn_types::{Double2, FillAttr, LineAttr, ObjectData};

use crate::attrst::AttrState;

/// Fold `field` over every selected object present in `rev`.
fn fold<T: PartialEq>(
    rev: &Revision,
    sel: &Selection,
    field: impl Fn(&ObjectData) -> Option<T>,
) -> AttrState<T> {
    rev.get_selected_objects(sel)
        .iter()
        .filter_map(|id| rev.get_object_data(id))
        .filter_map(field)
        .collect()
}

fn color_of(data: &ObjectData) -> Option<i32> {
    match data {
        ObjectData::Arc(d) => Some(d.color),
        ObjectData::Box(d) => Some(d.color),
        ObjectData::Circle(d) => Some(d.color),
        ObjectData::Line(d) => Some(d.color),
        ObjectData::Net(d) => Some(d.color),
        ObjectData::Path(d) => Some(d.color),
        ObjectData::Text(d) => Some(d.color),
        ObjectData::Component(_) | ObjectData::Picture(_) => None,
    }
}

fn line_of(data: &ObjectData) -> Option<LineAttr> {
    match data {
        ObjectData::Arc(d) => Some(d.line),
        ObjectData::Box(d) => Some(d.line),
        ObjectData::Circle(d) => Some(d.line),
        ObjectData::Line(d) => Some(d.line),
        ObjectData::Path(d) => Some(d.line),
        _ => None,
    }
}

fn fill_of(data: &ObjectData) -> Option<FillAttr> {
    match data {
        ObjectData::Box(d) => Some(d.fill),
        ObjectData::Circle(d) => Some(d.fill),
        ObjectData::Path(d) => Some(d.fill),
        _ => None,
    }
}

fn pos_of(data: &ObjectData) -> Option<Double2> {
    match data {
        ObjectData::Arc(d) => Some(d.pos),
        ObjectData::Box(d) => Some(d.pos),
        ObjectData::Circle(d) => Some(d.pos),
        ObjectData::Component(d) => Some(d.pos),
        ObjectData::Line(d) => Some(d.pos),
        ObjectData::Net(d) => Some(d.pos),
        ObjectData::Picture(d) => Some(d.pos),
        ObjectData::Text(d) => Some(d.pos),
        ObjectData::Path(_) => None,
    }
}

fn angle_of(data: &ObjectData) -> Option<i32> {
    match data {
        ObjectData::Component(d) => Some(d.angle),
        ObjectData::Picture(d) => Some(d.angle),
        ObjectData::Text(d) => Some(d.angle),
        _ => None,
    }
}

pub fn get_color(rev: &Revision, sel: &Selection) -> AttrState<i32> {
    fold(rev, sel, color_of)
}

pub fn get_line(rev: &Revision, sel: &Selection) -> AttrState<LineAttr> {
    fold(rev, sel, line_of)
}

pub fn get_fill(rev: &Revision, sel: &Selection) -> AttrState<FillAttr> {
    fold(rev, sel, fill_of)
}

pub fn get_pos(rev: &Revision, sel: &Selection) -> AttrState<Double2> {
    fold(rev, sel, pos_of)
}

pub fn get_text_size(rev: &Revision, sel: &Selection) -> AttrState<i32> {
    fold(rev, sel, |data| match data {
        ObjectData::Text(d) => Some(d.text_size),
        _ => None,
    })
}

/// Rotation of components, pictures and texts.
pub fn get_angle(rev: &Revision, sel: &Selection) -> AttrState<i32> {
    fold(rev, sel, angle_of)
}
