//! Payload validation.
//!
//! One predicate per object type, composed from the shared field checks
//! below. Validation is pure and runs before normalization; a payload that
//! fails here is never installed in a revision.

use crate::attr::{Double2, FillAttr, LineAttr};
use crate::error::ValidationError;
use crate::object::{
    ObjectData, SchArc, SchBox, SchCircle, SchComponent, SchLine, SchNet, SchPath, SchPicture,
    SchText,
};

/// Number of colors in the palette; valid colors are `0..NUM_COLORS`.
pub const NUM_COLORS: i32 = 21;
pub const NUM_CAP_STYLES: i32 = 3;
pub const NUM_DASH_STYLES: i32 = 5;
pub const NUM_FILL_TYPES: i32 = 5;
pub const NUM_SHOW_NAME_VALUE: i32 = 3;
pub const NUM_ALIGNMENTS: i32 = 9;

type Validity = Result<(), ValidationError>;

/// Check that `data` is a well-formed payload for its type.
pub fn validate(data: &ObjectData) -> Validity {
    match data {
        ObjectData::Arc(d) => valid_arc(d),
        ObjectData::Box(d) => valid_box(d),
        ObjectData::Circle(d) => valid_circle(d),
        ObjectData::Component(d) => valid_component(d),
        ObjectData::Line(d) => valid_line(d),
        ObjectData::Net(d) => valid_net(d),
        ObjectData::Path(d) => valid_path(d),
        ObjectData::Picture(d) => valid_picture(d),
        ObjectData::Text(d) => valid_text(d),
    }
}

// ---------------------------------------------------------------------------
// Field checks
// ---------------------------------------------------------------------------

/// Zero or a finite normal number (no NaN, infinity or subnormal).
pub fn finite(field: &'static str, value: f64) -> Validity {
    if value == 0.0 || value.is_normal() {
        Ok(())
    } else {
        Err(ValidationError::NotFinite { field, value })
    }
}

/// Zero or a finite normal positive number.
pub fn finite_positive(field: &'static str, value: f64) -> Validity {
    finite(field, value)?;
    if value < 0.0 {
        return Err(ValidationError::Negative { field, value });
    }
    Ok(())
}

/// Integer in `[0, bound)`.
pub fn in_range(field: &'static str, value: i32, bound: i32) -> Validity {
    if (0..bound).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field,
            value,
            bound,
        })
    }
}

pub fn color(value: i32) -> Validity {
    in_range("color", value, NUM_COLORS)
}

/// One of the four cardinal angles.
pub fn angle(field: &'static str, value: i32) -> Validity {
    match value {
        0 | 90 | 180 | 270 => Ok(()),
        _ => Err(ValidationError::InvalidAngle { field, value }),
    }
}

fn pos(p: &Double2) -> Validity {
    finite("pos.x", p.x)?;
    finite("pos.y", p.y)
}

fn size(s: &Double2) -> Validity {
    finite("size.x", s.x)?;
    finite("size.y", s.y)
}

pub fn line_attr(line: &LineAttr) -> Validity {
    finite_positive("line.width", line.width)?;
    in_range("line.cap_style", line.cap_style, NUM_CAP_STYLES)?;
    in_range("line.dash_style", line.dash_style, NUM_DASH_STYLES)?;
    finite_positive("line.dash_length", line.dash_length)?;
    finite_positive("line.dash_space", line.dash_space)
}

pub fn fill_attr(fill: &FillAttr) -> Validity {
    in_range("fill.type", fill.fill_type, NUM_FILL_TYPES)?;
    finite_positive("fill.width", fill.width)?;
    finite_positive("fill.pitch0", fill.pitch0)?;
    finite_positive("fill.pitch1", fill.pitch1)
}

// ---------------------------------------------------------------------------
// Per-type predicates
// ---------------------------------------------------------------------------

fn valid_arc(d: &SchArc) -> Validity {
    pos(&d.pos)?;
    finite_positive("radius", d.radius)?;
    color(d.color)?;
    line_attr(&d.line)
}

fn valid_box(d: &SchBox) -> Validity {
    pos(&d.pos)?;
    size(&d.size)?;
    color(d.color)?;
    line_attr(&d.line)?;
    fill_attr(&d.fill)
}

fn valid_circle(d: &SchCircle) -> Validity {
    pos(&d.pos)?;
    finite_positive("radius", d.radius)?;
    color(d.color)?;
    line_attr(&d.line)?;
    fill_attr(&d.fill)
}

fn valid_component(d: &SchComponent) -> Validity {
    pos(&d.pos)?;
    angle("angle", d.angle)
}

fn valid_line(d: &SchLine) -> Validity {
    pos(&d.pos)?;
    size(&d.size)?;
    color(d.color)?;
    line_attr(&d.line)
}

fn valid_net(d: &SchNet) -> Validity {
    pos(&d.pos)?;
    size(&d.size)?;
    color(d.color)?;
    if d.is_inverted && !d.is_pin {
        return Err(ValidationError::InvertedNotPin);
    }
    Ok(())
}

fn valid_path(d: &SchPath) -> Validity {
    color(d.color)?;
    line_attr(&d.line)?;
    fill_attr(&d.fill)
}

fn valid_picture(d: &SchPicture) -> Validity {
    pos(&d.pos)?;
    size(&d.size)?;
    angle("angle", d.angle)
}

fn valid_text(d: &SchText) -> Validity {
    pos(&d.pos)?;
    color(d.color)?;
    if d.text_size < 0 {
        return Err(ValidationError::OutOfRange {
            field: "text_size",
            value: d.text_size,
            bound: i32::MAX,
        });
    }
    in_range("show_name_value", d.show_name_value, NUM_SHOW_NAME_VALUE)?;
    angle("angle", d.angle)?;
    in_range("alignment", d.alignment, NUM_ALIGNMENTS)
}
