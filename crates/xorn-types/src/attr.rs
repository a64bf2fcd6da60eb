//! Attribute groups shared by several object types.

use serde::{Deserialize, Serialize};

/// A pair of doubles: a position or a size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Double2 {
    pub x: f64,
    pub y: f64,
}

impl Double2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Stroke attributes of arcs, boxes, circles, lines and paths.
///
/// `cap_style` is one of 0 (none), 1 (square), 2 (round). `dash_style` is one
/// of 0 (solid), 1 (dotted), 2 (dashed), 3 (center), 4 (phantom).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineAttr {
    pub width: f64,
    pub cap_style: i32,
    pub dash_style: i32,
    pub dash_length: f64,
    pub dash_space: f64,
}

/// Fill attributes of boxes, circles and paths.
///
/// `fill_type` is one of 0 (hollow), 1 (fill), 2 (mesh), 3 (hatch), 4 (void).
/// Only mesh and hatch use the hatch geometry; only mesh uses the second
/// angle/pitch pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FillAttr {
    #[serde(rename = "type")]
    pub fill_type: i32,
    pub width: f64,
    pub angle0: i32,
    pub pitch0: f64,
    pub angle1: i32,
    pub pitch1: f64,
}

impl LineAttr {
    pub const SOLID: i32 = 0;
    pub const DOTTED: i32 = 1;

    /// A solid line of the given width with no caps.
    pub fn solid(width: f64) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }
}

impl FillAttr {
    pub const HOLLOW: i32 = 0;
    pub const FILL: i32 = 1;
    pub const MESH: i32 = 2;
    pub const HATCH: i32 = 3;
    pub const VOID: i32 = 4;

    /// Whether this fill type draws hatch lines (mesh or hatch).
    pub fn is_hatched(&self) -> bool {
        self.fill_type == Self::MESH || self.fill_type == Self::HATCH
    }
}
