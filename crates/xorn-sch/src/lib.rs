//! Schematic attribute helpers over selections.
//!
//! Property inspectors edit many objects at once. The getters here fold one
//! field over every selected object that has it and report an
//! [`AttrState`]; the setters rewrite that field on every such object in a
//! single atomic store operation.

pub mod attrst;
pub mod get;
pub mod set;

pub use attrst::AttrState;
pub use get::{get_angle, get_color, get_fill, get_line, get_pos, get_text_size};
pub use set::{set_color, set_fill, set_line, set_pos, set_text_size};
