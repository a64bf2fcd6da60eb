//! Foundation types for the xorn schematic object store.
//!
//! This crate provides the identity, payload and validation types shared by
//! every other xorn crate. It holds no state: the store itself lives in
//! `xorn-store`.
//!
//! # Key Types
//!
//! - [`ObjectId`]: Stable object identity (UUID v7), minted once per object
//! - [`ObjectType`]: The closed set of schematic object types
//! - [`ObjectData`]: Tagged union over the per-type payload structs
//! - [`LineAttr`] / [`FillAttr`]: Attribute groups shared by several types
//! - [`Resource`]: Reference-counted handle to an external resource
//!   (symbol, pixmap) embedded in a payload
//!
//! # Validation
//!
//! [`validate`] decides whether a payload is well-formed and [`normalize`]
//! canonicalizes fields that are irrelevant given a discriminant field. The
//! store always validates before it normalizes, and normalizes before a
//! payload is installed.

pub mod attr;
pub mod error;
pub mod id;
pub mod normalize;
pub mod object;
pub mod resource;
pub mod valid;

pub use attr::{Double2, FillAttr, LineAttr};
pub use error::{TypeError, ValidationError};
pub use id::ObjectId;
pub use normalize::normalize;
pub use object::{
    ObjectData, ObjectType, Payload, SchArc, SchBox, SchCircle, SchComponent, SchLine, SchNet,
    SchPath, SchPicture, SchText,
};
pub use resource::Resource;
pub use valid::validate;
