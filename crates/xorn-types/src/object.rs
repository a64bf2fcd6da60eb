//! Object types and their payloads.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::attr::{Double2, FillAttr, LineAttr};
use crate::error::TypeError;
use crate::resource::Resource;

/// The closed set of object types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    Arc,
    Box,
    Circle,
    /// A symbol instance. The only type that may have attached children.
    Component,
    Line,
    Net,
    Path,
    Picture,
    Text,
}

impl ObjectType {
    /// Every object type, in declaration order.
    pub const ALL: [ObjectType; 9] = [
        Self::Arc,
        Self::Box,
        Self::Circle,
        Self::Component,
        Self::Line,
        Self::Net,
        Self::Path,
        Self::Picture,
        Self::Text,
    ];

    /// Whether objects of this type may act as a parent.
    pub fn is_container(self) -> bool {
        self == Self::Component
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Arc => "arc",
            Self::Box => "box",
            Self::Circle => "circle",
            Self::Component => "component",
            Self::Line => "line",
            Self::Net => "net",
            Self::Path => "path",
            Self::Picture => "picture",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectType {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| TypeError::UnknownObjectType(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// Circular arc. Angles are in degrees and unrestricted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchArc {
    pub pos: Double2,
    pub radius: f64,
    pub startangle: i32,
    pub sweepangle: i32,
    pub color: i32,
    pub line: LineAttr,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchBox {
    pub pos: Double2,
    pub size: Double2,
    pub color: i32,
    pub line: LineAttr,
    pub fill: FillAttr,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchCircle {
    pub pos: Double2,
    pub radius: f64,
    pub color: i32,
    pub line: LineAttr,
    pub fill: FillAttr,
}

/// Symbol instance. `symbol` is the external symbol definition.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchComponent {
    pub pos: Double2,
    pub selectable: bool,
    pub angle: i32,
    pub mirror: bool,
    #[serde(skip)]
    pub symbol: Resource,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchLine {
    pub pos: Double2,
    pub size: Double2,
    pub color: i32,
    pub line: LineAttr,
}

/// Net segment, bus segment or pin.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchNet {
    pub pos: Double2,
    pub size: Double2,
    pub color: i32,
    pub is_bus: bool,
    pub is_pin: bool,
    pub is_inverted: bool,
}

/// SVG-style path. `pathdata` holds the path commands.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchPath {
    pub pathdata: String,
    pub color: i32,
    pub line: LineAttr,
    pub fill: FillAttr,
}

/// Embedded or linked image. `pixmap` is the external image data.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchPicture {
    pub pos: Double2,
    pub size: Double2,
    pub angle: i32,
    pub mirror: bool,
    #[serde(skip)]
    pub pixmap: Resource,
}

/// Free text or attribute text.
///
/// `show_name_value` is one of 0 (name and value), 1 (value only),
/// 2 (name only). `alignment` is one of the nine anchor points, 0 to 8.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchText {
    pub pos: Double2,
    pub color: i32,
    pub text_size: i32,
    pub visibility: bool,
    pub show_name_value: i32,
    pub angle: i32,
    pub alignment: i32,
    pub text: String,
}

/// Payload of one object: a type tag plus the type-specific data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ObjectData {
    Arc(SchArc),
    Box(SchBox),
    Circle(SchCircle),
    Component(SchComponent),
    Line(SchLine),
    Net(SchNet),
    Path(SchPath),
    Picture(SchPicture),
    Text(SchText),
}

impl ObjectData {
    /// The type tag of this payload.
    pub fn object_type(&self) -> ObjectType {
        match self {
            Self::Arc(_) => ObjectType::Arc,
            Self::Box(_) => ObjectType::Box,
            Self::Circle(_) => ObjectType::Circle,
            Self::Component(_) => ObjectType::Component,
            Self::Line(_) => ObjectType::Line,
            Self::Net(_) => ObjectType::Net,
            Self::Path(_) => ObjectType::Path,
            Self::Picture(_) => ObjectType::Picture,
            Self::Text(_) => ObjectType::Text,
        }
    }

    /// A payload of the given type with every field zeroed.
    pub fn default_for(object_type: ObjectType) -> Self {
        match object_type {
            ObjectType::Arc => Self::Arc(SchArc::default()),
            ObjectType::Box => Self::Box(SchBox::default()),
            ObjectType::Circle => Self::Circle(SchCircle::default()),
            ObjectType::Component => Self::Component(SchComponent::default()),
            ObjectType::Line => Self::Line(SchLine::default()),
            ObjectType::Net => Self::Net(SchNet::default()),
            ObjectType::Path => Self::Path(SchPath::default()),
            ObjectType::Picture => Self::Picture(SchPicture::default()),
            ObjectType::Text => Self::Text(SchText::default()),
        }
    }

    /// Borrow the payload as `T` if the type matches.
    pub fn downcast<T: Payload>(&self) -> Option<&T> {
        T::from_data(self)
    }
}

/// A concrete payload struct that belongs to exactly one [`ObjectType`].
pub trait Payload: Clone + Into<ObjectData> {
    const TYPE: ObjectType;

    fn from_data(data: &ObjectData) -> Option<&Self>;
}

macro_rules! impl_payload {
    ($($variant:ident => $ty:ident),* $(,)?) => {
        $(
            impl Payload for $ty {
                const TYPE: ObjectType = ObjectType::$variant;

                fn from_data(data: &ObjectData) -> Option<&Self> {
                    match data {
                        ObjectData::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }
            }

            impl From<$ty> for ObjectData {
                fn from(value: $ty) -> Self {
                    ObjectData::$variant(value)
                }
            }
        )*
    };
}

impl_payload! {
    Arc => SchArc,
    Box => SchBox,
    Circle => SchCircle,
    Component => SchComponent,
    Line => SchLine,
    Net => SchNet,
    Path => SchPath,
    Picture => SchPicture,
    Text => SchText,
}
