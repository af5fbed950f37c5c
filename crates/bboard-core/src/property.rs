#![forbid(unsafe_code)]

//! Graph-exposed properties.
//!
//! A [`Property`] is a named, typed, identified value that the graph exposes
//! to the blackboard panel. Only four facts matter to the panel:
//!
//! - a stable [`PropertyId`] (UUID v4, immutable for the property's lifetime),
//! - a mutable display name, unique among siblings after sanitization,
//! - a [`PropertyKind`] tag fixed at creation,
//! - a default [`PropertyValue`] whose tag always matches the kind.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PropertyId(Uuid);

impl PropertyId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PropertyId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Kind tag of a property.
///
/// Variants are declared in add-item menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PropertyKind {
    Boolean,
    Float,
    Int,
    String,
    Vector4,
    Vector3,
    Vector2,
    Matrix4x4,
    Quaternion,
    Color,
    Bounds,
    Rect,
    Texture2D,
    Cubemap,
    Gradient,
    AnimationCurve,
}

impl PropertyKind {
    /// Every kind, in menu order.
    pub const ALL: [Self; 16] = [
        Self::Boolean,
        Self::Float,
        Self::Int,
        Self::String,
        Self::Vector4,
        Self::Vector3,
        Self::Vector2,
        Self::Matrix4x4,
        Self::Quaternion,
        Self::Color,
        Self::Bounds,
        Self::Rect,
        Self::Texture2D,
        Self::Cubemap,
        Self::Gradient,
        Self::AnimationCurve,
    ];

    /// Label shown in the add-item menu and as the row's type text.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Boolean => "Boolean",
            Self::Float => "Float",
            Self::Int => "Int",
            Self::String => "String",
            Self::Vector4 => "Vector4",
            Self::Vector3 => "Vector3",
            Self::Vector2 => "Vector2",
            Self::Matrix4x4 => "Matrix4x4",
            Self::Quaternion => "Quaternion",
            Self::Color => "Color",
            Self::Bounds => "Bounds",
            Self::Rect => "Rect",
            Self::Texture2D => "Texture2D",
            Self::Cubemap => "Cubemap",
            Self::Gradient => "Gradient",
            Self::AnimationCurve => "AnimationCurve",
        }
    }

    /// Display name given to a freshly created property of this kind.
    #[must_use]
    pub const fn default_name(self) -> &'static str {
        self.label()
    }

    /// Default value of this kind.
    #[must_use]
    pub fn default_value(self) -> PropertyValue {
        match self {
            Self::Boolean => PropertyValue::Boolean(false),
            Self::Float => PropertyValue::Float(0.0),
            Self::Int => PropertyValue::Int(0),
            Self::String => PropertyValue::String(String::new()),
            Self::Vector4 => PropertyValue::Vector4([0.0; 4]),
            Self::Vector3 => PropertyValue::Vector3([0.0; 3]),
            Self::Vector2 => PropertyValue::Vector2([0.0; 2]),
            Self::Matrix4x4 => PropertyValue::Matrix4x4(IDENTITY_4X4),
            Self::Quaternion => PropertyValue::Quaternion([0.0, 0.0, 0.0, 1.0]),
            Self::Color => PropertyValue::Color([0.0, 0.0, 0.0, 1.0]),
            Self::Bounds => PropertyValue::Bounds {
                center: [0.0; 3],
                extents: [0.0; 3],
            },
            Self::Rect => PropertyValue::Rect([0.0; 4]),
            Self::Texture2D => PropertyValue::Texture2D(None),
            Self::Cubemap => PropertyValue::Cubemap(None),
            Self::Gradient => PropertyValue::Gradient(vec![
                GradientKey {
                    time: 0.0,
                    color: [1.0; 4],
                },
                GradientKey {
                    time: 1.0,
                    color: [1.0; 4],
                },
            ]),
            Self::AnimationCurve => PropertyValue::AnimationCurve(Vec::new()),
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

const IDENTITY_4X4: [[f32; 4]; 4] = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// A color stop of a gradient value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GradientKey {
    pub time: f32,
    pub color: [f32; 4],
}

/// A `(time, value)` keyframe of a curve value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Keyframe {
    pub time: f32,
    pub value: f32,
}

/// Opaque default value carried by a property.
///
/// Asset-backed kinds hold an optional asset path.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PropertyValue {
    Boolean(bool),
    Float(f32),
    Int(i32),
    String(String),
    Vector4([f32; 4]),
    Vector3([f32; 3]),
    Vector2([f32; 2]),
    Matrix4x4([[f32; 4]; 4]),
    Quaternion([f32; 4]),
    Color([f32; 4]),
    Bounds { center: [f32; 3], extents: [f32; 3] },
    /// `[x, y, width, height]`
    Rect([f32; 4]),
    Texture2D(Option<String>),
    Cubemap(Option<String>),
    Gradient(Vec<GradientKey>),
    AnimationCurve(Vec<Keyframe>),
}

impl PropertyValue {
    /// Kind tag of this value.
    #[must_use]
    pub const fn kind(&self) -> PropertyKind {
        match self {
            Self::Boolean(_) => PropertyKind::Boolean,
            Self::Float(_) => PropertyKind::Float,
            Self::Int(_) => PropertyKind::Int,
            Self::String(_) => PropertyKind::String,
            Self::Vector4(_) => PropertyKind::Vector4,
            Self::Vector3(_) => PropertyKind::Vector3,
            Self::Vector2(_) => PropertyKind::Vector2,
            Self::Matrix4x4(_) => PropertyKind::Matrix4x4,
            Self::Quaternion(_) => PropertyKind::Quaternion,
            Self::Color(_) => PropertyKind::Color,
            Self::Bounds { .. } => PropertyKind::Bounds,
            Self::Rect(_) => PropertyKind::Rect,
            Self::Texture2D(_) => PropertyKind::Texture2D,
            Self::Cubemap(_) => PropertyKind::Cubemap,
            Self::Gradient(_) => PropertyKind::Gradient,
            Self::AnimationCurve(_) => PropertyKind::AnimationCurve,
        }
    }
}

/// A named, typed, identified value exposed by the graph.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Property {
    id: PropertyId,
    display_name: String,
    kind: PropertyKind,
    default_value: PropertyValue,
}

impl Property {
    /// Create a default-valued property of `kind` named after the kind.
    #[must_use]
    pub fn new(kind: PropertyKind) -> Self {
        Self::named(kind, kind.default_name())
    }

    /// Create a default-valued property of `kind` with a display name.
    ///
    /// The name is stored as given; sibling uniqueness is the graph's concern.
    #[must_use]
    pub fn named(kind: PropertyKind, display_name: impl Into<String>) -> Self {
        Self {
            id: PropertyId::new(),
            display_name: display_name.into(),
            kind,
            default_value: kind.default_value(),
        }
    }

    /// Replace the generated id (builder). Used when ids come from storage.
    #[must_use]
    pub fn with_id(mut self, id: PropertyId) -> Self {
        self.id = id;
        self
    }

    /// Replace the default value (builder).
    ///
    /// A value whose tag differs from the property's kind is ignored.
    #[must_use]
    pub fn with_default_value(mut self, value: PropertyValue) -> Self {
        if value.kind() == self.kind {
            self.default_value = value;
        }
        self
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> PropertyId {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Set the display name.
    pub fn set_display_name(&mut self, name: impl Into<String>) {
        self.display_name = name.into();
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> PropertyKind {
        self.kind
    }

    #[inline]
    #[must_use]
    pub fn default_value(&self) -> &PropertyValue {
        &self.default_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let a = PropertyId::new();
        let b = PropertyId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn id_display_is_uuid_text() {
        let uuid = Uuid::from_u128(0x1234);
        let id = PropertyId::from_uuid(uuid);
        assert_eq!(id.to_string(), uuid.to_string());
        assert_eq!(id.as_uuid(), &uuid);
    }

    #[test]
    fn default_value_tag_matches_kind_for_every_kind() {
        for kind in PropertyKind::ALL {
            assert_eq!(kind.default_value().kind(), kind, "{kind}");
        }
    }

    #[test]
    fn new_property_is_named_after_kind() {
        let p = Property::new(PropertyKind::Vector3);
        assert_eq!(p.display_name(), "Vector3");
        assert_eq!(p.kind(), PropertyKind::Vector3);
        assert_eq!(p.default_value(), &PropertyValue::Vector3([0.0; 3]));
    }

    #[test]
    fn mismatched_default_value_is_ignored() {
        let p = Property::new(PropertyKind::Float).with_default_value(PropertyValue::Int(3));
        assert_eq!(p.default_value(), &PropertyValue::Float(0.0));
        let p = p.with_default_value(PropertyValue::Float(2.5));
        assert_eq!(p.default_value(), &PropertyValue::Float(2.5));
    }

    #[test]
    fn menu_order_labels() {
        let labels: Vec<&str> = PropertyKind::ALL.iter().map(|k| k.label()).collect();
        assert_eq!(labels.first(), Some(&"Boolean"));
        assert_eq!(labels.last(), Some(&"AnimationCurve"));
        assert_eq!(labels.len(), 16);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn property_json_round_trip_keeps_id() {
        let p = Property::named(PropertyKind::Color, "Tint");
        let json = serde_json::to_string(&p).unwrap();
        let back: Property = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
