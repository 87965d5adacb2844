//! Typed input values carried by accept-input calls.
//!
//! The host hands over whatever value the map attached to an I/O connection.
//! Effects only ever need it as text (an ignite duration, an item name), so
//! [`Variant::render`] walks an ordered table of formatters and returns the
//! first rendering that applies. A value no formatter accepts renders as the
//! empty string.

use glam::{Quat, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Variant {
    #[default]
    Empty,
    String(String),
    Float(f32),
    Double(f64),
    Int32(i32),
    UInt32(u32),
    Bool(bool),
    Char(char),
    Int16(i16),
    UInt16(u16),
    Int64(i64),
    UInt64(u64),
    /// Raw entity handle value.
    Handle(u32),
    Vector2(Vec2),
    Vector(Vec3),
    Vector4(Vec4),
    /// Pitch, yaw, roll in degrees.
    QAngle(Vec3),
    Quaternion(Quat),
    Color([u8; 4]),
}

type Formatter = fn(&Variant) -> Option<String>;

fn vector(components: &[f32]) -> String {
    components
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn non_empty_string(v: &Variant) -> Option<String> {
    match v {
        Variant::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn float(v: &Variant) -> Option<String> {
    match v {
        Variant::Float(f) => Some(f.to_string()),
        _ => None,
    }
}

fn double(v: &Variant) -> Option<String> {
    match v {
        Variant::Double(d) => Some(d.to_string()),
        _ => None,
    }
}

fn int32(v: &Variant) -> Option<String> {
    match v {
        Variant::Int32(i) => Some(i.to_string()),
        _ => None,
    }
}

fn uint32(v: &Variant) -> Option<String> {
    match v {
        Variant::UInt32(u) => Some(u.to_string()),
        _ => None,
    }
}

fn other_scalar(v: &Variant) -> Option<String> {
    match v {
        Variant::Bool(b) => Some(b.to_string()),
        Variant::Char(c) => Some(c.to_string()),
        Variant::Int16(i) => Some(i.to_string()),
        Variant::UInt16(u) => Some(u.to_string()),
        Variant::Int64(i) => Some(i.to_string()),
        Variant::UInt64(u) => Some(u.to_string()),
        Variant::Handle(h) => Some(h.to_string()),
        _ => None,
    }
}

fn compound(v: &Variant) -> Option<String> {
    match v {
        Variant::Vector2(xy) => Some(vector(&xy.to_array())),
        Variant::Vector(xyz) | Variant::QAngle(xyz) => Some(vector(&xyz.to_array())),
        Variant::Vector4(xyzw) => Some(vector(&xyzw.to_array())),
        Variant::Quaternion(q) => Some(vector(&q.to_array())),
        Variant::Color([r, g, b, a]) => Some(format!("{r} {g} {b} {a}")),
        _ => None,
    }
}

/// Formatters in priority order; the first one returning `Some` wins.
const FORMATTERS: &[Formatter] = &[
    non_empty_string,
    float,
    double,
    int32,
    uint32,
    other_scalar,
    compound,
];

impl Variant {
    /// Text form of the value, or `""` when nothing applies.
    pub fn render(&self) -> String {
        FORMATTERS
            .iter()
            .find_map(|format| format(self))
            .unwrap_or_default()
    }

    /// Rendered value, or `None` when it is blank.
    pub fn text(&self) -> Option<String> {
        let rendered = self.render();
        if rendered.trim().is_empty() {
            None
        } else {
            Some(rendered)
        }
    }
}

impl From<&str> for Variant {
    fn from(value: &str) -> Self {
        Variant::String(value.to_string())
    }
}

impl From<f32> for Variant {
    fn from(value: f32) -> Self {
        Variant::Float(value)
    }
}
