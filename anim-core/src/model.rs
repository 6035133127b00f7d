//! Structured animation model
//!
//! These are the values carried in the JSON metadata block. Animated objects
//! are written in their compact 7-element array form; every other field is
//! written as a keyed object.

use serde::ser::{Serialize, SerializeTuple, Serializer};

/// Global scale factor and the ordered frames of an animation
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct AnimationMetadata {
    /// Global scale factor, must be positive
    pub ratio: f64,
    #[serde(rename = "frame")]
    pub frames: Vec<Frame>,
}

/// One step of an animation
///
/// `None` and `Some(vec![])` are distinct: a frame with neither field is an
/// empty frame, and it stays that way through a round-trip.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct Frame {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sound: Option<Vec<Sound>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objects: Option<Vec<AnimatedObject>>,
}

impl Frame {
    /// A frame with neither sounds nor objects
    pub const fn empty() -> Self {
        Self {
            sound: None,
            objects: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sound.is_none() && self.objects.is_none()
    }
}

/// Sound effect triggered on a frame
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Sound {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch: Option<f64>,
}

impl Sound {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            volume: None,
            pitch: None,
        }
    }
}

/// A positioned bitmap on a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedObject {
    /// Sprite slot this object draws
    pub index: u32,
    pub x: f64,
    pub y: f64,
    /// Percentage-like scale
    pub scale: f64,
    pub opacity: u8,
    pub mirror: bool,
    pub rotate: f64,
}

impl AnimatedObject {
    /// Object with mirror and rotate left at their defaults
    pub const fn new(index: u32, x: f64, y: f64, scale: f64, opacity: u8) -> Self {
        Self {
            index,
            x,
            y,
            scale,
            opacity,
            mirror: false,
            rotate: 0.0,
        }
    }
}

// [index, x, y, scale, opacity, mirror, rotate]
impl Serialize for AnimatedObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(crate::format::constants::object::TUPLE_LEN)?;
        tuple.serialize_element(&self.index)?;
        tuple.serialize_element(&self.x)?;
        tuple.serialize_element(&self.y)?;
        tuple.serialize_element(&self.scale)?;
        tuple.serialize_element(&self.opacity)?;
        tuple.serialize_element(&u8::from(self.mirror))?;
        tuple.serialize_element(&self.rotate)?;
        tuple.end()
    }
}
