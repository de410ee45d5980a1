use num_traits::Float;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};

/// Floating-point width a run works in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    #[default]
    Single,
    Double,
}

impl Precision {
    pub fn name(self) -> &'static str {
        match self {
            Precision::Single => "single",
            Precision::Double => "double",
        }
    }
}

/// Sample and centroid element type (`f32` or `f64`).
pub trait Element:
    Float + Default + Debug + Display + Serialize + Send + Sync + 'static
{
    const PRECISION: Precision;

    /// Normalizes an 8-bit intensity into `[0, 1]` (`byte / 255`).
    fn from_byte(byte: u8) -> Self;

    /// Exact conversion of a cluster index, used for seeding.
    fn from_index(index: usize) -> Self;

    fn widen(self) -> f64;

    fn narrow(value: f64) -> Self;

    /// `self * scale`, computed at this precision and truncated to a byte.
    fn to_level(self, scale: f32) -> u8;
}

impl Element for f32 {
    const PRECISION: Precision = Precision::Single;

    fn from_byte(byte: u8) -> f32 {
        byte as f32 / 255.0
    }

    fn from_index(index: usize) -> f32 {
        index as f32
    }

    fn widen(self) -> f64 {
        self as f64
    }

    fn narrow(value: f64) -> f32 {
        value as f32
    }

    fn to_level(self, scale: f32) -> u8 {
        (self * scale) as u8
    }
}

impl Element for f64 {
    const PRECISION: Precision = Precision::Double;

    fn from_byte(byte: u8) -> f64 {
        byte as f64 / 255.0
    }

    fn from_index(index: usize) -> f64 {
        index as f64
    }

    fn widen(self) -> f64 {
        self
    }

    fn narrow(value: f64) -> f64 {
        value
    }

    fn to_level(self, scale: f32) -> u8 {
        (self * scale as f64) as u8
    }
}
