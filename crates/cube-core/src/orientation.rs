//! Discrete orientation symbols and the six canonical faces
//!
//! Each accelerometer axis discretizes into an [`AxisLevel`] or into nothing
//! at all when the reading sits in a dead zone. Three levels together form an
//! [`OrientationSymbol`]; the six symbols with exactly one saturated axis are
//! the canonical [`Orientation`]s a resting cube can report.

use crate::sample::Axis;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete level of one axis: -1, 0 or +1
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum AxisLevel {
    Negative,
    Neutral,
    Positive,
}

impl AxisLevel {
    pub const fn as_i8(self) -> i8 {
        match self {
            AxisLevel::Negative => -1,
            AxisLevel::Neutral => 0,
            AxisLevel::Positive => 1,
        }
    }
}

impl From<AxisLevel> for i8 {
    fn from(level: AxisLevel) -> i8 {
        level.as_i8()
    }
}

impl TryFrom<i8> for AxisLevel {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(AxisLevel::Negative),
            0 => Ok(AxisLevel::Neutral),
            1 => Ok(AxisLevel::Positive),
            other => Err(format!("axis level must be -1, 0 or 1, got {other}")),
        }
    }
}

/// Per-axis discretization of a single sample.
///
/// `None` on an axis means the reading fell in a dead zone; such a symbol is
/// never matched against an orientation table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrientationSymbol {
    pub x: Option<AxisLevel>,
    pub y: Option<AxisLevel>,
    pub z: Option<AxisLevel>,
}

impl OrientationSymbol {
    pub const fn new(x: Option<AxisLevel>, y: Option<AxisLevel>, z: Option<AxisLevel>) -> Self {
        Self { x, y, z }
    }

    /// Fully defined symbol from three levels
    pub const fn defined(x: AxisLevel, y: AxisLevel, z: AxisLevel) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            z: Some(z),
        }
    }

    pub const fn level(&self, axis: Axis) -> Option<AxisLevel> {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// True when no axis is in a dead zone
    pub fn is_defined(&self) -> bool {
        self.x.is_some() && self.y.is_some() && self.z.is_some()
    }

    /// Axes whose reading fell in a dead zone
    pub fn undefined_axes(&self) -> Vec<Axis> {
        Axis::ALL
            .into_iter()
            .filter(|&axis| self.level(axis).is_none())
            .collect()
    }

    /// Signed triple, available only for fully defined symbols
    pub fn to_triple(&self) -> Option<[i8; 3]> {
        Some([
            self.x?.as_i8(),
            self.y?.as_i8(),
            self.z?.as_i8(),
        ])
    }

    /// The canonical face this symbol names, if any
    pub fn orientation(&self) -> Option<Orientation> {
        Orientation::from_symbol(self)
    }
}

impl fmt::Display for OrientationSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |level: Option<AxisLevel>| match level {
            Some(l) => l.as_i8().to_string(),
            None => "?".to_string(),
        };
        write!(f, "({}, {}, {})", show(self.x), show(self.y), show(self.z))
    }
}

/// One of the six resting faces: the axis pointing up and its sign
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Orientation {
    #[serde(rename = "+x")]
    PositiveX,
    #[serde(rename = "-x")]
    NegativeX,
    #[serde(rename = "+y")]
    PositiveY,
    #[serde(rename = "-y")]
    NegativeY,
    #[serde(rename = "+z")]
    PositiveZ,
    #[serde(rename = "-z")]
    NegativeZ,
}

impl Orientation {
    pub const ALL: [Orientation; 6] = [
        Orientation::PositiveX,
        Orientation::NegativeX,
        Orientation::PositiveY,
        Orientation::NegativeY,
        Orientation::PositiveZ,
        Orientation::NegativeZ,
    ];

    pub const fn axis(self) -> Axis {
        match self {
            Orientation::PositiveX | Orientation::NegativeX => Axis::X,
            Orientation::PositiveY | Orientation::NegativeY => Axis::Y,
            Orientation::PositiveZ | Orientation::NegativeZ => Axis::Z,
        }
    }

    /// Level of the saturated axis
    pub const fn sign(self) -> AxisLevel {
        match self {
            Orientation::PositiveX | Orientation::PositiveY | Orientation::PositiveZ => {
                AxisLevel::Positive
            }
            _ => AxisLevel::Negative,
        }
    }

    /// The fully defined symbol for this face
    pub fn symbol(self) -> OrientationSymbol {
        let level = |axis: Axis| {
            if axis == self.axis() {
                self.sign()
            } else {
                AxisLevel::Neutral
            }
        };
        OrientationSymbol::defined(level(Axis::X), level(Axis::Y), level(Axis::Z))
    }

    /// Exactly one saturated axis and two neutral ones; anything else is `None`
    pub fn from_symbol(symbol: &OrientationSymbol) -> Option<Self> {
        Self::ALL.into_iter().find(|o| o.symbol() == *symbol)
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self.sign() {
            AxisLevel::Positive => '+',
            _ => '-',
        };
        write!(f, "{sign}{}", self.axis())
    }
}

/// The set of orientations a caller is prepared to act on.
///
/// The classifier only terminates on an orientation this set recognizes.
pub trait RecognizedOrientations {
    fn recognizes(&self, orientation: Orientation) -> bool;
}

/// Recognizes every canonical face
#[derive(Copy, Clone, Debug, Default)]
pub struct AllFaces;

impl RecognizedOrientations for AllFaces {
    fn recognizes(&self, _orientation: Orientation) -> bool {
        true
    }
}

impl RecognizedOrientations for [Orientation] {
    fn recognizes(&self, orientation: Orientation) -> bool {
        self.contains(&orientation)
    }
}

impl<const N: usize> RecognizedOrientations for [Orientation; N] {
    fn recognizes(&self, orientation: Orientation) -> bool {
        self.contains(&orientation)
    }
}

impl<R: RecognizedOrientations + ?Sized> RecognizedOrientations for &R {
    fn recognizes(&self, orientation: Orientation) -> bool {
        (**self).recognizes(orientation)
    }
}
