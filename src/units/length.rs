use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::conversion::{parse_dimension_unit, ConversionError};

/// 박스 치수 단위. 내부 기준은 mm이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DimensionUnit {
    #[serde(rename = "mm")]
    Millimeter,
    #[serde(rename = "cm")]
    Centimeter,
    #[serde(rename = "inches")]
    Inch,
    #[serde(rename = "feet")]
    Foot,
}

impl DimensionUnit {
    pub const ALL: [DimensionUnit; 4] = [
        DimensionUnit::Millimeter,
        DimensionUnit::Centimeter,
        DimensionUnit::Inch,
        DimensionUnit::Foot,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DimensionUnit::Millimeter => "mm",
            DimensionUnit::Centimeter => "cm",
            DimensionUnit::Inch => "inches",
            DimensionUnit::Foot => "feet",
        }
    }

    /// 1 단위 길이를 mm로 환산한 값.
    pub fn to_mm(&self) -> f64 {
        match self {
            DimensionUnit::Millimeter => 1.0,
            DimensionUnit::Centimeter => 10.0,
            DimensionUnit::Inch => 25.4,
            DimensionUnit::Foot => 304.8,
        }
    }
}

/// 길이를 mm로 환산한다.
pub fn length_to_mm(value: f64, unit: DimensionUnit) -> f64 {
    value * unit.to_mm()
}

impl fmt::Display for DimensionUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for DimensionUnit {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_dimension_unit(s)
    }
}
