use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::conversion::{parse_volume_unit, ConversionError};

/// 체적 단위. 내부 기준은 mm³이다.
///
/// 박스 결과 단위로는 입방피트를 제외한 세 가지만 허용되고,
/// 잔여 체적/비교 화면은 네 가지 모두 사용한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VolumeUnit {
    #[serde(rename = "cubic mm")]
    CubicMillimeter,
    #[serde(rename = "cubic cm")]
    CubicCentimeter,
    #[serde(rename = "cubic inches")]
    CubicInch,
    #[serde(rename = "cubic feet")]
    CubicFoot,
}

impl VolumeUnit {
    pub const ALL: [VolumeUnit; 4] = [
        VolumeUnit::CubicMillimeter,
        VolumeUnit::CubicCentimeter,
        VolumeUnit::CubicInch,
        VolumeUnit::CubicFoot,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VolumeUnit::CubicMillimeter => "cubic mm",
            VolumeUnit::CubicCentimeter => "cubic cm",
            VolumeUnit::CubicInch => "cubic inches",
            VolumeUnit::CubicFoot => "cubic feet",
        }
    }

    /// mm³ 1 에 해당하는 목표 단위 값.
    pub fn from_mm3(&self) -> f64 {
        match self {
            VolumeUnit::CubicMillimeter => 1.0,
            VolumeUnit::CubicCentimeter => 0.001,
            VolumeUnit::CubicInch => 0.000061023744,
            VolumeUnit::CubicFoot => 0.000000035315,
        }
    }

    /// 박스 체적 결과 단위로 선택 가능한지 여부.
    pub fn is_box_result_unit(&self) -> bool {
        !matches!(self, VolumeUnit::CubicFoot)
    }
}

/// mm³ 값을 지정 단위로 환산한다.
pub fn volume_from_mm3(value_mm3: f64, unit: VolumeUnit) -> f64 {
    value_mm3 * unit.from_mm3()
}

impl fmt::Display for VolumeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for VolumeUnit {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_volume_unit(s)
    }
}
