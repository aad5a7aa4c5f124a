use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::conversion::{parse_weight_unit, ConversionError};

/// 시료 무게 단위. 물의 기준 밀도(1 g/mL)로 1 g = 1 cm³ 로 환산한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    Grams,
    Ounces,
    Pounds,
    Kilograms,
}

/// 무게 1 단위에 해당하는 물의 체적.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeFactors {
    pub mm3: f64,
    pub cm3: f64,
    pub in3: f64,
}

impl WeightUnit {
    pub const ALL: [WeightUnit; 4] = [
        WeightUnit::Grams,
        WeightUnit::Ounces,
        WeightUnit::Pounds,
        WeightUnit::Kilograms,
    ];

    /// 저장 파일과 CSV에서 쓰는 표기.
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightUnit::Grams => "grams",
            WeightUnit::Ounces => "ounces",
            WeightUnit::Pounds => "pounds",
            WeightUnit::Kilograms => "kilograms",
        }
    }

    /// 고정 환산 계수 테이블.
    pub fn volume_factors(&self) -> VolumeFactors {
        match self {
            WeightUnit::Grams => VolumeFactors {
                mm3: 1000.0,
                cm3: 1.0,
                in3: 0.061023744,
            },
            WeightUnit::Ounces => VolumeFactors {
                mm3: 28316.8466,
                cm3: 28.3168466,
                in3: 1.7295904,
            },
            WeightUnit::Pounds => VolumeFactors {
                mm3: 453592.37,
                cm3: 453.59237,
                in3: 27.6806742,
            },
            WeightUnit::Kilograms => VolumeFactors {
                mm3: 1_000_000.0,
                cm3: 1000.0,
                in3: 61.023744,
            },
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for WeightUnit {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_weight_unit(s)
    }
}
