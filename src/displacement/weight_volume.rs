use serde::{Deserialize, Serialize};
use std::fmt;

use crate::conversion::{ensure_non_negative, parse_weight_unit, ConversionError};
use crate::format::format_volume;
use crate::units::WeightUnit;

/// 무게에서 환산한 배수 체적. 항상 계산값이며 직접 편집하지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeResult {
    pub mm3: f64,
    pub cm3: f64,
    pub in3: f64,
}

impl fmt::Display for VolumeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} mm³ / {} cm³ / {} in³",
            format_volume(self.mm3, 2),
            format_volume(self.cm3, 2),
            format_volume(self.in3, 3)
        )
    }
}

/// 물의 기준 밀도(1 g/mL)로 무게를 mm³, cm³, in³ 체적으로 환산한다.
///
/// 내부 반올림은 하지 않는다. 음수·비유한 무게는 `InvalidInput`.
pub fn convert_weight_to_volume(
    weight: f64,
    unit: WeightUnit,
) -> Result<VolumeResult, ConversionError> {
    let weight = ensure_non_negative("weight", weight)?;
    let factors = unit.volume_factors();
    Ok(VolumeResult {
        mm3: weight * factors.mm3,
        cm3: weight * factors.cm3,
        in3: weight * factors.in3,
    })
}

/// 단위 문자열을 받는 버전. 알 수 없는 단위는 계산 전에 `InvalidUnit`으로 거부한다.
pub fn convert_weight_to_volume_str(
    weight: f64,
    unit: &str,
) -> Result<VolumeResult, ConversionError> {
    let unit = parse_weight_unit(unit)?;
    convert_weight_to_volume(weight, unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_gram_is_one_cubic_centimeter() {
        let v = convert_weight_to_volume(1.0, WeightUnit::Grams).unwrap();
        assert_eq!(
            v,
            VolumeResult {
                mm3: 1000.0,
                cm3: 1.0,
                in3: 0.061023744
            }
        );
    }

    #[test]
    fn negative_weight_is_rejected() {
        assert!(matches!(
            convert_weight_to_volume(-1.0, WeightUnit::Pounds),
            Err(ConversionError::InvalidInput(_))
        ));
    }

    #[test]
    fn unknown_unit_string_is_rejected_before_computation() {
        assert_eq!(
            convert_weight_to_volume_str(-5.0, "tons"),
            Err(ConversionError::InvalidUnit("tons".into()))
        );
    }

    #[test]
    fn display_rounds_per_column() {
        let v = convert_weight_to_volume(2.0, WeightUnit::Kilograms).unwrap();
        assert_eq!(
            v.to_string(),
            "2,000,000.00 mm³ / 2,000.00 cm³ / 122.047 in³"
        );
    }
}
