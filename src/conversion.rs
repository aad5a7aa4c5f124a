use crate::units::*;

/// 단위 변환 시 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// 해당 연산에서 허용하지 않는 단위 문자열
    InvalidUnit(String),
    /// 숫자가 아니거나 음수/비유한 값
    InvalidInput(String),
}

impl std::fmt::Display for ConversionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversionError::InvalidUnit(u) => write!(f, "알 수 없는 단위: {u}"),
            ConversionError::InvalidInput(msg) => write!(f, "잘못된 입력: {msg}"),
        }
    }
}

impl std::error::Error for ConversionError {}

/// 음수·NaN·무한대를 거부한다. `label`은 오류 메시지에 쓰인다.
pub fn ensure_non_negative(label: &str, value: f64) -> Result<f64, ConversionError> {
    if !value.is_finite() {
        return Err(ConversionError::InvalidInput(format!(
            "{label} 값이 유한하지 않습니다: {value}"
        )));
    }
    if value < 0.0 {
        return Err(ConversionError::InvalidInput(format!(
            "{label} 값은 0 이상이어야 합니다: {value}"
        )));
    }
    Ok(value)
}

/// 문자열 숫자를 파싱한 뒤 0 이상인지 검사한다.
pub fn parse_non_negative(label: &str, s: &str) -> Result<f64, ConversionError> {
    let value = s.trim().parse::<f64>().map_err(|_| {
        ConversionError::InvalidInput(format!("{label} 값이 숫자가 아닙니다: {s:?}"))
    })?;
    ensure_non_negative(label, value)
}

/// 무게 단위 문자열을 enum으로 변환한다.
///
/// 저장 파일 표기(`grams`, `ounces`, `pounds`, `kilograms`) 외에
/// `g`, `oz`, `lb`, `kg` 약어도 허용한다.
pub fn parse_weight_unit(s: &str) -> Result<WeightUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "grams" | "gram" | "g" => Ok(WeightUnit::Grams),
        "ounces" | "ounce" | "oz" => Ok(WeightUnit::Ounces),
        "pounds" | "pound" | "lb" | "lbs" => Ok(WeightUnit::Pounds),
        "kilograms" | "kilogram" | "kg" => Ok(WeightUnit::Kilograms),
        _ => Err(ConversionError::InvalidUnit(s.to_string())),
    }
}

pub fn parse_dimension_unit(s: &str) -> Result<DimensionUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "mm" | "millimeter" | "millimeters" => Ok(DimensionUnit::Millimeter),
        "cm" | "centimeter" | "centimeters" => Ok(DimensionUnit::Centimeter),
        "inches" | "inch" | "in" => Ok(DimensionUnit::Inch),
        "feet" | "foot" | "ft" => Ok(DimensionUnit::Foot),
        _ => Err(ConversionError::InvalidUnit(s.to_string())),
    }
}

pub fn parse_volume_unit(s: &str) -> Result<VolumeUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "cubic mm" | "mm3" | "mm^3" | "mm³" => Ok(VolumeUnit::CubicMillimeter),
        "cubic cm" | "cm3" | "cm^3" | "cm³" | "cc" => Ok(VolumeUnit::CubicCentimeter),
        "cubic inches" | "cubic inch" | "in3" | "in^3" | "in³" => Ok(VolumeUnit::CubicInch),
        "cubic feet" | "cubic foot" | "ft3" | "ft^3" | "ft³" => Ok(VolumeUnit::CubicFoot),
        _ => Err(ConversionError::InvalidUnit(s.to_string())),
    }
}

/// 박스 결과 단위를 파싱한다. 입방피트는 박스 결과로 쓰지 않는다.
pub fn parse_box_result_unit(s: &str) -> Result<VolumeUnit, ConversionError> {
    let unit = parse_volume_unit(s)?;
    ensure_box_result_unit(unit)
}

pub fn ensure_box_result_unit(unit: VolumeUnit) -> Result<VolumeUnit, ConversionError> {
    if unit.is_box_result_unit() {
        Ok(unit)
    } else {
        Err(ConversionError::InvalidUnit(unit.as_str().to_string()))
    }
}
