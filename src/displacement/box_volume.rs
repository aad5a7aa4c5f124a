use crate::conversion::{
    ensure_box_result_unit, ensure_non_negative, parse_box_result_unit, parse_dimension_unit,
    ConversionError,
};
use crate::units::{length_to_mm, volume_from_mm3, DimensionUnit, VolumeUnit};

/// 직육면체 박스 치수 입력.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxDimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub unit: DimensionUnit,
}

impl BoxDimensions {
    /// 세 치수를 검증한 뒤 mm³ 기준 체적을 계산한다.
    pub fn volume_mm3(&self) -> Result<f64, ConversionError> {
        let length = ensure_non_negative("length", self.length)?;
        let width = ensure_non_negative("width", self.width)?;
        let height = ensure_non_negative("height", self.height)?;
        // 공통 기준(mm)으로 맞춘 뒤 곱한다
        Ok(length_to_mm(length, self.unit)
            * length_to_mm(width, self.unit)
            * length_to_mm(height, self.unit))
    }
}

/// 박스 체적을 mm³로 계산한다. 프로젝트 저장 시 `box_volume_mm3`로 쓰인다.
pub fn convert_box_volume_mm3(
    length: f64,
    width: f64,
    height: f64,
    dimension_unit: DimensionUnit,
) -> Result<f64, ConversionError> {
    BoxDimensions {
        length,
        width,
        height,
        unit: dimension_unit,
    }
    .volume_mm3()
}

/// 박스 체적을 지정 결과 단위(cubic mm/cm/inches)로 계산한다.
pub fn convert_box_volume(
    length: f64,
    width: f64,
    height: f64,
    dimension_unit: DimensionUnit,
    result_unit: VolumeUnit,
) -> Result<f64, ConversionError> {
    let result_unit = ensure_box_result_unit(result_unit)?;
    let mm3 = convert_box_volume_mm3(length, width, height, dimension_unit)?;
    Ok(volume_from_mm3(mm3, result_unit))
}

/// 단위 문자열을 받는 버전.
pub fn convert_box_volume_str(
    length: f64,
    width: f64,
    height: f64,
    dimension_unit: &str,
    result_unit: &str,
) -> Result<f64, ConversionError> {
    let dimension_unit = parse_dimension_unit(dimension_unit)?;
    let result_unit = parse_box_result_unit(result_unit)?;
    convert_box_volume(length, width, height, dimension_unit, result_unit)
}
