//! 환산 계수 회귀 테스트. 물 기준 밀도(1 g/mL) 환산표 값을 그대로 검증한다.
use displacement_volume_analyzer::conversion::ConversionError;
use displacement_volume_analyzer::displacement::{
    compute_remaining, convert_box_volume, convert_box_volume_str, convert_weight_to_volume,
    convert_weight_to_volume_str, EfficiencyBand, VolumeResult,
};
use displacement_volume_analyzer::units::{DimensionUnit, VolumeUnit, WeightUnit};

fn assert_close(label: &str, actual: f64, expected: f64, rel_tol: f64) {
    let denom = expected.abs().max(1.0);
    let diff = (actual - expected).abs();
    assert!(
        diff <= rel_tol * denom,
        "{label} expected {expected:.9} got {actual:.9} (diff {diff:.3e}, tol {rel_tol})"
    );
}

#[test]
fn cm3_is_weight_times_factor_for_every_unit() {
    let table = [
        (WeightUnit::Grams, 1.0),
        (WeightUnit::Ounces, 28.3168466),
        (WeightUnit::Pounds, 453.59237),
        (WeightUnit::Kilograms, 1000.0),
    ];
    for w in [0.0, 0.75, 2.3, 150.0, 12_345.678] {
        for (unit, cm3_factor) in table {
            let v = convert_weight_to_volume(w, unit).expect("valid weight");
            assert_close(unit.as_str(), v.cm3, w * cm3_factor, 1e-9);
            assert_close(unit.as_str(), v.mm3, v.cm3 * 1000.0, 1e-9);
        }
    }
}

#[test]
fn one_gram_reference_point() {
    let v = convert_weight_to_volume_str(1.0, "grams").expect("grams");
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
fn pound_reference_point() {
    // 2.3 lb 시료 (기본 시료 Sample-003)
    let v = convert_weight_to_volume(2.3, WeightUnit::Pounds).expect("pounds");
    assert_close("mm3", v.mm3, 1_043_262.451, 1e-9);
    assert_close("in3", v.in3, 63.66555066, 1e-9);
}

#[test]
fn ten_cm_box_in_cubic_cm() {
    let v = convert_box_volume(
        10.0,
        10.0,
        10.0,
        DimensionUnit::Centimeter,
        VolumeUnit::CubicCentimeter,
    )
    .expect("box");
    assert_close("box", v, 1000.0, 1e-12);
}

#[test]
fn inch_box_in_cubic_inches() {
    let v = convert_box_volume_str(2.0, 3.0, 4.0, "inches", "cubic inches").expect("box");
    assert_close("box", v, 24.0, 1e-6);
}

#[test]
fn errors_abort_only_the_request() {
    assert!(matches!(
        convert_weight_to_volume_str(1.0, "carats"),
        Err(ConversionError::InvalidUnit(_))
    ));
    assert!(matches!(
        convert_weight_to_volume(-3.0, WeightUnit::Grams),
        Err(ConversionError::InvalidInput(_))
    ));
    assert!(matches!(
        convert_box_volume_str(1.0, 1.0, 1.0, "cm", "litres"),
        Err(ConversionError::InvalidUnit(_))
    ));
    // 이후 요청은 정상 처리된다
    assert!(convert_weight_to_volume(3.0, WeightUnit::Grams).is_ok());
}

#[test]
fn remaining_properties() {
    let full = compute_remaining(1000.0, 1000.0, VolumeUnit::CubicMillimeter);
    assert_eq!(
        (full.remaining, full.efficiency_pct, full.remaining_pct),
        (0.0, 100.0, 0.0)
    );

    let empty = compute_remaining(0.0, 0.0, VolumeUnit::CubicMillimeter);
    assert_eq!((empty.efficiency_pct, empty.remaining_pct), (0.0, 0.0));

    let over = compute_remaining(500.0, 1000.0, VolumeUnit::CubicMillimeter);
    assert_eq!(over.remaining, -500.0);
    assert_eq!(over.efficiency_pct, 200.0);
    assert_eq!(over.remaining_pct, -100.0);
    assert_eq!(over.efficiency_band(), EfficiencyBand::Excellent);
}

#[test]
fn product_in_box_analysis() {
    // 250 g 제품, 10×10×5 cm 박스 → 250/500 cm³ = 50%
    let product = convert_weight_to_volume(250.0, WeightUnit::Grams).expect("product");
    let box_mm3 = convert_box_volume(
        100.0,
        100.0,
        50.0,
        DimensionUnit::Millimeter,
        VolumeUnit::CubicMillimeter,
    )
    .expect("box");
    let r = compute_remaining(box_mm3, product.mm3, VolumeUnit::CubicCentimeter);
    assert_close("box", r.box_volume, 500.0, 1e-9);
    assert_close("remaining", r.remaining, 250.0, 1e-9);
    assert_close("eff", r.efficiency_pct, 50.0, 1e-9);
    assert_eq!(r.efficiency_band(), EfficiencyBand::Moderate);
}
