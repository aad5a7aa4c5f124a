use serde::{Deserialize, Serialize};
use std::fmt;

use crate::units::{volume_from_mm3, VolumeUnit};

/// 박스 대비 제품 체적 분석 결과.
///
/// `box_volume`, `product_volume`, `remaining`은 `unit` 기준 값이다.
/// `remaining`이 음수이면 제품이 박스를 넘친다는 뜻이며 오류가 아니다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RemainingVolume {
    pub unit: VolumeUnit,
    pub box_volume: f64,
    pub product_volume: f64,
    pub remaining: f64,
    pub remaining_mm3: f64,
    /// 공간 활용률 [%]
    pub efficiency_pct: f64,
    /// 잔여 공간 비율 [%]
    pub remaining_pct: f64,
}

impl RemainingVolume {
    pub fn is_overflow(&self) -> bool {
        self.remaining_mm3 < 0.0
    }

    pub fn efficiency_band(&self) -> EfficiencyBand {
        EfficiencyBand::classify(self.efficiency_pct)
    }

    pub fn fit_status(&self) -> FitStatus {
        FitStatus::classify(self.remaining_pct)
    }
}

/// 박스·제품 체적(mm³)으로 잔여 체적과 효율을 계산한다.
///
/// 박스 체적이 0 이하이면 두 비율은 0으로 둔다.
pub fn compute_remaining(
    box_volume_mm3: f64,
    product_volume_mm3: f64,
    target_unit: VolumeUnit,
) -> RemainingVolume {
    let remaining_mm3 = box_volume_mm3 - product_volume_mm3;
    let (efficiency_pct, remaining_pct) = if box_volume_mm3 > 0.0 {
        (
            100.0 * product_volume_mm3 / box_volume_mm3,
            100.0 * remaining_mm3 / box_volume_mm3,
        )
    } else {
        (0.0, 0.0)
    };
    RemainingVolume {
        unit: target_unit,
        box_volume: volume_from_mm3(box_volume_mm3, target_unit),
        product_volume: volume_from_mm3(product_volume_mm3, target_unit),
        remaining: volume_from_mm3(remaining_mm3, target_unit),
        remaining_mm3,
        efficiency_pct,
        remaining_pct,
    }
}

/// 공간 활용률 등급.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EfficiencyBand {
    Low,
    Moderate,
    Good,
    Excellent,
}

impl EfficiencyBand {
    pub const EXCELLENT_MIN_PCT: f64 = 80.0;
    pub const GOOD_MIN_PCT: f64 = 60.0;
    pub const MODERATE_MIN_PCT: f64 = 40.0;

    /// 기본 경계(80/60/40%)로 분류한다.
    pub fn classify(efficiency_pct: f64) -> Self {
        Self::classify_with(
            efficiency_pct,
            Self::EXCELLENT_MIN_PCT,
            Self::GOOD_MIN_PCT,
            Self::MODERATE_MIN_PCT,
        )
    }

    /// 경계값을 바꿔 분류한다. 네 등급과 `>=` 경계 규칙은 그대로 유지된다.
    pub fn classify_with(efficiency_pct: f64, excellent: f64, good: f64, moderate: f64) -> Self {
        if efficiency_pct >= excellent {
            EfficiencyBand::Excellent
        } else if efficiency_pct >= good {
            EfficiencyBand::Good
        } else if efficiency_pct >= moderate {
            EfficiencyBand::Moderate
        } else {
            EfficiencyBand::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EfficiencyBand::Excellent => "Excellent",
            EfficiencyBand::Good => "Good",
            EfficiencyBand::Moderate => "Moderate",
            EfficiencyBand::Low => "Low",
        }
    }
}

impl fmt::Display for EfficiencyBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// 비교 화면에서 쓰는 잔여 공간 판정 (20% / 5% 경계).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FitStatus {
    GoodSpace,
    TightFit,
    TooFull,
}

impl FitStatus {
    pub fn classify(remaining_pct: f64) -> Self {
        if remaining_pct >= 20.0 {
            FitStatus::GoodSpace
        } else if remaining_pct >= 5.0 {
            FitStatus::TightFit
        } else {
            FitStatus::TooFull
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FitStatus::GoodSpace => "Good Space",
            FitStatus::TightFit => "Tight Fit",
            FitStatus::TooFull => "Too Full",
        }
    }
}

impl fmt::Display for FitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_box_is_one_hundred_percent() {
        let r = compute_remaining(1000.0, 1000.0, VolumeUnit::CubicMillimeter);
        assert_eq!(r.remaining, 0.0);
        assert_eq!(r.efficiency_pct, 100.0);
        assert_eq!(r.remaining_pct, 0.0);
        assert!(!r.is_overflow());
    }

    #[test]
    fn empty_box_does_not_divide_by_zero() {
        let r = compute_remaining(0.0, 0.0, VolumeUnit::CubicCentimeter);
        assert_eq!(r.efficiency_pct, 0.0);
        assert_eq!(r.remaining_pct, 0.0);
    }

    #[test]
    fn overflow_is_negative_remaining() {
        let r = compute_remaining(500.0, 1000.0, VolumeUnit::CubicMillimeter);
        assert_eq!(r.remaining, -500.0);
        assert!(r.is_overflow());
        assert_eq!(r.fit_status(), FitStatus::TooFull);
    }

    #[test]
    fn converts_to_cubic_feet() {
        let r = compute_remaining(1_000_000_000.0, 0.0, VolumeUnit::CubicFoot);
        assert!((r.box_volume - 35.315).abs() < 1e-9);
    }

    #[test]
    fn band_boundaries_are_inclusive() {
        assert_eq!(EfficiencyBand::classify(80.0), EfficiencyBand::Excellent);
        assert_eq!(EfficiencyBand::classify(79.99), EfficiencyBand::Good);
        assert_eq!(EfficiencyBand::classify(60.0), EfficiencyBand::Good);
        assert_eq!(EfficiencyBand::classify(40.0), EfficiencyBand::Moderate);
        assert_eq!(EfficiencyBand::classify(39.9), EfficiencyBand::Low);
        assert_eq!(
            EfficiencyBand::classify_with(50.0, 90.0, 70.0, 50.0),
            EfficiencyBand::Moderate
        );
    }

    #[test]
    fn fit_status_boundaries() {
        assert_eq!(FitStatus::classify(20.0), FitStatus::GoodSpace);
        assert_eq!(FitStatus::classify(5.0), FitStatus::TightFit);
        assert_eq!(FitStatus::classify(4.9), FitStatus::TooFull);
    }
}
