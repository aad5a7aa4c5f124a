use serde::{Deserialize, Serialize};

use super::{Keyed, RecordError};
use crate::conversion::{ensure_non_negative, ConversionError};
use crate::displacement::{convert_weight_to_volume, VolumeResult};
use crate::units::WeightUnit;

/// 보정용 시료 레코드. `id`는 컬렉션 안에서 유일하다.
///
/// 역직렬화 시에도 `Sample::new`와 같은 검증을 거친다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSample")]
pub struct Sample {
    pub id: String,
    pub weight: f64,
    pub unit: WeightUnit,
}

#[derive(Deserialize)]
struct RawSample {
    id: String,
    weight: f64,
    unit: WeightUnit,
}

impl TryFrom<RawSample> for Sample {
    type Error = RecordError;

    fn try_from(raw: RawSample) -> Result<Self, Self::Error> {
        Sample::new(raw.id, raw.weight, raw.unit)
    }
}

impl Sample {
    /// ID 앞뒤 공백은 제거한다. 빈 ID, 음수 무게는 거부한다.
    pub fn new(id: impl Into<String>, weight: f64, unit: WeightUnit) -> Result<Self, RecordError> {
        let id = id.into().trim().to_string();
        if id.is_empty() {
            return Err(RecordError::MissingId);
        }
        let weight = ensure_non_negative("weight", weight)?;
        Ok(Self { id, weight, unit })
    }

    pub fn volume(&self) -> Result<VolumeResult, ConversionError> {
        convert_weight_to_volume(self.weight, self.unit)
    }
}

impl Keyed for Sample {
    type Key = String;

    fn key(&self) -> &String {
        &self.id
    }
}

impl std::fmt::Display for Sample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {:.2} {}", self.id, self.weight, self.unit)
    }
}

/// 최초 실행 시 시료 파일에 기록되는 기본 시료.
pub fn seed_samples() -> Vec<Sample> {
    [
        ("Sample-001", 150.0, WeightUnit::Grams),
        ("Sample-002", 5.5, WeightUnit::Ounces),
        ("Sample-003", 2.3, WeightUnit::Pounds),
        ("Sample-004", 0.75, WeightUnit::Kilograms),
        ("Sample-005", 250.0, WeightUnit::Grams),
    ]
    .into_iter()
    .map(|(id, weight, unit)| Sample {
        id: id.to_string(),
        weight,
        unit,
    })
    .collect()
}

/// 중복 ID를 거부하고 시료를 추가한다.
pub fn add_sample(samples: &mut Vec<Sample>, sample: Sample) -> Result<(), RecordError> {
    if samples.iter().any(|s| s.id == sample.id) {
        return Err(RecordError::DuplicateId(sample.id));
    }
    samples.push(sample);
    Ok(())
}

/// 시료별 체적 환산표의 한 행.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleResult {
    pub id: String,
    pub weight: f64,
    pub unit: WeightUnit,
    pub volume: VolumeResult,
}

/// 전체 시료의 체적 환산표를 만든다.
pub fn sample_results(samples: &[Sample]) -> Result<Vec<SampleResult>, ConversionError> {
    samples
        .iter()
        .map(|s| {
            Ok(SampleResult {
                id: s.id.clone(),
                weight: s.weight,
                unit: s.unit,
                volume: s.volume()?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_id_is_rejected() {
        assert_eq!(
            Sample::new("   ", 1.0, WeightUnit::Grams),
            Err(RecordError::MissingId)
        );
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let mut samples = seed_samples();
        let dup = Sample::new("Sample-001", 1.0, WeightUnit::Grams).unwrap();
        assert_eq!(
            add_sample(&mut samples, dup),
            Err(RecordError::DuplicateId("Sample-001".into()))
        );
        assert_eq!(samples.len(), 5);
    }

    #[test]
    fn negative_weight_fails_deserialization() {
        let bad = r#"[{"id": "x", "weight": -1, "unit": "grams"}]"#;
        assert!(serde_json::from_str::<Vec<Sample>>(bad).is_err());
        let bad_unit = r#"[{"id": "x", "weight": 1, "unit": "stone"}]"#;
        assert!(serde_json::from_str::<Vec<Sample>>(bad_unit).is_err());
    }

    #[test]
    fn json_shape_matches_data_file() {
        let json = serde_json::to_value(&seed_samples()[1]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "Sample-002", "weight": 5.5, "unit": "ounces"})
        );
    }

    #[test]
    fn results_table_covers_every_sample() {
        let rows = sample_results(&seed_samples()).unwrap();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].volume.cm3, 150.0);
        assert_eq!(rows[3].volume.cm3, 750.0);
    }
}
