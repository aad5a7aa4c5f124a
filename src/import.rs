//! CSV 일괄 시료 가져오기.
//!
//! 헤더는 대소문자/공백을 무시하고 `sample id`, `weight`, `unit` 열을 찾는다.
//! 행 단위로 검증하며, 거부된 행은 건너뛴 수로만 집계한다.

use std::io;
use tracing::debug;

use crate::records::{add_sample, Sample};
use crate::units::WeightUnit;

const COL_ID: &str = "sample id";
const COL_WEIGHT: &str = "weight";
const COL_UNIT: &str = "unit";

/// 가져오기 결과.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
}

/// 가져오기 오류. 행 단위 오류는 여기에 오지 않고 `skipped`로 집계된다.
#[derive(Debug)]
pub enum ImportError {
    /// CSV 헤더를 읽지 못함
    Csv(csv::Error),
    /// 필수 열이 없음. 발견된 헤더 목록을 담는다.
    MissingColumns { found: Vec<String> },
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::Csv(e) => write!(f, "CSV 읽기 오류: {e}"),
            ImportError::MissingColumns { found } => write!(
                f,
                "CSV 형식 오류. 필요한 열: 'Sample ID', 'Weight', 'Unit' / 발견된 열: {}",
                found.join(", ")
            ),
        }
    }
}

impl std::error::Error for ImportError {}

impl From<csv::Error> for ImportError {
    fn from(value: csv::Error) -> Self {
        ImportError::Csv(value)
    }
}

/// CSV를 읽어 유효한 행만 `samples`에 추가한다. 저장은 호출자가 한 번만 한다.
///
/// 거부 조건: 이미 있는 ID(앞선 행에서 추가된 ID 포함), 정해진 네 단위 밖의 단위,
/// 숫자가 아니거나 음수인 무게, 읽을 수 없는 행.
pub fn import_samples_csv<R: io::Read>(
    reader: R,
    samples: &mut Vec<Sample>,
) -> Result<ImportReport, ImportError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();
    let column = |name: &str| headers.iter().position(|h| h == name);
    let (Some(id_col), Some(weight_col), Some(unit_col)) =
        (column(COL_ID), column(COL_WEIGHT), column(COL_UNIT))
    else {
        return Err(ImportError::MissingColumns { found: headers });
    };

    let mut report = ImportReport::default();
    for (line, record) in rdr.records().enumerate() {
        let Ok(record) = record else {
            report.skipped += 1;
            continue;
        };
        let row = (
            record.get(id_col),
            record.get(weight_col),
            record.get(unit_col),
        );
        let (Some(id), Some(weight), Some(unit)) = row else {
            report.skipped += 1;
            continue;
        };
        match parse_row(id, weight, unit).and_then(|s| add_sample(samples, s).ok()) {
            Some(()) => report.imported += 1,
            None => {
                debug!(line = line + 2, id, "CSV 행 건너뜀");
                report.skipped += 1;
            }
        }
    }
    Ok(report)
}

fn parse_row(id: &str, weight: &str, unit: &str) -> Option<Sample> {
    let unit = canonical_weight_unit(unit)?;
    let weight = weight.trim().parse::<f64>().ok()?;
    Sample::new(id, weight, unit).ok()
}

/// 저장 표기(grams/ounces/pounds/kilograms)만 허용한다.
fn canonical_weight_unit(s: &str) -> Option<WeightUnit> {
    let s = s.trim().to_lowercase();
    WeightUnit::ALL.into_iter().find(|u| u.as_str() == s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::seed_samples;

    #[test]
    fn headers_are_case_insensitive() {
        let data = "  Sample ID ,WEIGHT,Unit\nA-1,10,grams\nA-2,1.5,Pounds\n";
        let mut samples = Vec::new();
        let report = import_samples_csv(data.as_bytes(), &mut samples).unwrap();
        assert_eq!(
            report,
            ImportReport {
                imported: 2,
                skipped: 0
            }
        );
        assert_eq!(samples[1].unit, WeightUnit::Pounds);
    }

    #[test]
    fn invalid_rows_are_counted_as_skipped() {
        let data = "sample id,weight,unit\n\
                    Sample-001,10,grams\n\
                    B-1,heavy,grams\n\
                    B-2,10,stone\n\
                    B-3,-4,grams\n\
                    B-4,10,g\n\
                    B-5,3,ounces\n";
        let mut samples = seed_samples();
        let report = import_samples_csv(data.as_bytes(), &mut samples).unwrap();
        assert_eq!(report.imported, 1);
        assert_eq!(report.skipped, 5);
        assert_eq!(samples.len(), 6);
        assert_eq!(samples[5].id, "B-5");
    }

    #[test]
    fn repeated_id_within_batch_keeps_first() {
        let data = "sample id,weight,unit\nC-1,1,grams\nC-1,2,grams\n";
        let mut samples = Vec::new();
        let report = import_samples_csv(data.as_bytes(), &mut samples).unwrap();
        assert_eq!(report.imported, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(samples[0].weight, 1.0);
    }

    #[test]
    fn missing_columns_lists_found_headers() {
        let data = "id,mass\nx,1\n";
        let mut samples = Vec::new();
        match import_samples_csv(data.as_bytes(), &mut samples) {
            Err(ImportError::MissingColumns { found }) => assert_eq!(found, ["id", "mass"]),
            other => panic!("unexpected: {other:?}"),
        }
        assert!(samples.is_empty());
    }
}
