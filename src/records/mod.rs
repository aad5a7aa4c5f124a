//! 저장 대상 레코드(시료, 프로젝트)와 컬렉션 조작 함수.

pub mod overview;
pub mod project;
pub mod sample;

pub use overview::{ComparisonRow, Overview};
pub use project::{next_project_number, upsert_project, Project, ProjectForm};
pub use sample::{add_sample, sample_results, seed_samples, Sample, SampleResult};

use std::collections::HashSet;
use std::hash::Hash;

use crate::conversion::ConversionError;

/// 레코드 검증/조작 오류.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordError {
    /// 시료 ID가 비어 있음
    MissingId,
    /// 이미 존재하는 시료 ID
    DuplicateId(String),
    /// 해당 번호의 프로젝트가 없음
    ProjectNotFound(u32),
    /// 최대 번호를 가진 프로젝트가 있어 새 번호를 배정할 수 없음
    ProjectNumberExhausted,
    /// 입력값/단위 오류
    Conversion(ConversionError),
}

impl std::fmt::Display for RecordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordError::MissingId => write!(f, "시료 ID를 입력하세요."),
            RecordError::DuplicateId(id) => write!(f, "시료 ID '{id}' 가 이미 존재합니다."),
            RecordError::ProjectNotFound(n) => write!(f, "프로젝트 {n} 을(를) 찾을 수 없습니다."),
            RecordError::ProjectNumberExhausted => write!(
                f,
                "새 프로젝트 번호를 배정할 수 없습니다. 최대 번호({})가 이미 사용 중입니다.",
                u32::MAX
            ),
            RecordError::Conversion(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for RecordError {}

impl From<ConversionError> for RecordError {
    fn from(value: ConversionError) -> Self {
        RecordError::Conversion(value)
    }
}

/// 식별 키를 가진 레코드.
pub trait Keyed {
    type Key: Eq + Hash;

    fn key(&self) -> &Self::Key;
}

/// `keys`에 해당하는 레코드를 모두 제거하고 제거된 개수를 반환한다.
///
/// 인덱스 기반 반복 삭제가 아니라 필터로 계산하므로 키 순서와 무관하게 같은 결과가 나온다.
pub fn delete<T: Keyed>(collection: &mut Vec<T>, keys: &[T::Key]) -> usize {
    let doomed: HashSet<&T::Key> = keys.iter().collect();
    let before = collection.len();
    collection.retain(|record| !doomed.contains(record.key()));
    before - collection.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::WeightUnit;

    fn five() -> Vec<Sample> {
        (1..=5)
            .map(|i| Sample::new(format!("S-{i}"), i as f64, WeightUnit::Grams).unwrap())
            .collect()
    }

    #[test]
    fn delete_is_order_independent() {
        let mut a = five();
        let mut b = five();
        assert_eq!(delete(&mut a, &["S-2".to_string(), "S-4".to_string()]), 2);
        assert_eq!(delete(&mut b, &["S-4".to_string(), "S-2".to_string()]), 2);
        assert_eq!(a, b);
        let ids: Vec<&str> = a.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["S-1", "S-3", "S-5"]);
    }

    #[test]
    fn delete_ignores_unknown_and_repeated_keys() {
        let mut a = five();
        let removed = delete(
            &mut a,
            &["S-1".to_string(), "S-1".to_string(), "nope".to_string()],
        );
        assert_eq!(removed, 1);
        assert_eq!(a.len(), 4);
    }
}
