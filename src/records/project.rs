use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{Keyed, RecordError};
use crate::conversion::{ensure_box_result_unit, ensure_non_negative, ConversionError};
use crate::displacement::{
    compute_remaining, convert_weight_to_volume, BoxDimensions, RemainingVolume, VolumeResult,
};
use crate::units::{volume_from_mm3, DimensionUnit, VolumeUnit, WeightUnit};

/// 첫 프로젝트 번호.
pub const FIRST_PROJECT_NUMBER: u32 = 1000;

const LAST_MODIFIED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 저장된 계산 결과. `project_number`가 식별 키이다.
///
/// 역직렬화 시 음수/비유한 수치와 박스 결과 단위로 쓸 수 없는 단위를 거부한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawProject")]
pub struct Project {
    pub project_number: u32,
    pub project_name: String,
    /// `YYYY-MM-DD`
    pub date: NaiveDate,
    pub designer: String,
    pub description: String,
    pub contact: String,
    pub weight: f64,
    pub weight_unit: WeightUnit,
    pub primary_volume_mm3: f64,
    pub box_length: f64,
    pub box_width: f64,
    pub box_height: f64,
    pub dimension_unit: DimensionUnit,
    pub box_result_unit: VolumeUnit,
    pub box_volume_mm3: f64,
    pub last_modified: String,
}

#[derive(Deserialize)]
struct RawProject {
    project_number: u32,
    project_name: String,
    date: NaiveDate,
    designer: String,
    description: String,
    contact: String,
    weight: f64,
    weight_unit: WeightUnit,
    #[serde(default)]
    primary_volume_mm3: f64,
    box_length: f64,
    box_width: f64,
    box_height: f64,
    dimension_unit: DimensionUnit,
    box_result_unit: VolumeUnit,
    #[serde(default)]
    box_volume_mm3: f64,
    #[serde(default)]
    last_modified: String,
}

impl TryFrom<RawProject> for Project {
    type Error = RecordError;

    fn try_from(raw: RawProject) -> Result<Self, Self::Error> {
        Ok(Project {
            weight: ensure_non_negative("weight", raw.weight)?,
            primary_volume_mm3: ensure_non_negative("primary_volume_mm3", raw.primary_volume_mm3)?,
            box_length: ensure_non_negative("box_length", raw.box_length)?,
            box_width: ensure_non_negative("box_width", raw.box_width)?,
            box_height: ensure_non_negative("box_height", raw.box_height)?,
            box_result_unit: ensure_box_result_unit(raw.box_result_unit)?,
            box_volume_mm3: ensure_non_negative("box_volume_mm3", raw.box_volume_mm3)?,
            project_number: raw.project_number,
            project_name: raw.project_name,
            date: raw.date,
            designer: raw.designer,
            description: raw.description,
            contact: raw.contact,
            weight_unit: raw.weight_unit,
            dimension_unit: raw.dimension_unit,
            last_modified: raw.last_modified,
        })
    }
}

impl Project {
    /// 박스 체적이 계산된 프로젝트인지 여부.
    pub fn has_box(&self) -> bool {
        self.box_volume_mm3 > 0.0
    }

    pub fn primary_volume(&self) -> Result<VolumeResult, ConversionError> {
        convert_weight_to_volume(self.weight, self.weight_unit)
    }

    /// 저장된 박스 체적을 결과 단위로 표시한 값.
    pub fn box_volume(&self) -> f64 {
        volume_from_mm3(self.box_volume_mm3, self.box_result_unit)
    }

    pub fn analysis(&self, unit: VolumeUnit) -> RemainingVolume {
        compute_remaining(self.box_volume_mm3, self.primary_volume_mm3, unit)
    }
}

impl Keyed for Project {
    type Key = u32;

    fn key(&self) -> &u32 {
        &self.project_number
    }
}

/// 현재 컬렉션 기준 다음 프로젝트 번호. 비어 있으면 1000.
///
/// 캐시된 카운터가 아니라 매번 컬렉션에서 다시 계산한다.
/// 최대값이 `u32::MAX`이면 번호를 되감지 않고 오류를 돌려준다.
pub fn next_project_number(existing: &[Project]) -> Result<u32, RecordError> {
    match existing.iter().map(|p| p.project_number).max() {
        None => Ok(FIRST_PROJECT_NUMBER),
        Some(max) => max
            .checked_add(1)
            .ok_or(RecordError::ProjectNumberExhausted),
    }
}

/// 같은 번호가 있으면 제자리 교체, 없으면 뒤에 추가한다. 확정된 번호를 반환한다.
pub fn upsert_project(collection: &mut Vec<Project>, record: Project) -> u32 {
    let number = record.project_number;
    match collection.iter_mut().find(|p| p.project_number == number) {
        Some(slot) => *slot = record,
        None => collection.push(record),
    }
    number
}

/// 편집 중인 프로젝트 입력값. 저장 전까지는 디스크에 반영되지 않는다.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectForm {
    /// 불러온 프로젝트 번호. `None`이면 저장 시 새 번호를 받는다.
    pub current_project: Option<u32>,
    pub project_name: String,
    pub date: NaiveDate,
    pub designer: String,
    pub description: String,
    pub contact: String,
    pub weight: f64,
    pub weight_unit: WeightUnit,
    pub box_length: f64,
    pub box_width: f64,
    pub box_height: f64,
    pub dimension_unit: DimensionUnit,
    pub box_result_unit: VolumeUnit,
}

impl ProjectForm {
    /// 새 프로젝트 기본값.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            current_project: None,
            project_name: "New Project".to_string(),
            date: today,
            designer: "Designer Name".to_string(),
            description: "Project description here".to_string(),
            contact: "contact@email.com".to_string(),
            weight: 100.0,
            weight_unit: WeightUnit::Grams,
            box_length: 10.0,
            box_width: 10.0,
            box_height: 10.0,
            dimension_unit: DimensionUnit::Centimeter,
            box_result_unit: VolumeUnit::CubicCentimeter,
        }
    }

    pub fn from_project(project: &Project) -> Self {
        Self {
            current_project: Some(project.project_number),
            project_name: project.project_name.clone(),
            date: project.date,
            designer: project.designer.clone(),
            description: project.description.clone(),
            contact: project.contact.clone(),
            weight: project.weight,
            weight_unit: project.weight_unit,
            box_length: project.box_length,
            box_width: project.box_width,
            box_height: project.box_height,
            dimension_unit: project.dimension_unit,
            box_result_unit: project.box_result_unit,
        }
    }

    pub fn box_dimensions(&self) -> BoxDimensions {
        BoxDimensions {
            length: self.box_length,
            width: self.box_width,
            height: self.box_height,
            unit: self.dimension_unit,
        }
    }

    pub fn primary_volume(&self) -> Result<VolumeResult, ConversionError> {
        convert_weight_to_volume(self.weight, self.weight_unit)
    }

    /// 결과 단위 기준 박스 체적.
    pub fn box_volume(&self) -> Result<f64, ConversionError> {
        let unit = ensure_box_result_unit(self.box_result_unit)?;
        Ok(volume_from_mm3(self.box_dimensions().volume_mm3()?, unit))
    }

    pub fn remaining(&self, unit: VolumeUnit) -> Result<RemainingVolume, ConversionError> {
        let product = self.primary_volume()?.mm3;
        let box_mm3 = self.box_dimensions().volume_mm3()?;
        Ok(compute_remaining(box_mm3, product, unit))
    }

    /// 현재 입력값으로 체적을 다시 계산해 저장용 레코드를 만든다.
    ///
    /// 파생 체적은 항상 입력값에서 새로 계산되므로 이전 계산 결과가 남지 않는다.
    pub fn to_project(
        &self,
        project_number: u32,
        now: NaiveDateTime,
    ) -> Result<Project, ConversionError> {
        ensure_box_result_unit(self.box_result_unit)?;
        let primary = self.primary_volume()?;
        let box_volume_mm3 = self.box_dimensions().volume_mm3()?;
        Ok(Project {
            project_number,
            project_name: self.project_name.clone(),
            date: self.date,
            designer: self.designer.clone(),
            description: self.description.clone(),
            contact: self.contact.clone(),
            weight: self.weight,
            weight_unit: self.weight_unit,
            primary_volume_mm3: primary.mm3,
            box_length: self.box_length,
            box_width: self.box_width,
            box_height: self.box_height,
            dimension_unit: self.dimension_unit,
            box_result_unit: self.box_result_unit,
            box_volume_mm3,
            last_modified: now.format(LAST_MODIFIED_FORMAT).to_string(),
        })
    }
}

impl Default for ProjectForm {
    fn default() -> Self {
        Self::new(Local::now().date_naive())
    }
}
