use super::Project;
use crate::displacement::RemainingVolume;
use crate::units::VolumeUnit;

/// 비교용으로 모아 둔 프로젝트 목록. 세션 상태이며 저장하지 않는다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overview {
    projects: Vec<Project>,
}

/// 프로젝트별 잔여 체적 비교 행.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub project_number: u32,
    pub project_name: String,
    pub analysis: RemainingVolume,
}

impl Overview {
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// 이미 있는 번호면 추가하지 않고 false.
    pub fn add(&mut self, project: &Project) -> bool {
        if self.contains(project.project_number) {
            return false;
        }
        self.projects.push(project.clone());
        true
    }

    pub fn contains(&self, project_number: u32) -> bool {
        self.projects.iter().any(|p| p.project_number == project_number)
    }

    pub fn remove(&mut self, project_number: u32) -> bool {
        let before = self.projects.len();
        self.projects.retain(|p| p.project_number != project_number);
        before != self.projects.len()
    }

    pub fn clear(&mut self) {
        self.projects.clear();
    }

    /// 저장된 프로젝트가 바뀌었으면 목록의 사본도 갱신한다.
    pub fn refresh(&mut self, project: &Project) {
        if let Some(slot) = self
            .projects
            .iter_mut()
            .find(|p| p.project_number == project.project_number)
        {
            *slot = project.clone();
        }
    }

    /// 박스 체적이 있는 프로젝트만 비교한다.
    pub fn comparison(&self, unit: VolumeUnit) -> Vec<ComparisonRow> {
        self.projects
            .iter()
            .filter(|p| p.has_box())
            .map(|p| ComparisonRow {
                project_number: p.project_number,
                project_name: p.project_name.clone(),
                analysis: p.analysis(unit),
            })
            .collect()
    }
}
