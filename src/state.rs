//! 세션 상태와 명령 처리.
//!
//! 전역 상태 없이 `AppState`에 컬렉션과 편집 중인 폼을 모으고,
//! 사용자 동작 하나를 `Command` 하나로 적용한다. 계산/검증 오류는 해당 명령만
//! 중단시키고, 저장 실패는 경고로만 돌려준다.

use chrono::{Local, NaiveDateTime};
use std::fmt;
use tracing::{debug, warn};

use crate::app::AppError;
use crate::config::{Config, DefaultUnits};
use crate::import::{import_samples_csv, ImportReport};
use crate::records::{
    self, add_sample, next_project_number, seed_samples, upsert_project, Overview, Project,
    ProjectForm, RecordError, Sample,
};
use crate::store::{JsonStore, StoreError};
use crate::units::WeightUnit;

/// 사용자 동작.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddSample {
        id: String,
        weight: f64,
        unit: WeightUnit,
    },
    DeleteSamples(Vec<String>),
    /// CSV 원문
    ImportCsv(String),
    /// 폼을 기본값으로 초기화한다
    NewProject,
    /// 주어진 폼을 저장하고 현재 폼으로 삼는다
    SaveProject(Box<ProjectForm>),
    LoadProject(u32),
    DeleteProjects(Vec<u32>),
    AddToOverview(Vec<u32>),
    RemoveFromOverview(u32),
    ClearOverview,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddSample { .. } => "AddSample",
            Command::DeleteSamples(_) => "DeleteSamples",
            Command::ImportCsv(_) => "ImportCsv",
            Command::NewProject => "NewProject",
            Command::SaveProject(_) => "SaveProject",
            Command::LoadProject(_) => "LoadProject",
            Command::DeleteProjects(_) => "DeleteProjects",
            Command::AddToOverview(_) => "AddToOverview",
            Command::RemoveFromOverview(_) => "RemoveFromOverview",
            Command::ClearOverview => "ClearOverview",
        }
    }
}

/// 명령 적용 결과.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SampleAdded(String),
    SamplesDeleted(usize),
    Imported(ImportReport),
    /// 새 폼에 표시될 프로젝트 번호
    FormReset(u32),
    ProjectSaved(u32),
    ProjectLoaded(u32),
    ProjectsDeleted(usize),
    OverviewAdded(usize),
    OverviewRemoved(bool),
    OverviewCleared,
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::SampleAdded(id) => write!(f, "시료 '{id}' 추가 완료"),
            Effect::SamplesDeleted(n) => write!(f, "시료 {n}개 삭제"),
            Effect::Imported(r) => write!(
                f,
                "시료 {}개 가져옴, {}개 건너뜀(중복 또는 잘못된 데이터)",
                r.imported, r.skipped
            ),
            Effect::FormReset(n) => write!(f, "새 프로젝트 {n}"),
            Effect::ProjectSaved(n) => write!(f, "프로젝트 {n} 저장 완료"),
            Effect::ProjectLoaded(n) => write!(f, "프로젝트 {n} 불러옴"),
            Effect::ProjectsDeleted(n) => write!(f, "프로젝트 {n}개 삭제"),
            Effect::OverviewAdded(0) => write!(f, "선택한 프로젝트가 이미 모두 비교 목록에 있습니다"),
            Effect::OverviewAdded(n) => write!(f, "비교 목록에 {n}개 추가"),
            Effect::OverviewRemoved(true) => write!(f, "비교 목록에서 제거"),
            Effect::OverviewRemoved(false) => write!(f, "비교 목록에 없는 프로젝트입니다"),
            Effect::OverviewCleared => write!(f, "비교 목록 비움"),
        }
    }
}

/// 결과와 경고. 경고는 저장 실패처럼 세션을 멈추지 않는 문제를 담는다.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub effect: Effect,
    pub warnings: Vec<String>,
}

impl Outcome {
    fn new(effect: Effect) -> Self {
        Self {
            effect,
            warnings: Vec::new(),
        }
    }

    fn warn_on(mut self, result: Result<(), StoreError>) -> Self {
        if let Err(e) = result {
            self.warnings.push(e.to_string());
        }
        self
    }
}

/// 애플리케이션 세션 상태. 메모리 상의 컬렉션이 실행 중에는 기준이 된다.
#[derive(Debug)]
pub struct AppState {
    pub samples: Vec<Sample>,
    pub projects: Vec<Project>,
    pub form: ProjectForm,
    pub overview: Overview,
    defaults: DefaultUnits,
    sample_store: JsonStore<Sample>,
    project_store: JsonStore<Project>,
}

impl AppState {
    /// 두 데이터 파일을 검증/복구한 뒤 로드한다. 복구 과정의 쓰기 실패는 경고로 돌려준다.
    pub fn open(config: &Config) -> (Self, Vec<String>) {
        let sample_store = JsonStore::new(&config.data.samples_file);
        let project_store = JsonStore::new(&config.data.projects_file);
        let mut warnings = Vec::new();

        let seed = if config.data.seed_samples {
            seed_samples()
        } else {
            Vec::new()
        };
        if let Err(e) = sample_store.ensure_valid(&seed) {
            warnings.push(e.to_string());
        }
        if let Err(e) = project_store.ensure_valid(&[]) {
            warnings.push(e.to_string());
        }

        let samples = sample_store.load();
        let projects = project_store.load();
        debug!(
            samples = samples.len(),
            projects = projects.len(),
            "데이터 로드 완료"
        );
        let state = Self {
            samples,
            projects,
            form: new_form(&config.default_units),
            overview: Overview::default(),
            defaults: config.default_units.clone(),
            sample_store,
            project_store,
        };
        (state, warnings)
    }

    /// 현재 폼이 저장될 때 쓰일 프로젝트 번호.
    pub fn display_project_number(&self) -> Result<u32, RecordError> {
        match self.form.current_project {
            Some(number) => Ok(number),
            None => next_project_number(&self.projects),
        }
    }

    pub fn find_project(&self, number: u32) -> Result<&Project, RecordError> {
        self.projects
            .iter()
            .find(|p| p.project_number == number)
            .ok_or(RecordError::ProjectNotFound(number))
    }

    /// 명령 하나를 적용한다. 저장 시각은 현지 시간을 쓴다.
    pub fn apply(&mut self, command: Command) -> Result<Outcome, AppError> {
        self.apply_at(command, Local::now().naive_local())
    }

    /// `now`를 지정하는 버전. 테스트에서 시각을 고정할 때 쓴다.
    pub fn apply_at(&mut self, command: Command, now: NaiveDateTime) -> Result<Outcome, AppError> {
        debug!(command = command.name(), "명령 처리");
        let outcome = match command {
            Command::AddSample { id, weight, unit } => {
                let sample = Sample::new(id, weight, unit)?;
                let id = sample.id.clone();
                add_sample(&mut self.samples, sample)?;
                Outcome::new(Effect::SampleAdded(id)).warn_on(self.save_samples())
            }
            Command::DeleteSamples(ids) => {
                let removed = records::delete(&mut self.samples, &ids);
                Outcome::new(Effect::SamplesDeleted(removed)).warn_on(self.save_samples())
            }
            Command::ImportCsv(data) => {
                let report = import_samples_csv(data.as_bytes(), &mut self.samples)?;
                Outcome::new(Effect::Imported(report)).warn_on(self.save_samples())
            }
            Command::NewProject => {
                self.form = ProjectForm {
                    date: now.date(),
                    ..new_form(&self.defaults)
                };
                Outcome::new(Effect::FormReset(next_project_number(&self.projects)?))
            }
            Command::SaveProject(form) => {
                let number = match form.current_project {
                    Some(number) => number,
                    None => next_project_number(&self.projects)?,
                };
                let project = form.to_project(number, now)?;
                self.overview.refresh(&project);
                let number = upsert_project(&mut self.projects, project);
                let mut form = *form;
                form.current_project = Some(number);
                self.form = form;
                Outcome::new(Effect::ProjectSaved(number)).warn_on(self.save_projects())
            }
            Command::LoadProject(number) => {
                self.form = ProjectForm::from_project(self.find_project(number)?);
                Outcome::new(Effect::ProjectLoaded(number))
            }
            Command::DeleteProjects(numbers) => {
                let removed = records::delete(&mut self.projects, &numbers);
                for n in &numbers {
                    self.overview.remove(*n);
                }
                if self
                    .form
                    .current_project
                    .is_some_and(|n| numbers.contains(&n))
                {
                    self.form.current_project = None;
                }
                Outcome::new(Effect::ProjectsDeleted(removed)).warn_on(self.save_projects())
            }
            Command::AddToOverview(numbers) => {
                let picked = numbers
                    .iter()
                    .map(|n| self.find_project(*n).cloned())
                    .collect::<Result<Vec<_>, _>>()?;
                let added = picked.iter().filter(|p| self.overview.add(p)).count();
                Outcome::new(Effect::OverviewAdded(added))
            }
            Command::RemoveFromOverview(number) => {
                Outcome::new(Effect::OverviewRemoved(self.overview.remove(number)))
            }
            Command::ClearOverview => {
                self.overview.clear();
                Outcome::new(Effect::OverviewCleared)
            }
        };
        for w in &outcome.warnings {
            warn!(warning = %w, "저장 경고");
        }
        Ok(outcome)
    }

    fn save_samples(&self) -> Result<(), StoreError> {
        self.sample_store.save(&self.samples)
    }

    fn save_projects(&self) -> Result<(), StoreError> {
        self.project_store.save(&self.projects)
    }
}

fn new_form(defaults: &DefaultUnits) -> ProjectForm {
    ProjectForm {
        weight_unit: defaults.weight,
        dimension_unit: defaults.dimension,
        box_result_unit: defaults.box_result,
        ..ProjectForm::default()
    }
}
