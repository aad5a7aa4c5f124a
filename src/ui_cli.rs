use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

use crate::app::AppError;
use crate::config::{Config, DEFAULT_CONFIG_PATH};
use crate::displacement::{
    compute_remaining, convert_box_volume, convert_weight_to_volume, BoxDimensions,
    RemainingVolume,
};
use crate::format::{format_pct, format_volume};
use crate::records::{sample_results, Project, ProjectForm};
use crate::state::{AppState, Command, Outcome};
use crate::units::{DimensionUnit, VolumeUnit, WeightUnit};

/// 물 배수 체적 계산기.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// 설정 파일 경로
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// 무게를 물 체적(mm³, cm³, in³)으로 환산
    Convert {
        weight: f64,
        /// grams, ounces, pounds, kilograms
        unit: WeightUnit,
    },
    /// 박스 체적 계산
    Box(BoxArgs),
    /// 박스 대비 제품 잔여 체적과 공간 활용률
    Remaining(RemainingArgs),
    /// 보정 시료 관리
    Samples {
        #[command(subcommand)]
        action: SampleAction,
    },
    /// 프로젝트 관리
    Projects {
        #[command(subcommand)]
        action: ProjectAction,
    },
}

#[derive(Debug, Args)]
pub struct BoxArgs {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    /// mm, cm, inches, feet
    #[arg(long, default_value = "cm")]
    pub unit: DimensionUnit,
    /// cubic mm, cubic cm, cubic inches
    #[arg(long, default_value = "cubic cm")]
    pub result: VolumeUnit,
}

#[derive(Debug, Args)]
pub struct RemainingArgs {
    #[arg(long)]
    pub weight: f64,
    #[arg(long, default_value = "grams")]
    pub weight_unit: WeightUnit,
    #[command(flatten)]
    pub dims: BoxArgs,
    /// 표시 단위. 생략하면 설정의 기본값
    #[arg(long)]
    pub to: Option<VolumeUnit>,
}

#[derive(Debug, Subcommand)]
pub enum SampleAction {
    /// 시료 목록
    List,
    /// 시료별 체적 환산표
    Results,
    /// 시료 추가
    Add {
        id: String,
        weight: f64,
        unit: WeightUnit,
    },
    /// 시료 삭제
    Delete {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// CSV 가져오기 (열: Sample ID, Weight, Unit)
    Import { path: PathBuf },
}

#[derive(Debug, Subcommand)]
pub enum ProjectAction {
    /// 프로젝트 목록
    List,
    /// 프로젝트 상세
    Show {
        number: u32,
        /// 잔여 체적 표시 단위
        #[arg(long)]
        to: Option<VolumeUnit>,
    },
    /// 새 프로젝트 저장 또는 `--number`로 기존 프로젝트 수정
    Save(ProjectFormArgs),
    /// 프로젝트 삭제
    Delete {
        #[arg(required = true)]
        numbers: Vec<u32>,
    },
    /// 여러 프로젝트의 잔여 체적 비교
    Compare {
        #[arg(required = true)]
        numbers: Vec<u32>,
        #[arg(long)]
        to: Option<VolumeUnit>,
    },
}

/// 지정한 항목만 폼에 덮어쓴다.
#[derive(Debug, Args)]
pub struct ProjectFormArgs {
    /// 수정할 프로젝트 번호
    #[arg(long)]
    pub number: Option<u32>,
    #[arg(long)]
    pub name: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[arg(long)]
    pub designer: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub contact: Option<String>,
    #[arg(long)]
    pub weight: Option<f64>,
    #[arg(long)]
    pub weight_unit: Option<WeightUnit>,
    #[arg(long)]
    pub length: Option<f64>,
    #[arg(long)]
    pub width: Option<f64>,
    #[arg(long)]
    pub height: Option<f64>,
    #[arg(long)]
    pub dimension_unit: Option<DimensionUnit>,
    #[arg(long)]
    pub result_unit: Option<VolumeUnit>,
}

impl ProjectFormArgs {
    fn apply_to(&self, form: &mut ProjectForm) {
        if let Some(v) = &self.name {
            form.project_name = v.clone();
        }
        if let Some(v) = self.date {
            form.date = v;
        }
        if let Some(v) = &self.designer {
            form.designer = v.clone();
        }
        if let Some(v) = &self.description {
            form.description = v.clone();
        }
        if let Some(v) = &self.contact {
            form.contact = v.clone();
        }
        if let Some(v) = self.weight {
            form.weight = v;
        }
        if let Some(v) = self.weight_unit {
            form.weight_unit = v;
        }
        if let Some(v) = self.length {
            form.box_length = v;
        }
        if let Some(v) = self.width {
            form.box_width = v;
        }
        if let Some(v) = self.height {
            form.box_height = v;
        }
        if let Some(v) = self.dimension_unit {
            form.dimension_unit = v;
        }
        if let Some(v) = self.result_unit {
            form.box_result_unit = v;
        }
    }
}

/// 무게 → 체적 환산 결과를 출력한다.
pub fn handle_convert(weight: f64, unit: WeightUnit) -> Result<(), AppError> {
    let v = convert_weight_to_volume(weight, unit)?;
    println!("\n-- 체적 환산 ({weight} {unit}) --");
    println!("{:>20} mm³", format_volume(v.mm3, 2));
    println!("{:>20} cm³", format_volume(v.cm3, 2));
    println!("{:>20} in³", format_volume(v.in3, 3));
    Ok(())
}

pub fn handle_box(args: &BoxArgs) -> Result<(), AppError> {
    let v = convert_box_volume(args.length, args.width, args.height, args.unit, args.result)?;
    println!(
        "박스 체적 ({} × {} × {} {}): {} {}",
        args.length,
        args.width,
        args.height,
        args.unit,
        format_volume(v, 2),
        args.result
    );
    Ok(())
}

pub fn handle_remaining(config: &Config, args: &RemainingArgs) -> Result<(), AppError> {
    let product = convert_weight_to_volume(args.weight, args.weight_unit)?;
    let dims = BoxDimensions {
        length: args.dims.length,
        width: args.dims.width,
        height: args.dims.height,
        unit: args.dims.unit,
    };
    let box_mm3 = dims.volume_mm3()?;
    let unit = args.to.unwrap_or(config.default_units.remaining);
    let analysis = compute_remaining(box_mm3, product.mm3, unit);
    println!("\n-- 잔여 체적 분석 --");
    print_analysis(&analysis);
    Ok(())
}

pub fn handle_samples(state: &mut AppState, action: SampleAction) -> Result<(), AppError> {
    match action {
        SampleAction::List => {
            if state.samples.is_empty() {
                println!("등록된 시료가 없습니다.");
            }
            for s in &state.samples {
                println!("{s}");
            }
        }
        SampleAction::Results => {
            let rows = sample_results(&state.samples)?;
            if rows.is_empty() {
                println!("등록된 시료가 없습니다.");
                return Ok(());
            }
            println!(
                "{:<16} {:>10} {:<10} {:>18} {:>14} {:>12}",
                "Sample ID", "Weight", "Unit", "Volume (mm³)", "Volume (cm³)", "Volume (in³)"
            );
            for r in rows {
                println!(
                    "{:<16} {:>10.2} {:<10} {:>18} {:>14} {:>12}",
                    r.id,
                    r.weight,
                    r.unit,
                    format_volume(r.volume.mm3, 2),
                    format_volume(r.volume.cm3, 2),
                    format_volume(r.volume.in3, 3)
                );
            }
        }
        SampleAction::Add { id, weight, unit } => {
            report(state.apply(Command::AddSample { id, weight, unit })?);
        }
        SampleAction::Delete { ids } => {
            report(state.apply(Command::DeleteSamples(ids))?);
        }
        SampleAction::Import { path } => {
            let data = fs::read_to_string(&path)?;
            report(state.apply(Command::ImportCsv(data))?);
        }
    }
    Ok(())
}

pub fn handle_projects(
    state: &mut AppState,
    config: &Config,
    action: ProjectAction,
) -> Result<(), AppError> {
    match action {
        ProjectAction::List => {
            if state.projects.is_empty() {
                println!("저장된 프로젝트가 없습니다.");
            }
            for p in &state.projects {
                println!(
                    "{}  {:<24} {}  {:<16} 수정: {}",
                    p.project_number, p.project_name, p.date, p.designer, p.last_modified
                );
            }
        }
        ProjectAction::Show { number, to } => {
            let project = state.find_project(number)?;
            print_project(project, to.unwrap_or(config.default_units.remaining))?;
        }
        ProjectAction::Save(args) => {
            match args.number {
                Some(n) => report(state.apply(Command::LoadProject(n))?),
                None => report(state.apply(Command::NewProject)?),
            }
            let mut form = state.form.clone();
            args.apply_to(&mut form);
            report(state.apply(Command::SaveProject(Box::new(form)))?);
        }
        ProjectAction::Delete { numbers } => {
            report(state.apply(Command::DeleteProjects(numbers))?);
        }
        ProjectAction::Compare { numbers, to } => {
            report(state.apply(Command::AddToOverview(numbers))?);
            let unit = to.unwrap_or(config.default_units.remaining);
            let rows = state.overview.comparison(unit);
            if rows.is_empty() {
                println!("박스 체적이 있는 프로젝트가 없습니다.");
            }
            for row in rows {
                println!("\n== {} - {} ==", row.project_number, row.project_name);
                print_analysis(&row.analysis);
            }
        }
    }
    Ok(())
}

fn print_project(p: &Project, unit: VolumeUnit) -> Result<(), AppError> {
    println!("\n== 프로젝트 {} - {} ==", p.project_number, p.project_name);
    println!("설계자: {}  날짜: {}  연락처: {}", p.designer, p.date, p.contact);
    println!("설명: {}", p.description);
    println!("제품: {} {} → {}", p.weight, p.weight_unit, p.primary_volume()?);
    if p.has_box() {
        println!(
            "박스: {} × {} × {} {} = {} {} ({} mm³)",
            p.box_length,
            p.box_width,
            p.box_height,
            p.dimension_unit,
            format_volume(p.box_volume(), 2),
            p.box_result_unit,
            format_volume(p.box_volume_mm3, 2)
        );
        print_analysis(&p.analysis(unit));
    }
    Ok(())
}

fn print_analysis(a: &RemainingVolume) {
    println!("박스 체적: {} {}", format_volume(a.box_volume, 2), a.unit);
    println!("제품 체적: {} {}", format_volume(a.product_volume, 2), a.unit);
    println!("잔여 체적: {} {}", format_volume(a.remaining, 2), a.unit);
    println!(
        "공간 활용률: {} ({})  잔여 공간: {} ({})",
        format_pct(a.efficiency_pct),
        a.efficiency_band(),
        format_pct(a.remaining_pct),
        a.fit_status()
    );
    if a.is_overflow() {
        println!("경고: 제품 체적이 박스 용량을 초과합니다!");
    }
}

fn report(outcome: Outcome) {
    println!("{}", outcome.effect);
    print_warnings(&outcome.warnings);
}

/// 저장 경고를 stderr로 출력한다.
pub fn print_warnings(warnings: &[String]) {
    for w in warnings {
        eprintln!("경고: {w}");
    }
}
