use crate::config::Config;
use crate::conversion;
use crate::import::ImportError;
use crate::records::RecordError;
use crate::state::AppState;
use crate::ui_cli::{self, CliCommand};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum AppError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// 설정 저장/로드 오류
    Config(crate::config::ConfigError),
    /// 단위/입력값 오류
    Conversion(conversion::ConversionError),
    /// 시료/프로젝트 레코드 오류
    Record(RecordError),
    /// CSV 가져오기 오류
    Import(ImportError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "입출력 오류: {e}"),
            AppError::Config(e) => write!(f, "설정 오류: {e}"),
            AppError::Conversion(e) => write!(f, "단위 변환 오류: {e}"),
            AppError::Record(e) => write!(f, "데이터 오류: {e}"),
            AppError::Import(e) => write!(f, "가져오기 오류: {e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<crate::config::ConfigError> for AppError {
    fn from(value: crate::config::ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<conversion::ConversionError> for AppError {
    fn from(value: conversion::ConversionError) -> Self {
        AppError::Conversion(value)
    }
}

impl From<RecordError> for AppError {
    fn from(value: RecordError) -> Self {
        match value {
            RecordError::Conversion(e) => AppError::Conversion(e),
            other => AppError::Record(other),
        }
    }
}

impl From<ImportError> for AppError {
    fn from(value: ImportError) -> Self {
        AppError::Import(value)
    }
}

/// 데이터 파일을 열고 CLI 명령 하나를 처리한다.
pub fn run(config: &Config, command: CliCommand) -> Result<(), AppError> {
    let (mut state, warnings) = AppState::open(config);
    ui_cli::print_warnings(&warnings);
    match command {
        CliCommand::Convert { weight, unit } => ui_cli::handle_convert(weight, unit)?,
        CliCommand::Box(args) => ui_cli::handle_box(&args)?,
        CliCommand::Remaining(args) => ui_cli::handle_remaining(config, &args)?,
        CliCommand::Samples { action } => ui_cli::handle_samples(&mut state, action)?,
        CliCommand::Projects { action } => ui_cli::handle_projects(&mut state, config, action)?,
    }
    Ok(())
}
