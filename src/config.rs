use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::conversion::{ensure_box_result_unit, ConversionError};
use crate::units::*;

/// 기본 설정 파일 이름.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 데이터 파일 위치.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataFiles {
    /// 보정 시료 파일
    pub samples_file: PathBuf,
    /// 프로젝트 파일
    pub projects_file: PathBuf,
    /// 시료 파일이 없을 때 기본 시료 5개로 시작할지 여부
    pub seed_samples: bool,
}

impl Default for DataFiles {
    fn default() -> Self {
        Self {
            samples_file: PathBuf::from("dva_data.json"),
            projects_file: PathBuf::from("dva_projects.json"),
            seed_samples: true,
        }
    }
}

/// 입력 폼과 결과 표시의 기본 단위. 빠진 항목은 기본값으로 채운다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultUnits {
    pub weight: WeightUnit,
    pub dimension: DimensionUnit,
    pub box_result: VolumeUnit,
    /// 잔여 체적/비교 표시 단위
    pub remaining: VolumeUnit,
}

impl Default for DefaultUnits {
    fn default() -> Self {
        Self {
            weight: WeightUnit::Grams,
            dimension: DimensionUnit::Centimeter,
            box_result: VolumeUnit::CubicCentimeter,
            remaining: VolumeUnit::CubicCentimeter,
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataFiles,
    #[serde(default)]
    pub default_units: DefaultUnits,
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum ConfigError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// TOML 역직렬화 오류
    Serde(toml::de::Error),
    /// TOML 직렬화 오류
    Serialize(toml::ser::Error),
    /// 설정 항목에 쓸 수 없는 단위
    InvalidUnit {
        key: &'static str,
        source: ConversionError,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "파일 입출력 오류: {e}"),
            ConfigError::Serde(e) => write!(f, "설정 파싱 오류: {e}"),
            ConfigError::Serialize(e) => write!(f, "설정 직렬화 오류: {e}"),
            ConfigError::InvalidUnit { key, source } => {
                write!(f, "설정 항목 '{key}' 값이 잘못되었습니다: {source}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        ConfigError::Serde(value)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(value: toml::ser::Error) -> Self {
        ConfigError::Serialize(value)
    }
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        cfg.validate()?;
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save(path)?;
        Ok(cfg)
    }
}

impl Config {
    /// 박스 결과 단위는 cubic feet를 쓸 수 없다.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_box_result_unit(self.default_units.box_result).map_err(|source| {
            ConfigError::InvalidUnit {
                key: "default_units.box_result",
                source,
            }
        })?;
        Ok(())
    }

    /// 설정을 `path`에 저장한다.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
