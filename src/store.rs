//! JSON 배열 파일 기반 저장소.
//!
//! 시료/프로젝트 컬렉션을 각각 하나의 pretty JSON 배열 파일로 보관한다.
//! 손상된 파일은 `<path>.backup`으로 격리하고 빈 기본값으로 다시 만든다.
//! 단일 프로세스, 단일 writer를 가정하며 파일 잠금은 하지 않는다.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// 저장소 오류.
#[derive(Debug)]
pub enum StoreError {
    /// 파일 내용이 기대한 형태의 JSON이 아님. 호출자에게 반환되지 않고 격리 처리된다.
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// 쓰기 실패. 경고로만 보고하며 메모리 상태가 우선한다.
    WriteFailed { path: PathBuf, source: io::Error },
    /// 읽기 실패
    Io { path: PathBuf, source: io::Error },
    /// 직렬화 실패
    Serialize(serde_json::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Corrupt { path, source } => {
                write!(f, "저장 파일 손상({}): {source}", path.display())
            }
            StoreError::WriteFailed { path, source } => {
                write!(f, "저장 실패({}): {source}", path.display())
            }
            StoreError::Io { path, source } => {
                write!(f, "파일 읽기 오류({}): {source}", path.display())
            }
            StoreError::Serialize(e) => write!(f, "JSON 직렬화 오류: {e}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Corrupt { source, .. } => Some(source),
            StoreError::WriteFailed { source, .. } | StoreError::Io { source, .. } => Some(source),
            StoreError::Serialize(e) => Some(e),
        }
    }
}

/// 레코드 `T`의 JSON 배열을 담는 파일 하나.
#[derive(Debug, Clone)]
pub struct JsonStore<T> {
    path: PathBuf,
    _records: PhantomData<fn() -> T>,
}

impl<T> JsonStore<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _records: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 격리 파일 경로. 확장자를 바꾸지 않고 `.backup`을 덧붙인다.
    pub fn backup_path(&self) -> PathBuf {
        append_suffix(&self.path, ".backup")
    }

    fn temp_path(&self) -> PathBuf {
        append_suffix(&self.path, ".tmp")
    }

    /// 컬렉션을 읽는다.
    ///
    /// 파일이 없거나 비어 있으면 빈 컬렉션. 손상된 경우 파일을 격리하고
    /// 빈 컬렉션을 돌려준다. 어떤 경우에도 파싱 오류를 반환하지 않는다.
    pub fn load(&self) -> Vec<T> {
        match self.read() {
            Ok(Some(records)) => {
                debug!(path = %self.path.display(), count = records.len(), "컬렉션 로드");
                records
            }
            Ok(None) => Vec::new(),
            Err(err @ StoreError::Corrupt { .. }) => {
                warn!(error = %err, "손상된 저장 파일을 격리합니다");
                self.quarantine();
                Vec::new()
            }
            Err(err) => {
                warn!(error = %err, "저장 파일을 읽지 못해 빈 컬렉션으로 시작합니다");
                Vec::new()
            }
        }
    }

    /// 파일 전체를 덮어쓴다. 임시 파일에 쓴 뒤 rename 하므로 부분 기록은 노출되지 않는다.
    pub fn save(&self, records: &[T]) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(records).map_err(StoreError::Serialize)?;
        let tmp = self.temp_path();
        let written = fs::write(&tmp, content).and_then(|_| fs::rename(&tmp, &self.path));
        if let Err(source) = written {
            let _ = fs::remove_file(&tmp);
            warn!(path = %self.path.display(), error = %source, "저장 실패");
            return Err(StoreError::WriteFailed {
                path: self.path.clone(),
                source,
            });
        }
        debug!(path = %self.path.display(), count = records.len(), "컬렉션 저장");
        Ok(())
    }

    /// 파일이 항상 유효한 JSON 배열이 되도록 복구한다. 여러 번 호출해도 결과는 같다.
    ///
    /// - 없으면 `default`로 생성
    /// - 비어 있으면 `default`로 다시 기록
    /// - 파싱되면 그대로 둠
    /// - 손상되었으면 격리 후 `default`로 기록
    pub fn ensure_valid(&self, default: &[T]) -> Result<(), StoreError> {
        match self.read() {
            Ok(Some(_)) => Ok(()),
            Ok(None) => self.save(default),
            Err(err @ StoreError::Corrupt { .. }) => {
                warn!(error = %err, "손상된 저장 파일을 격리하고 기본값으로 재생성합니다");
                self.quarantine();
                self.save(default)
            }
            Err(err) => Err(err),
        }
    }

    /// `Ok(None)`은 파일이 없거나 공백뿐인 경우.
    fn read(&self) -> Result<Option<Vec<T>>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            // UTF-8이 아닌 내용도 손상으로 본다
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                return Err(StoreError::Corrupt {
                    path: self.path.clone(),
                    source: serde_json::Error::io(e),
                })
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if content.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| StoreError::Corrupt {
                path: self.path.clone(),
                source,
            })
    }

    /// best-effort. rename 실패는 기록만 하고 삼킨다.
    fn quarantine(&self) {
        let backup = self.backup_path();
        if let Err(e) = fs::rename(&self.path, &backup) {
            warn!(
                path = %self.path.display(),
                backup = %backup.display(),
                error = %e,
                "손상 파일 격리 실패"
            );
        }
    }
}

fn append_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::tempdir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Rec {
        id: String,
        n: u32,
    }

    fn recs() -> Vec<Rec> {
        vec![
            Rec {
                id: "a".into(),
                n: 1,
            },
            Rec {
                id: "b".into(),
                n: 2,
            },
        ]
    }

    #[test]
    fn missing_and_empty_files_load_as_empty() {
        let dir = tempdir().unwrap();
        let store: JsonStore<Rec> = JsonStore::new(dir.path().join("x.json"));
        assert!(store.load().is_empty());
        fs::write(store.path(), "  \n").unwrap();
        assert!(store.load().is_empty());
        assert!(!store.backup_path().exists());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("x.json"));
        store.save(&recs()).unwrap();
        assert_eq!(store.load(), recs());
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn wrong_shape_is_treated_as_corrupt() {
        let dir = tempdir().unwrap();
        let store: JsonStore<Rec> = JsonStore::new(dir.path().join("x.json"));
        fs::write(store.path(), r#"{"id": "a"}"#).unwrap();
        assert!(store.load().is_empty());
        assert_eq!(
            fs::read_to_string(store.backup_path()).unwrap(),
            r#"{"id": "a"}"#
        );
        assert!(!store.path().exists());
    }

    #[test]
    fn ensure_valid_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("x.json"));
        store.ensure_valid(&recs()).unwrap();
        store.ensure_valid(&[]).unwrap();
        assert_eq!(store.load(), recs());
    }

    #[test]
    fn write_into_missing_directory_fails_as_warning() {
        let dir = tempdir().unwrap();
        let store: JsonStore<Rec> = JsonStore::new(dir.path().join("nope").join("x.json"));
        assert!(matches!(
            store.save(&recs()),
            Err(StoreError::WriteFailed { .. })
        ));
    }

    #[test]
    fn backup_path_appends_suffix() {
        let store: JsonStore<Rec> = JsonStore::new("data/dva_projects.json");
        assert_eq!(
            store.backup_path(),
            PathBuf::from("data/dva_projects.json.backup")
        );
    }
}
