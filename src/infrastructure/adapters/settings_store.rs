//! user/project scope 설정 저장소 포트 구현 어댑터.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::application::config::Config;
use crate::application::ports::SettingsStore;
use crate::domain::settings::ConfigurationSnapshot;
use crate::infrastructure::config::user_settings_path;

// 두 scope 파일을 한 번에 읽고 쓰도록 프로세스 안에서 직렬화한다.
static STORE_LOCK: Mutex<()> = Mutex::new(());

/// scope별 JSON 파일 저장소. 파일이 없으면 기본값으로 읽는다.
#[derive(Debug, Clone)]
pub struct JsonSettingsStore {
    user_path: PathBuf,
    project_path: PathBuf,
}

impl JsonSettingsStore {
    pub fn new(user_path: impl Into<PathBuf>, project_path: impl Into<PathBuf>) -> Self {
        Self {
            user_path: user_path.into(),
            project_path: project_path.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(user_settings_path(config), config.project_settings_path())
    }

    pub fn user_path(&self) -> &Path {
        &self.user_path
    }

    pub fn project_path(&self) -> &Path {
        &self.project_path
    }
}

impl SettingsStore for JsonSettingsStore {
    fn load(&self) -> Result<ConfigurationSnapshot> {
        let _guard = STORE_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        Ok(ConfigurationSnapshot::new(
            read_scope(&self.user_path)?,
            read_scope(&self.project_path)?,
        ))
    }

    fn store(&self, snapshot: &ConfigurationSnapshot) -> Result<()> {
        // 직렬화를 먼저 끝내 쓰기 도중 실패할 여지를 줄인다.
        let user = render(&snapshot.user)?;
        let project = render(&snapshot.project)?;

        let _guard = STORE_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let user_tmp = tmp_path(&self.user_path);
        let project_tmp = tmp_path(&self.project_path);
        let result = self.commit_scopes(&user, &project, &user_tmp, &project_tmp);
        if result.is_err() {
            discard(&user_tmp);
            discard(&project_tmp);
        }
        result?;

        tracing::debug!(
            user = %self.user_path.display(),
            project = %self.project_path.display(),
            "settings written"
        );
        Ok(())
    }
}

impl JsonSettingsStore {
    /// 두 scope를 모두 스테이징한 뒤 교체한다.
    /// project 교체가 실패하면 user 파일을 이전 내용으로 되돌린다.
    fn commit_scopes(
        &self,
        user: &str,
        project: &str,
        user_tmp: &Path,
        project_tmp: &Path,
    ) -> Result<()> {
        stage(&self.user_path, user_tmp, user)?;
        stage(&self.project_path, project_tmp, project)?;

        let previous_user = read_previous(&self.user_path)?;
        promote(user_tmp, &self.user_path)?;
        if let Err(err) = promote(project_tmp, &self.project_path) {
            restore(&self.user_path, previous_user.as_deref());
            return Err(err);
        }
        Ok(())
    }
}

fn read_scope<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Ok(T::default());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings at {}", path.display()))?;
    if raw.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse JSON in {}", path.display()))
}

fn render<T: Serialize>(value: &T) -> Result<String> {
    Ok(format!("{}\n", serde_json::to_string_pretty(value)?))
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

fn stage(path: &Path, tmp: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    fs::write(tmp, content)
        .with_context(|| format!("failed to write settings at {}", tmp.display()))
}

fn promote(tmp: &Path, path: &Path) -> Result<()> {
    fs::rename(tmp, path)
        .with_context(|| format!("failed to replace settings at {}", path.display()))
}

fn read_previous(path: &Path) -> Result<Option<Vec<u8>>> {
    if !path.is_file() {
        return Ok(None);
    }
    fs::read(path)
        .map(Some)
        .with_context(|| format!("failed to read settings at {}", path.display()))
}

fn restore(path: &Path, previous: Option<&[u8]>) {
    let restored = match previous {
        Some(bytes) => fs::write(path, bytes),
        None => fs::remove_file(path),
    };
    if let Err(err) = restored {
        tracing::warn!(path = %path.display(), error = %err, "failed to roll back settings");
    }
}

fn discard(tmp: &Path) {
    if tmp.exists()
        && let Err(err) = fs::remove_file(tmp)
    {
        tracing::warn!(path = %tmp.display(), error = %err, "failed to remove staged settings");
    }
}

/// 테스트/라이브러리 호출용 메모리 저장소.
#[derive(Debug, Default)]
pub struct InMemorySettingsStore {
    snapshot: RwLock<ConfigurationSnapshot>,
}

impl InMemorySettingsStore {
    pub fn new(snapshot: ConfigurationSnapshot) -> Self {
        Self {
            snapshot: RwLock::new(snapshot),
        }
    }
}

impl SettingsStore for InMemorySettingsStore {
    fn load(&self) -> Result<ConfigurationSnapshot> {
        let guard = self
            .snapshot
            .read()
            .map_err(|_| anyhow!("settings lock poisoned"))?;
        Ok(guard.deep_copy())
    }

    fn store(&self, snapshot: &ConfigurationSnapshot) -> Result<()> {
        let mut guard = self
            .snapshot
            .write()
            .map_err(|_| anyhow!("settings lock poisoned"))?;
        *guard = snapshot.deep_copy();
        Ok(())
    }
}
