//! 애플리케이션이 사용하는 설정 스키마(순수 데이터).
//!
//! 주의: 파일/환경변수/프로세스 접근은 `infrastructure`에서만 수행한다.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_INTROSPECTION_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_PROJECT_SETTINGS_PATH: &str = ".tinygo/project.json";

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct Config {
    /// 전역 기본값
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct DefaultsConfig {
    /// `tinygo version`/`tinygo info` 실행 타임아웃(ms)
    pub introspection_timeout_ms: Option<u64>,
    /// user scope 설정 파일 경로(기본: `<config_dir>/tinygo-settings/user.json`)
    pub user_settings_path: Option<String>,
    /// project scope 설정 파일 경로(기본: `.tinygo/project.json`)
    pub project_settings_path: Option<String>,
    /// 프로젝트에 target이 비어 있을 때 사용할 보드 이름
    pub default_target: Option<String>,
}

impl Config {
    pub fn introspection_timeout_ms(&self) -> u64 {
        self.defaults
            .introspection_timeout_ms
            .unwrap_or(DEFAULT_INTROSPECTION_TIMEOUT_MS)
    }

    /// 명시된 user scope 파일 경로. 기본 경로 해석은 인프라 계층이 맡는다.
    pub fn user_settings_path(&self) -> Option<PathBuf> {
        self.defaults.user_settings_path.as_deref().map(PathBuf::from)
    }

    pub fn project_settings_path(&self) -> PathBuf {
        PathBuf::from(
            self.defaults
                .project_settings_path
                .as_deref()
                .unwrap_or(DEFAULT_PROJECT_SETTINGS_PATH),
        )
    }

    pub fn default_target(&self) -> Option<&str> {
        self.defaults
            .default_target
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    /// 후순위(나중 파일) 값으로 덮어쓰는 병합 규칙.
    pub fn merge_from(&mut self, other: Config) {
        self.defaults.merge_from(other.defaults);
    }
}

impl DefaultsConfig {
    pub fn merge_from(&mut self, other: DefaultsConfig) {
        if other.introspection_timeout_ms.is_some() {
            self.introspection_timeout_ms = other.introspection_timeout_ms;
        }
        if other.user_settings_path.is_some() {
            self.user_settings_path = other.user_settings_path;
        }
        if other.project_settings_path.is_some() {
            self.project_settings_path = other.project_settings_path;
        }
        if other.default_target.is_some() {
            self.default_target = other.default_target;
        }
    }
}
