//! 적용 설정 진단(inspection) 뷰 모델.

use serde::Serialize;

use super::loader::LoadedConfig;
use super::utils::{command_exists, user_settings_path};
use crate::application::config::DefaultsConfig;

#[derive(Debug, Clone, Serialize)]
pub struct ConfigInspection {
    pub searched_paths: Vec<String>,
    pub loaded_paths: Vec<String>,
    pub defaults: DefaultsConfig,
    pub effective_defaults: EffectiveDefaults,
    pub toolchain: ToolchainInspection,
}

#[derive(Debug, Clone, Serialize)]
pub struct EffectiveDefaults {
    pub introspection_timeout_ms: u64,
    pub user_settings_path: String,
    pub project_settings_path: String,
    pub default_target: Option<String>,
}

/// PATH 상의 tinygo 존재 여부(SDK 경로 설정 전 참고용).
#[derive(Debug, Clone, Serialize)]
pub struct ToolchainInspection {
    pub tinygo_on_path: bool,
    pub go_on_path: bool,
}

impl ConfigInspection {
    pub(crate) fn from_loaded(loaded: LoadedConfig) -> Self {
        let config = &loaded.config;
        Self {
            searched_paths: loaded
                .searched_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            loaded_paths: loaded
                .loaded_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            defaults: config.defaults.clone(),
            effective_defaults: EffectiveDefaults {
                introspection_timeout_ms: config.introspection_timeout_ms(),
                user_settings_path: user_settings_path(config).display().to_string(),
                project_settings_path: config.project_settings_path().display().to_string(),
                default_target: config.default_target().map(str::to_string),
            },
            toolchain: ToolchainInspection {
                tinygo_on_path: command_exists("tinygo"),
                go_on_path: command_exists("go"),
            },
        }
    }
}
