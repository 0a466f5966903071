//! 앱 설정 탐색/병합 결과와 의심스러운 값을 함께 보여주는 유스케이스.

use anyhow::Result;

use crate::application::config::Config;
use crate::application::ports::ConfigRepository;

/// 설정 점검 JSON + 경고 목록.
#[derive(Debug, Clone)]
pub struct ConfigReport {
    pub json: String,
    pub warnings: Vec<String>,
}

pub struct InspectConfigUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
}

impl<'a> InspectConfigUseCase<'a> {
    pub fn execute(&self) -> Result<ConfigReport> {
        let config = self.config_repo.load()?;
        Ok(ConfigReport {
            json: self.config_repo.inspect_pretty_json()?,
            warnings: config_warnings(&config),
        })
    }
}

fn config_warnings(config: &Config) -> Vec<String> {
    let mut out = Vec::new();
    if config.defaults.introspection_timeout_ms == Some(0) {
        out.push("defaults.introspection_timeout_ms is 0; every probe will time out".to_string());
    }
    if config
        .defaults
        .default_target
        .as_deref()
        .is_some_and(|t| t.trim().is_empty())
    {
        out.push("defaults.default_target is blank and will be ignored".to_string());
    }
    if config
        .defaults
        .project_settings_path
        .as_deref()
        .is_some_and(|p| p.trim().is_empty())
    {
        out.push("defaults.project_settings_path is blank".to_string());
    }
    out
}
