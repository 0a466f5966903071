//! 현재 저장된 설정 스냅샷을 조회하는 유스케이스.

use anyhow::Result;
use serde::Serialize;

use crate::application::ports::SettingsStore;
use crate::domain::settings::ConfigurationSnapshot;
use crate::domain::version::supports_modules;

/// 출력용 뷰 모델.
#[derive(Debug, Clone, Serialize)]
pub struct SettingsOverview {
    pub enabled: bool,
    pub sdk_valid: bool,
    pub modules_supported: bool,
    pub settings: ConfigurationSnapshot,
}

pub struct ShowSettingsUseCase<'a> {
    pub settings_store: &'a dyn SettingsStore,
}

impl<'a> ShowSettingsUseCase<'a> {
    pub fn execute(&self) -> Result<SettingsOverview> {
        let settings = self.settings_store.load()?;
        Ok(SettingsOverview {
            enabled: settings.enabled(),
            sdk_valid: settings.user.sdk.is_valid(),
            modules_supported: settings.enabled() && supports_modules(settings.user.sdk.version),
            settings,
        })
    }

    pub fn execute_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.execute()?)?)
    }
}
