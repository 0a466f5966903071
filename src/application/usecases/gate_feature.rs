//! 저장된 툴체인 버전으로 기능 사용 가능 여부를 판단하는 유스케이스.

use anyhow::Result;

use crate::application::ports::SettingsStore;
use crate::domain::version::{ToolchainVersion, is_at_least};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateDecision {
    pub detected: ToolchainVersion,
    pub required: ToolchainVersion,
    pub allowed: bool,
}

pub struct GateFeatureUseCase<'a> {
    pub settings_store: &'a dyn SettingsStore,
}

impl<'a> GateFeatureUseCase<'a> {
    /// SDK 미설정/미감지 버전은 UNKNOWN(0.0.0)으로 비교한다.
    pub fn execute(&self, required: ToolchainVersion) -> Result<GateDecision> {
        let snapshot = self.settings_store.load()?;
        let detected = if snapshot.enabled() {
            snapshot.user.sdk.version
        } else {
            ToolchainVersion::UNKNOWN
        };

        Ok(GateDecision {
            detected,
            required,
            allowed: is_at_least(detected, required),
        })
    }
}
