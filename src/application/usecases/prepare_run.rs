//! 실행 구성을 검증하고 최종 명령줄을 만드는 유스케이스.
//! 실제 프로세스 실행은 호스트(IDE/쉘)의 몫이다.

use crate::application::ports::SettingsStore;
use crate::domain::error::ReconcileError;
use crate::domain::run::{CommandLine, RunSettings};

pub struct PrepareRunUseCase<'a> {
    pub settings_store: &'a dyn SettingsStore,
}

impl<'a> PrepareRunUseCase<'a> {
    /// 실행 구성은 사본으로 받아 검증만 하고, 저장된 설정은 바꾸지 않는다.
    pub fn execute(&self, run: &RunSettings) -> Result<CommandLine, ReconcileError> {
        let snapshot = self
            .settings_store
            .load()
            .map_err(ReconcileError::Settings)?;
        let line = run.command_line(&snapshot).inspect_err(|err| {
            tracing::warn!(error = %err, kind = %run.kind, "run configuration rejected");
        })?;
        tracing::debug!(command = %line, "prepared run command");
        Ok(line)
    }
}
