//! 툴체인 감지 → 병합 → 파생값 전파 → 확인 후 커밋 유스케이스.

use crate::application::ports::{
    ConfigRepository, IntrospectionRequest, Reporter, SettingsStore, ToolchainProbe,
    UserConfirmer,
};
use crate::application::session::{SessionEnd, SettingsSession};
use crate::domain::error::{ProcessError, ReconcileError};
use crate::domain::reconcile::{FlagDerivation, reconcile};
use crate::domain::settings::ConfigurationSnapshot;
use crate::domain::version::{ToolchainVersion, supports_modules};

/// 감지 결과 요약.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionOutcome {
    pub snapshot: ConfigurationSnapshot,
    pub version: ToolchainVersion,
    pub modules_supported: bool,
    pub changed: bool,
    pub committed: bool,
}

/// introspection 명령 결과를 저장된 설정에 반영한다.
pub struct DetectToolchainUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
    pub settings_store: &'a dyn SettingsStore,
    pub probe: &'a dyn ToolchainProbe,
    pub derivation: &'a dyn FlagDerivation,
    pub confirmer: &'a dyn UserConfirmer,
    pub reporter: &'a dyn Reporter,
}

impl<'a> DetectToolchainUseCase<'a> {
    /// 저장소를 건드리지 않고 감지/병합/전파만 수행한다.
    /// 실패 시 입력 스냅샷은 그대로이며 오류 종류(Process/Parse)가 구분된다.
    pub async fn detect(
        &self,
        snapshot: &ConfigurationSnapshot,
    ) -> Result<ConfigurationSnapshot, ReconcileError> {
        if !snapshot.enabled() {
            return Err(ProcessError::NotConfigured.into());
        }

        let config = self.config_repo.load().map_err(ReconcileError::Settings)?;
        let request = IntrospectionRequest::from_snapshot(snapshot, config.introspection_timeout_ms());

        self.reporter.status("probe", "running tinygo introspection");
        let raw = self.probe.introspect(&request).await?;
        let next = reconcile(snapshot, &raw, self.derivation).inspect_err(|err| {
            tracing::warn!(error = %err, "introspection output could not be parsed");
        })?;
        Ok(next)
    }

    /// 감지 결과를 작업 사본에 반영하고, 변경이 있으면 사용자 확인 후 커밋한다.
    pub async fn execute(&self) -> Result<DetectionOutcome, ReconcileError> {
        self.reporter.section("Detect Toolchain");

        let config = self.config_repo.load().map_err(ReconcileError::Settings)?;
        let mut editing = SettingsSession::load(self.settings_store)
            .map_err(ReconcileError::Settings)?
            .begin_edit();

        if editing.working().project.target_platform.trim().is_empty()
            && let Some(target) = config.default_target()
        {
            editing.working_mut().project.target_platform = target.to_string();
        }

        if let Some(sdk_root) = editing.working().user.sdk.root.as_deref() {
            self.reporter.kv("SDK", &sdk_root.display().to_string());
        }

        let detected = self.detect(editing.working()).await?;
        self.report_detected(&detected);
        editing.replace_working(detected);

        let changed = editing.is_modified();
        let end = if !changed {
            self.reporter.status("settings", "already up to date");
            editing.discard()
        } else if self
            .confirmer
            .confirm("Save detected toolchain settings?")
            .map_err(ReconcileError::Settings)?
        {
            let end = editing.commit().map_err(ReconcileError::Settings)?;
            self.reporter.status("settings", "saved");
            end
        } else {
            self.reporter.status("settings", "discarded");
            editing.discard()
        };

        let committed = end.is_committed();
        let snapshot = match end {
            SessionEnd::Committed(s) | SessionEnd::Discarded(s) => s,
        };
        let version = snapshot.user.sdk.version;

        Ok(DetectionOutcome {
            modules_supported: supports_modules(version),
            version,
            snapshot,
            changed,
            committed,
        })
    }

    fn report_detected(&self, snapshot: &ConfigurationSnapshot) {
        self.reporter.kv("Version", &snapshot.user.sdk.version.to_string());
        if let Some(go_version) = snapshot.project.go_version.as_deref() {
            self.reporter.kv("Go", go_version);
        }
        self.reporter.kv("GOOS", &snapshot.project.go_os);
        self.reporter.kv("GOARCH", &snapshot.project.go_arch);
        self.reporter.kv("GC", &snapshot.user.gc.to_string());
        self.reporter.kv("Scheduler", &snapshot.user.scheduler.to_string());
        self.reporter.kv("Tags", &snapshot.project.go_tags.join(" "));
    }
}
