//! 사용자 입력으로 설정을 수정하는 유스케이스.

use std::path::PathBuf;

use anyhow::Result;

use crate::application::ports::{Reporter, SettingsStore};
use crate::application::session::{SessionEnd, SettingsSession};
use crate::domain::reconcile::{FlagDerivation, propagate_flags};
use crate::domain::settings::{GarbageCollector, Scheduler, Sdk};

/// 변경할 항목만 채운 수정 요청.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    pub sdk_root: Option<PathBuf>,
    pub target: Option<String>,
    pub gc: Option<GarbageCollector>,
    pub scheduler: Option<Scheduler>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

pub struct EditSettingsUseCase<'a> {
    pub settings_store: &'a dyn SettingsStore,
    pub derivation: &'a dyn FlagDerivation,
    pub reporter: &'a dyn Reporter,
}

impl<'a> EditSettingsUseCase<'a> {
    /// 패치를 작업 사본에 적용하고 변경이 있을 때만 커밋한다.
    pub fn execute(&self, patch: SettingsPatch) -> Result<SessionEnd> {
        let mut editing = SettingsSession::load(self.settings_store)?.begin_edit();
        let working = editing.working_mut();

        if let Some(root) = patch.sdk_root {
            // A new SDK root invalidates the detected version until the next detect run.
            if working.user.sdk.root.as_deref() != Some(root.as_path()) {
                working.user.sdk = Sdk::at(root);
            }
        }
        if let Some(target) = patch.target {
            working.project.target_platform = target.trim().to_string();
        }
        if let Some(gc) = patch.gc {
            working.user.gc = gc;
        }
        if let Some(scheduler) = patch.scheduler {
            working.user.scheduler = scheduler;
        }
        propagate_flags(working, self.derivation);

        let end = editing.commit_if_modified()?;
        self.reporter.status(
            "settings",
            if end.is_committed() {
                "saved"
            } else {
                "no changes"
            },
        );
        Ok(end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::usecases::test_support::{NullReporter, snapshot_with_sdk};
    use crate::domain::reconcile::GoBuildTargetDerivation;
    use crate::domain::version::ToolchainVersion;
    use crate::infrastructure::adapters::InMemorySettingsStore;

    fn usecase(store: &InMemorySettingsStore) -> EditSettingsUseCase<'_> {
        EditSettingsUseCase {
            settings_store: store,
            derivation: &GoBuildTargetDerivation,
            reporter: &NullReporter,
        }
    }

    #[test]
    fn patch_is_applied_and_derived_fields_follow() {
        let store = InMemorySettingsStore::new(snapshot_with_sdk());
        let end = usecase(&store)
            .execute(SettingsPatch {
                gc: Some(GarbageCollector::Leaking),
                ..SettingsPatch::default()
            })
            .unwrap();

        assert!(end.is_committed());
        let saved = store.load().unwrap();
        assert_eq!(saved.user.gc, GarbageCollector::Leaking);
        assert_eq!(saved.project.build_target.gc, GarbageCollector::Leaking);
    }

    #[test]
    fn changing_sdk_root_resets_detected_version() {
        let mut snapshot = snapshot_with_sdk();
        snapshot.user.sdk.version = ToolchainVersion::new(0, 19, 0);
        let store = InMemorySettingsStore::new(snapshot);

        usecase(&store)
            .execute(SettingsPatch {
                sdk_root: Some(PathBuf::from("/usr/local/tinygo")),
                ..SettingsPatch::default()
            })
            .unwrap();

        let saved = store.load().unwrap();
        assert_eq!(saved.user.sdk.root, Some(PathBuf::from("/usr/local/tinygo")));
        assert!(saved.user.sdk.version.is_unknown());
    }

    #[test]
    fn same_values_do_not_commit() {
        let store = InMemorySettingsStore::new(snapshot_with_sdk());
        let end = usecase(&store)
            .execute(SettingsPatch {
                target: Some("pca10056".into()),
                ..SettingsPatch::default()
            })
            .unwrap();
        assert!(!end.is_committed());
    }
}
