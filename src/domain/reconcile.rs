//! 감지된 툴체인 정보를 설정 스냅샷에 병합하고 파생 값을 다시 계산한다.

use crate::domain::error::ParseError;
use crate::domain::introspection::{ToolchainInfo, extract_info};
use crate::domain::settings::{ConfigurationSnapshot, GoBuildTarget};

/// 병합된 flag로부터 파생 설정을 계산하는 규칙.
/// 어떤 필드가 파생되는지는 구현체만 안다.
pub trait FlagDerivation: Send + Sync {
    fn derive(&self, snapshot: &mut ConfigurationSnapshot);
}

/// 기본 파생 규칙: project scope의 GOOS/GOARCH/tags와 user scope의 gc/scheduler로
/// Go 모듈 빌드 대상을 구성한다.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoBuildTargetDerivation;

impl FlagDerivation for GoBuildTargetDerivation {
    fn derive(&self, snapshot: &mut ConfigurationSnapshot) {
        let project = &snapshot.project;
        // gc.*/scheduler.* tags are added by the toolchain from -gc/-scheduler.
        let tags = project
            .go_tags
            .iter()
            .filter(|tag| !tag.starts_with("gc.") && !tag.starts_with("scheduler."))
            .cloned()
            .collect();

        let target = GoBuildTarget {
            os: project.go_os.clone(),
            arch: project.go_arch.clone(),
            tags,
            gc: snapshot.user.gc,
            scheduler: snapshot.user.scheduler,
        };
        snapshot.project.build_target = target;
    }
}

/// 감지 정보로 스냅샷 값을 덮어쓴다(누적하지 않는다).
/// 같은 정보로 여러 번 병합해도 결과가 같다.
pub fn merge(snapshot: &ConfigurationSnapshot, info: &ToolchainInfo) -> ConfigurationSnapshot {
    let mut next = snapshot.deep_copy();

    next.user.sdk.version = info.version;
    if let Some(gc) = info.gc {
        next.user.gc = gc;
    }
    if let Some(scheduler) = info.scheduler {
        next.user.scheduler = scheduler;
    }

    if let Some(go_os) = &info.go_os {
        next.project.go_os = go_os.clone();
    }
    if let Some(go_arch) = &info.go_arch {
        next.project.go_arch = go_arch.clone();
    }
    if !info.build_tags.is_empty() {
        next.project.go_tags = info.build_tags.clone();
    }
    if info.cached_go_root.is_some() {
        next.project.cached_go_root = info.cached_go_root.clone();
    }
    if info.go_version.is_some() {
        next.project.go_version = info.go_version.clone();
    }

    tracing::debug!(
        version = %info.version,
        gc = %next.user.gc,
        scheduler = %next.user.scheduler,
        "merged toolchain info"
    );
    next
}

/// 파생 설정을 다시 계산한다. flag가 바뀔 때마다 호출해야 한다.
pub fn propagate_flags(snapshot: &mut ConfigurationSnapshot, derivation: &dyn FlagDerivation) {
    derivation.derive(snapshot);
}

/// extract → merge → propagate. 해석에 실패하면 입력 스냅샷은 그대로 남는다.
pub fn reconcile(
    snapshot: &ConfigurationSnapshot,
    raw_output: &str,
    derivation: &dyn FlagDerivation,
) -> Result<ConfigurationSnapshot, ParseError> {
    let info = extract_info(raw_output)?;
    let mut next = merge(snapshot, &info);
    propagate_flags(&mut next, derivation);
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::settings::{GarbageCollector, Scheduler, Sdk};
    use crate::domain::version::{ToolchainVersion, supports_modules};

    fn base() -> ConfigurationSnapshot {
        let mut snapshot = ConfigurationSnapshot::default();
        snapshot.user.sdk = Sdk::at("/opt/tinygo");
        snapshot.project.target_platform = "pca10056".into();
        snapshot.project.go_tags = vec!["stale".into()];
        snapshot
    }

    fn info() -> ToolchainInfo {
        ToolchainInfo {
            version: ToolchainVersion::new(0, 19, 0),
            go_version: Some("1.16.5".into()),
            gc: Some(GarbageCollector::Conservative),
            scheduler: Some(Scheduler::Tasks),
            go_os: Some("linux".into()),
            go_arch: Some("arm".into()),
            build_tags: vec!["cortexm".into(), "gc.conservative".into(), "scheduler.tasks".into()],
            cached_go_root: None,
            llvm_triple: Some("thumbv7em-unknown-unknown-eabi".into()),
        }
    }

    #[test]
    fn merge_is_idempotent() {
        let once = merge(&base(), &info());
        let twice = merge(&once, &info());
        assert_eq!(once, twice);
    }

    #[test]
    fn merge_overwrites_tags_instead_of_accumulating() {
        let merged = merge(&base(), &info());
        assert_eq!(merged.project.go_tags, info().build_tags);
    }

    #[test]
    fn merge_does_not_touch_input() {
        let original = base();
        let _ = merge(&original, &info());
        assert_eq!(original, base());
    }

    #[test]
    fn merge_keeps_choices_the_toolchain_did_not_report() {
        let mut snapshot = base();
        snapshot.user.scheduler = Scheduler::Coroutines;
        let partial = ToolchainInfo {
            scheduler: None,
            ..info()
        };
        assert_eq!(merge(&snapshot, &partial).user.scheduler, Scheduler::Coroutines);
    }

    #[test]
    fn default_derivation_builds_go_target() {
        let mut merged = merge(&base(), &info());
        propagate_flags(&mut merged, &GoBuildTargetDerivation);

        let target = &merged.project.build_target;
        assert_eq!(target.os, "linux");
        assert_eq!(target.arch, "arm");
        assert_eq!(target.tags, vec!["cortexm"]);
        assert_eq!(target.gc, GarbageCollector::Conservative);
        assert_eq!(target.scheduler, Scheduler::Tasks);
    }

    struct TargetOnly;

    impl FlagDerivation for TargetOnly {
        fn derive(&self, snapshot: &mut ConfigurationSnapshot) {
            snapshot.project.build_target.os = snapshot.project.target_platform.clone();
        }
    }

    #[test]
    fn derivation_is_pluggable() {
        let mut snapshot = base();
        propagate_flags(&mut snapshot, &TargetOnly);
        assert_eq!(snapshot.project.build_target.os, "pca10056");
    }

    #[test]
    fn parse_failure_leaves_snapshot_unchanged() {
        let snapshot = base();
        let err = reconcile(&snapshot, "", &GoBuildTargetDerivation).unwrap_err();
        assert_eq!(err, ParseError::EmptyOutput);
        assert_eq!(snapshot, base());
    }

    #[test]
    fn detected_output_enables_module_scaffolding() {
        let mut snapshot = base();
        snapshot.user.gc = GarbageCollector::AutoDetect;

        let raw = "tinygo version 0.19.0 linux/amd64 GC: conservative";
        let next = reconcile(&snapshot, raw, &GoBuildTargetDerivation).unwrap();

        assert_eq!(next.user.sdk.version, ToolchainVersion::new(0, 19, 0));
        assert_eq!(next.user.gc, GarbageCollector::Conservative);
        assert!(supports_modules(next.user.sdk.version));
    }
}
