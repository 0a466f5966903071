//! 새 TinyGo 프로젝트 구성 유스케이스.
//! 설정 감지/저장 후 툴체인 버전이 허용하면 Go module 파일을 만든다.

use std::path::Path;

use anyhow::{Result, bail};

use crate::application::ports::{ModuleScaffolder, Reporter, ScaffoldOutcome};
use crate::application::usecases::detect_toolchain::{DetectToolchainUseCase, DetectionOutcome};
use crate::domain::version::MODULES_MIN_VERSION;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitOutcome {
    pub detection: DetectionOutcome,
    /// module 지원 버전 미만이면 None
    pub module: Option<ScaffoldOutcome>,
}

pub struct InitProjectUseCase<'a> {
    pub detect: DetectToolchainUseCase<'a>,
    pub scaffolder: &'a dyn ModuleScaffolder,
    pub reporter: &'a dyn Reporter,
}

impl<'a> InitProjectUseCase<'a> {
    pub async fn execute(&self, dir: &Path, module_name: Option<&str>) -> Result<InitOutcome> {
        let detection = self.detect.execute().await?;

        self.reporter.section("Init Project");
        if !detection.modules_supported {
            self.reporter.status(
                "module",
                &format!(
                    "skipped: TinyGo {} is older than {}",
                    detection.version, MODULES_MIN_VERSION
                ),
            );
            return Ok(InitOutcome {
                detection,
                module: None,
            });
        }

        let name = match module_name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => name.to_string(),
            None => default_module_name(dir)?,
        };
        let go_version = detection
            .snapshot
            .project
            .go_version
            .as_deref()
            .and_then(go_directive);

        let module = self
            .scaffolder
            .create_module(dir, &name, go_version.as_deref())?;
        match &module {
            ScaffoldOutcome::Created(path) => {
                self.reporter.status("module", &format!("created {}", path.display()));
            }
            ScaffoldOutcome::AlreadyExists(path) => {
                self.reporter.status("module", &format!("kept existing {}", path.display()));
            }
        }

        Ok(InitOutcome {
            detection,
            module: Some(module),
        })
    }
}

fn default_module_name(dir: &Path) -> Result<String> {
    let absolute = std::path::absolute(dir)?;
    let Some(name) = absolute.file_name().and_then(|n| n.to_str()) else {
        bail!("cannot derive a module name from {}", dir.display());
    };
    Ok(name.to_string())
}

/// `1.16.5` → `1.16` (go.mod `go` directive 형식).
fn go_directive(go_version: &str) -> Option<String> {
    let mut parts = go_version.trim().split('.');
    let major = parts.next().filter(|p| !p.is_empty())?;
    let minor = parts.next().filter(|p| !p.is_empty())?;
    Some(format!("{major}.{minor}"))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::application::ports::SettingsStore;
    use crate::application::usecases::test_support::{
        FakeProbe, NullReporter, StaticConfigRepository, SDK_INFO_OUTPUT, snapshot_with_sdk,
    };
    use crate::domain::reconcile::GoBuildTargetDerivation;
    use crate::infrastructure::adapters::{AutoConfirmer, InMemorySettingsStore};

    #[derive(Default)]
    struct RecordingScaffolder {
        calls: Mutex<Vec<(String, Option<String>)>>,
    }

    impl ModuleScaffolder for RecordingScaffolder {
        fn create_module(
            &self,
            dir: &Path,
            module_name: &str,
            go_version: Option<&str>,
        ) -> Result<ScaffoldOutcome> {
            self.calls
                .lock()
                .unwrap()
                .push((module_name.to_string(), go_version.map(String::from)));
            Ok(ScaffoldOutcome::Created(dir.join("go.mod")))
        }
    }

    fn usecase<'a>(
        store: &'a InMemorySettingsStore,
        probe: &'a FakeProbe,
        scaffolder: &'a RecordingScaffolder,
    ) -> InitProjectUseCase<'a> {
        InitProjectUseCase {
            detect: DetectToolchainUseCase {
                config_repo: &StaticConfigRepository,
                settings_store: store,
                probe,
                derivation: &GoBuildTargetDerivation,
                confirmer: &AutoConfirmer,
                reporter: &NullReporter,
            },
            scaffolder,
            reporter: &NullReporter,
        }
    }

    #[tokio::test]
    async fn module_is_created_for_supported_toolchain() {
        let store = InMemorySettingsStore::new(snapshot_with_sdk());
        let probe = FakeProbe::output(SDK_INFO_OUTPUT);
        let scaffolder = RecordingScaffolder::default();

        let outcome = usecase(&store, &probe, &scaffolder)
            .execute(Path::new("/work/blinky"), None)
            .await
            .unwrap();

        assert!(matches!(outcome.module, Some(ScaffoldOutcome::Created(_))));
        let calls = scaffolder.calls.lock().unwrap();
        assert_eq!(calls.as_slice(), &[("blinky".to_string(), Some("1.16".to_string()))]);
        assert_eq!(store.load().unwrap().user.sdk.version, outcome.detection.version);
    }

    #[tokio::test]
    async fn old_toolchain_skips_module() {
        let store = InMemorySettingsStore::new(snapshot_with_sdk());
        let probe = FakeProbe::output("tinygo version 0.13.1 linux/amd64\nGOOS: linux\n");
        let scaffolder = RecordingScaffolder::default();

        let outcome = usecase(&store, &probe, &scaffolder)
            .execute(Path::new("/work/blinky"), Some("example.com/blinky"))
            .await
            .unwrap();

        assert_eq!(outcome.module, None);
        assert!(scaffolder.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn go_directive_keeps_major_minor() {
        assert_eq!(go_directive("1.16.5").as_deref(), Some("1.16"));
        assert_eq!(go_directive("1.21").as_deref(), Some("1.21"));
        assert_eq!(go_directive("1"), None);
    }
}
