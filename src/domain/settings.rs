//! 사용자/프로젝트 설정 스냅샷 엔티티.
//!
//! 두 scope는 각각 독립적으로 직렬화/비교된다.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::ValidationError;
use crate::domain::version::ToolchainVersion;

/// TinyGo 메모리 관리 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GarbageCollector {
    #[default]
    AutoDetect,
    None,
    Leaking,
    Extalloc,
    Conservative,
    Precise,
}

impl GarbageCollector {
    pub const ALL: [GarbageCollector; 6] = [
        Self::AutoDetect,
        Self::None,
        Self::Leaking,
        Self::Extalloc,
        Self::Conservative,
        Self::Precise,
    ];

    /// `-gc` 인자값. AutoDetect는 툴체인에 넘기지 않는다.
    pub fn token(self) -> Option<&'static str> {
        match self {
            Self::AutoDetect => None,
            Self::None => Some("none"),
            Self::Leaking => Some("leaking"),
            Self::Extalloc => Some("extalloc"),
            Self::Conservative => Some("conservative"),
            Self::Precise => Some("precise"),
        }
    }

    pub fn from_token(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "auto" | "auto_detect" | "auto-detect" => Some(Self::AutoDetect),
            other => Self::ALL.into_iter().find(|gc| gc.token() == Some(other)),
        }
    }
}

/// TinyGo goroutine 스케줄러.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scheduler {
    #[default]
    AutoDetect,
    None,
    Coroutines,
    Tasks,
    Asyncify,
}

impl Scheduler {
    pub const ALL: [Scheduler; 5] = [
        Self::AutoDetect,
        Self::None,
        Self::Coroutines,
        Self::Tasks,
        Self::Asyncify,
    ];

    /// `-scheduler` 인자값. AutoDetect는 툴체인에 넘기지 않는다.
    pub fn token(self) -> Option<&'static str> {
        match self {
            Self::AutoDetect => None,
            Self::None => Some("none"),
            Self::Coroutines => Some("coroutines"),
            Self::Tasks => Some("tasks"),
            Self::Asyncify => Some("asyncify"),
        }
    }

    pub fn from_token(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "auto" | "auto_detect" | "auto-detect" => Some(Self::AutoDetect),
            other => Self::ALL.into_iter().find(|s| s.token() == Some(other)),
        }
    }
}

impl fmt::Display for GarbageCollector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token().unwrap_or("auto"))
    }
}

impl fmt::Display for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token().unwrap_or("auto"))
    }
}

impl FromStr for GarbageCollector {
    type Err = ValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::from_token(raw).ok_or_else(|| ValidationError::InvalidValue {
            field: "gc",
            value: raw.to_string(),
        })
    }
}

impl FromStr for Scheduler {
    type Err = ValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::from_token(raw).ok_or_else(|| ValidationError::InvalidValue {
            field: "scheduler",
            value: raw.to_string(),
        })
    }
}

/// 설치된 TinyGo SDK 참조.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Sdk {
    /// SDK 루트 디렉터리(`bin/tinygo`를 포함)
    pub root: Option<PathBuf>,
    /// 마지막으로 감지된 버전
    #[serde(default)]
    pub version: ToolchainVersion,
}

impl Sdk {
    /// "SDK 미설정" sentinel.
    pub fn none() -> Self {
        Self {
            root: None,
            version: ToolchainVersion::UNKNOWN,
        }
    }

    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            version: ToolchainVersion::UNKNOWN,
        }
    }

    /// 루트 경로가 지정되어 있는지 여부. 버전만 남은 값은 미설정이다.
    pub fn is_set(&self) -> bool {
        self.root
            .as_deref()
            .is_some_and(|root| !root.as_os_str().is_empty())
    }

    /// `<root>/bin/tinygo` 경로.
    pub fn executable(&self) -> Option<PathBuf> {
        let root = self.root.as_deref()?;
        Some(executable_in(root))
    }

    /// 실행 파일이 실제로 존재하는지 검사한다.
    pub fn is_valid(&self) -> bool {
        self.executable().is_some_and(|p| p.is_file())
    }
}

fn executable_in(root: &Path) -> PathBuf {
    let name = if cfg!(windows) { "tinygo.exe" } else { "tinygo" };
    root.join("bin").join(name)
}

/// 머신 로컬 설정(user scope).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserSettings {
    #[serde(default)]
    pub sdk: Sdk,
    #[serde(default)]
    pub gc: GarbageCollector,
    #[serde(default)]
    pub scheduler: Scheduler,
}

/// 프로젝트에 체크인되는 설정(project scope).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProjectSettings {
    /// `-target` 보드/플랫폼 이름
    #[serde(default)]
    pub target_platform: String,
    #[serde(default)]
    pub go_os: String,
    #[serde(default)]
    pub go_arch: String,
    #[serde(default)]
    pub go_tags: Vec<String>,
    #[serde(default)]
    pub cached_go_root: Option<PathBuf>,
    #[serde(default)]
    pub go_version: Option<String>,
    /// flag 전파 단계에서만 기록되는 파생 값
    #[serde(default)]
    pub build_target: GoBuildTarget,
}

/// Go 모듈 빌드에 전달되는 파생 빌드 설정.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GoBuildTarget {
    pub os: String,
    pub arch: String,
    pub tags: Vec<String>,
    pub gc: GarbageCollector,
    pub scheduler: Scheduler,
}

/// user + project scope 묶음.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConfigurationSnapshot {
    pub user: UserSettings,
    pub project: ProjectSettings,
}

impl ConfigurationSnapshot {
    pub fn new(user: UserSettings, project: ProjectSettings) -> Self {
        Self { user, project }
    }

    /// 공유되는 가변 하위 객체가 없는 독립 사본.
    pub fn deep_copy(&self) -> Self {
        Self {
            user: self.user.clone(),
            project: self.project.clone(),
        }
    }

    /// 기준 스냅샷과 값 비교. 어느 한 scope라도 다르면 true.
    pub fn modified(&self, baseline: &ConfigurationSnapshot) -> bool {
        self.user != baseline.user || self.project != baseline.project
    }

    /// 유효한 SDK 참조가 설정되어 있는지 여부.
    pub fn enabled(&self) -> bool {
        self.user.sdk.is_set()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> ConfigurationSnapshot {
        ConfigurationSnapshot::new(
            UserSettings {
                sdk: Sdk {
                    root: Some(PathBuf::from("/opt/tinygo")),
                    version: ToolchainVersion::new(0, 19, 0),
                },
                gc: GarbageCollector::Conservative,
                scheduler: Scheduler::Tasks,
            },
            ProjectSettings {
                target_platform: "arduino".into(),
                go_tags: vec!["avr".into(), "baremetal".into()],
                ..ProjectSettings::default()
            },
        )
    }

    #[test]
    fn deep_copy_is_equal_and_independent() {
        let original = configured();
        let mut copy = original.deep_copy();
        assert_eq!(copy, original);

        copy.project.go_tags.push("extra".into());
        copy.user.gc = GarbageCollector::Leaking;
        assert_eq!(original.project.go_tags, vec!["avr", "baremetal"]);
        assert_eq!(original.user.gc, GarbageCollector::Conservative);
    }

    #[test]
    fn modified_detects_either_scope() {
        let baseline = configured();
        assert!(!baseline.deep_copy().modified(&baseline));

        let mut user_changed = baseline.deep_copy();
        user_changed.user.scheduler = Scheduler::Coroutines;
        assert!(user_changed.modified(&baseline));

        let mut project_changed = baseline.deep_copy();
        project_changed.project.target_platform = "pico".into();
        assert!(project_changed.modified(&baseline));
    }

    #[test]
    fn enabled_requires_sdk_reference() {
        assert!(!ConfigurationSnapshot::default().enabled());
        assert!(configured().enabled());
    }

    #[test]
    fn version_without_root_is_not_enabled() {
        let mut snapshot = ConfigurationSnapshot::default();
        snapshot.user.sdk.version = ToolchainVersion::new(0, 19, 0);
        assert!(!snapshot.enabled());

        let from_file: UserSettings =
            serde_json::from_str(r#"{"sdk":{"root":null,"version":"0.19.0"}}"#).unwrap();
        assert!(!ConfigurationSnapshot::new(from_file, ProjectSettings::default()).enabled());

        snapshot.user.sdk.root = Some(PathBuf::new());
        assert!(!snapshot.enabled());
    }

    #[test]
    fn auto_detect_has_no_token() {
        assert_eq!(GarbageCollector::AutoDetect.token(), None);
        assert_eq!(Scheduler::AutoDetect.token(), None);
        assert_eq!(GarbageCollector::Precise.token(), Some("precise"));
    }

    #[test]
    fn parses_tokens_case_insensitively() {
        assert_eq!("Conservative".parse::<GarbageCollector>().unwrap(), GarbageCollector::Conservative);
        assert_eq!("auto".parse::<Scheduler>().unwrap(), Scheduler::AutoDetect);
        assert!(matches!(
            "bogus".parse::<GarbageCollector>(),
            Err(ValidationError::InvalidValue { field: "gc", .. })
        ));
    }

    #[test]
    fn sdk_executable_lives_under_bin() {
        let sdk = Sdk::at("/opt/tinygo");
        let exe = sdk.executable().unwrap();
        assert!(exe.starts_with("/opt/tinygo/bin"));
        assert!(Sdk::none().executable().is_none());
        assert!(!Sdk::none().is_valid());
    }

    #[test]
    fn scopes_serialize_independently() {
        let snapshot = configured();
        let user = serde_json::to_string(&snapshot.user).unwrap();
        let project = serde_json::to_string(&snapshot.project).unwrap();

        let user_back: UserSettings = serde_json::from_str(&user).unwrap();
        let project_back: ProjectSettings = serde_json::from_str(&project).unwrap();
        assert_eq!(ConfigurationSnapshot::new(user_back, project_back), snapshot);
    }
}
