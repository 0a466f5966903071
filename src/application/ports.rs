//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use std::path::{Path, PathBuf};

use anyhow::Result;
use async_trait::async_trait;

use crate::application::config::Config;
use crate::domain::error::ProcessError;
use crate::domain::settings::{ConfigurationSnapshot, GarbageCollector, Scheduler, Sdk};

/// 앱 설정 로딩/점검을 담당하는 저장소 포트.
pub trait ConfigRepository: Send + Sync {
    fn load(&self) -> Result<Config>;
    fn inspect_pretty_json(&self) -> Result<String>;
}

/// user/project scope 설정 영속화 포트(last-write-wins).
pub trait SettingsStore: Send + Sync {
    fn load(&self) -> Result<ConfigurationSnapshot>;
    /// 두 scope를 함께 커밋한다. 같은 저장소를 읽는 쪽은 한쪽만 갱신된 상태를 보지 않는다.
    fn store(&self, snapshot: &ConfigurationSnapshot) -> Result<()>;
}

/// introspection 명령 실행에 필요한 입력.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntrospectionRequest {
    pub sdk: Sdk,
    pub target: String,
    pub gc: GarbageCollector,
    pub scheduler: Scheduler,
    pub timeout_ms: u64,
}

impl IntrospectionRequest {
    pub fn from_snapshot(snapshot: &ConfigurationSnapshot, timeout_ms: u64) -> Self {
        Self {
            sdk: snapshot.user.sdk.clone(),
            target: snapshot.project.target_platform.clone(),
            gc: snapshot.user.gc,
            scheduler: snapshot.user.scheduler,
            timeout_ms,
        }
    }
}

/// 툴체인 자기 기술(introspection) 명령 실행 포트.
/// 성공 시 캡처한 stdout 텍스트를 돌려준다.
#[async_trait]
pub trait ToolchainProbe: Send + Sync {
    async fn introspect(&self, request: &IntrospectionRequest) -> Result<String, ProcessError>;
}

/// module 스캐폴딩 결과.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScaffoldOutcome {
    Created(PathBuf),
    AlreadyExists(PathBuf),
}

/// Go module 파일 생성 포트.
pub trait ModuleScaffolder: Send + Sync {
    fn create_module(
        &self,
        dir: &Path,
        module_name: &str,
        go_version: Option<&str>,
    ) -> Result<ScaffoldOutcome>;
}

/// 사용자 확인 입력 포트.
pub trait UserConfirmer: Send + Sync {
    fn confirm(&self, message: &str) -> Result<bool>;
}

/// 콘솔/로그 출력 추상화 포트.
pub trait Reporter: Send + Sync {
    fn section(&self, name: &str);
    fn kv(&self, key: &str, value: &str);
    fn status(&self, scope: &str, message: &str);
}
