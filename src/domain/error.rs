//! 도메인 오류 분류.
//!
//! - `ParseError`: introspection 출력 해석 실패(스냅샷은 변경되지 않는다)
//! - `ProcessError`: 외부 명령 실행 실패(시작 실패/비정상 종료/타임아웃)
//! - `ValidationError`: 실행 직전 설정 검증 실패

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("introspection output is empty")]
    EmptyOutput,

    #[error("introspection output has no recognizable version token")]
    MissingVersion,

    #[error("malformed toolchain version '{0}'")]
    MalformedVersion(String),

    #[error("malformed build flag '{key}': '{value}'")]
    MalformedFlag { key: String, value: String },

    #[error("introspection output has no build flags")]
    MissingFlags,
}

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("toolchain is not configured")]
    NotConfigured,

    #[error("failed to start '{program}'")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' exited with {status}: {stderr}")]
    NonZeroExit {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("'{program}' timed out after {timeout_ms}ms")]
    Timeout { program: String, timeout_ms: u64 },

    #[error("'{program}' produced unreadable output")]
    UnreadableOutput { program: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("TinyGo SDK is not configured")]
    SdkNotConfigured,

    #[error("TinyGo executable not found at {0}")]
    SdkInvalid(PathBuf),

    #[error("main file is not set")]
    MainFileNotSet,

    #[error("main file does not exist: {0}")]
    MainFileNotFound(PathBuf),

    #[error("selected file is not a go file: {0}")]
    NotGoFile(PathBuf),

    #[error("invalid {field} value '{value}'")]
    InvalidValue { field: &'static str, value: String },
}

/// 감지/병합/실행 준비 경계에서 호출자에게 돌려주는 결과 오류.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Process(#[from] ProcessError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// 설정 저장소/앱 설정 접근 실패
    #[error("failed to access settings: {0:#}")]
    Settings(#[source] anyhow::Error),
}
