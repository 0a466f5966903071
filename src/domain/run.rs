//! 실행/플래시 구성 값 객체.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::ValidationError;
use crate::domain::settings::ConfigurationSnapshot;

/// TinyGo 하위 명령.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    #[default]
    Flash,
    Run,
    Build,
    Test,
}

impl CommandKind {
    pub fn verb(self) -> &'static str {
        match self {
            Self::Flash => "flash",
            Self::Run => "run",
            Self::Build => "build",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

impl FromStr for CommandKind {
    type Err = ValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "flash" => Ok(Self::Flash),
            "run" => Ok(Self::Run),
            "build" => Ok(Self::Build),
            "test" => Ok(Self::Test),
            _ => Err(ValidationError::InvalidValue {
                field: "command",
                value: raw.to_string(),
            }),
        }
    }
}

/// 실행 구성 하나가 소유하는 값 묶음. 편집 세션에는 사본을 넘긴다.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RunSettings {
    pub kind: CommandKind,
    pub main_file: PathBuf,
    /// main 경로 앞에 붙는 추가 인자
    #[serde(default)]
    pub user_arguments: Vec<String>,
}

/// 검증을 통과한 최종 실행 명령.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            if arg.contains(char::is_whitespace) {
                write!(f, " '{arg}'")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

impl RunSettings {
    /// 한 줄로 입력된 인자를 따옴표 규칙에 따라 나눠 담는다.
    pub fn new(kind: CommandKind, main_file: impl Into<PathBuf>, user_arguments: &str) -> Self {
        Self::with_arguments(kind, main_file, split_arguments(user_arguments))
    }

    /// 이미 나뉜 인자(예: 쉘이 넘긴 argv)를 그대로 담는다.
    pub fn with_arguments(
        kind: CommandKind,
        main_file: impl Into<PathBuf>,
        user_arguments: Vec<String>,
    ) -> Self {
        Self {
            kind,
            main_file: main_file.into(),
            user_arguments,
        }
    }

    pub fn user_argument_list(&self) -> &[String] {
        &self.user_arguments
    }

    /// 스냅샷 설정을 반영한 전체 인자 목록. main 경로가 마지막에 온다.
    pub fn arguments(&self, snapshot: &ConfigurationSnapshot) -> Vec<String> {
        let mut args = vec![self.kind.verb().to_string()];

        let target = snapshot.project.target_platform.trim();
        if !target.is_empty() {
            args.push("-target".to_string());
            args.push(target.to_string());
        }
        if let Some(gc) = snapshot.user.gc.token() {
            args.push("-gc".to_string());
            args.push(gc.to_string());
        }
        if let Some(scheduler) = snapshot.user.scheduler.token() {
            args.push("-scheduler".to_string());
            args.push(scheduler.to_string());
        }

        args.extend(self.user_arguments.iter().cloned());
        args.push(self.main_file.display().to_string());
        args
    }

    /// 실행 직전 검증. SDK와 main 경로를 확인한다.
    pub fn check(&self, snapshot: &ConfigurationSnapshot) -> Result<(), ValidationError> {
        let executable = snapshot
            .user
            .sdk
            .executable()
            .ok_or(ValidationError::SdkNotConfigured)?;
        if !executable.is_file() {
            return Err(ValidationError::SdkInvalid(executable));
        }

        if self.main_file.as_os_str().is_empty() {
            return Err(ValidationError::MainFileNotSet);
        }
        if !self.main_file.exists() {
            return Err(ValidationError::MainFileNotFound(self.main_file.clone()));
        }
        // 패키지 디렉터리는 모든 하위 명령이 받는다.
        if self.main_file.is_dir() {
            return Ok(());
        }
        if !is_go_file(&self.main_file) {
            return Err(ValidationError::NotGoFile(self.main_file.clone()));
        }

        Ok(())
    }

    /// 검증 후 실행 파일 + 인자를 묶어 반환한다.
    pub fn command_line(
        &self,
        snapshot: &ConfigurationSnapshot,
    ) -> Result<CommandLine, ValidationError> {
        self.check(snapshot)?;
        let program = snapshot
            .user
            .sdk
            .executable()
            .ok_or(ValidationError::SdkNotConfigured)?;
        Ok(CommandLine {
            program,
            args: self.arguments(snapshot),
        })
    }
}

fn is_go_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "go")
}

/// 공백으로 인자를 나눈다. 작은/큰따옴표 안의 공백은 인자에 포함된다.
fn split_arguments(raw: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut in_arg = false;
    let mut quote: Option<char> = None;

    for c in raw.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_arg = true;
            }
            None if c.is_whitespace() => {
                if in_arg {
                    out.push(std::mem::take(&mut current));
                    in_arg = false;
                }
            }
            None => {
                current.push(c);
                in_arg = true;
            }
        }
    }
    if in_arg {
        out.push(current);
    }
    out
}
