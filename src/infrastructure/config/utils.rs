//! 설정 모듈 공용 유틸리티.

use std::env;
use std::path::{Path, PathBuf};

use crate::application::config::Config;

use super::loader::APP_DIR;

/// 로컬 명령이 실행 가능한지 탐지한다.
pub fn command_exists(command: &str) -> bool {
    // 절대/상대 경로가 주어지면 파일 존재만 검사한다.
    if command.trim().is_empty() {
        return false;
    }

    let command_path = Path::new(command);
    if command_path.components().count() > 1 {
        return command_path.is_file();
    }

    let Some(path_var) = env::var_os("PATH") else {
        return false;
    };

    #[cfg(windows)]
    {
        let suffixed = format!("{command}.exe");
        return env::split_paths(&path_var)
            .any(|dir| dir.join(command).is_file() || dir.join(&suffixed).is_file());
    }

    #[cfg(not(windows))]
    {
        env::split_paths(&path_var).any(|dir| dir.join(command).is_file())
    }
}

/// user scope 설정 파일 경로. 명시값이 없으면 OS 설정 디렉터리를 쓴다.
pub fn user_settings_path(config: &Config) -> PathBuf {
    if let Some(path) = config.user_settings_path() {
        return path;
    }
    match dirs::config_dir() {
        Some(base) => base.join(APP_DIR).join("user.json"),
        None => PathBuf::from(".tinygo").join("user.json"),
    }
}
