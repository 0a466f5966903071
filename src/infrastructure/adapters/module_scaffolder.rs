//! Go module 파일 생성 포트 구현 어댑터.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::application::ports::{ModuleScaffolder, ScaffoldOutcome};

/// 디렉터리에 `go.mod`를 만든다. 기존 파일은 덮어쓰지 않는다.
pub struct FsModuleScaffolder;

impl ModuleScaffolder for FsModuleScaffolder {
    fn create_module(
        &self,
        dir: &Path,
        module_name: &str,
        go_version: Option<&str>,
    ) -> Result<ScaffoldOutcome> {
        let module_name = module_name.trim();
        if module_name.is_empty() || module_name.contains(char::is_whitespace) {
            bail!("invalid module name '{module_name}'");
        }

        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create directory {}", dir.display()))?;
        let path = dir.join("go.mod");

        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                tracing::info!(path = %path.display(), "go.mod already exists");
                return Ok(ScaffoldOutcome::AlreadyExists(path));
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to create {}", path.display()));
            }
        };

        file.write_all(render_go_mod(module_name, go_version).as_bytes())
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), module = module_name, "go.mod created");
        Ok(ScaffoldOutcome::Created(path))
    }
}

fn render_go_mod(module_name: &str, go_version: Option<&str>) -> String {
    match go_version {
        Some(version) => format!("module {module_name}\n\ngo {version}\n"),
        None => format!("module {module_name}\n"),
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn go_mod_contains_module_and_go_directive() {
        let dir = TempDir::new().unwrap();
        let outcome = FsModuleScaffolder
            .create_module(dir.path(), "example.com/blinky", Some("1.21"))
            .unwrap();

        let path = dir.path().join("go.mod");
        assert_eq!(outcome, ScaffoldOutcome::Created(path.clone()));
        assert_eq!(
            fs::read_to_string(path).unwrap(),
            "module example.com/blinky\n\ngo 1.21\n"
        );
    }

    #[test]
    fn existing_go_mod_is_left_alone() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("go.mod");
        fs::write(&path, "module keep\n").unwrap();

        let outcome = FsModuleScaffolder
            .create_module(dir.path(), "replaced", None)
            .unwrap();

        assert_eq!(outcome, ScaffoldOutcome::AlreadyExists(path.clone()));
        assert_eq!(fs::read_to_string(path).unwrap(), "module keep\n");
    }

    #[test]
    fn blank_module_name_is_rejected() {
        let dir = TempDir::new().unwrap();
        assert!(FsModuleScaffolder.create_module(dir.path(), " ", None).is_err());
    }
}
