//! CLI 명령 파싱 모듈.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::application::usecases::edit_settings::SettingsPatch;
use crate::domain::run::{CommandKind, RunSettings};
use crate::domain::settings::{GarbageCollector, Scheduler};
use crate::domain::version::ToolchainVersion;

#[derive(Debug, Parser)]
#[command(name = "tinygo-settings")]
#[command(about = "Detect, reconcile and persist TinyGo toolchain settings")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show effective merged app config
    Config,
    /// Show stored user/project settings as JSON
    Show,
    /// Run toolchain introspection and reconcile settings
    Detect {
        /// Save detected settings without asking
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Edit stored settings
    Set {
        /// TinyGo SDK root directory
        #[arg(long)]
        sdk: Option<PathBuf>,
        /// Target board or platform
        #[arg(long)]
        target: Option<String>,
        /// Garbage collector (auto, none, leaking, extalloc, conservative, precise)
        #[arg(long)]
        gc: Option<GarbageCollector>,
        /// Scheduler (auto, none, coroutines, tasks, asyncify)
        #[arg(long)]
        scheduler: Option<Scheduler>,
    },
    /// Check that the configured toolchain is at least the given version
    Gate {
        #[arg(long)]
        min: ToolchainVersion,
    },
    /// Print the validated tinygo command line for a run configuration
    Args {
        /// flash, run, build or test
        kind: CommandKind,
        /// Main Go file or package directory
        main: PathBuf,
        /// Extra arguments passed before the main file
        #[arg(last = true)]
        user_args: Vec<String>,
    },
    /// Detect the toolchain and scaffold go.mod when supported
    Init {
        /// Project directory
        dir: PathBuf,
        /// Module name (default: directory name)
        #[arg(long)]
        name: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliAction {
    InspectConfig,
    Show,
    Detect { assume_yes: bool },
    Set(SettingsPatch),
    Gate(ToolchainVersion),
    Args(RunSettings),
    Init { dir: PathBuf, name: Option<String> },
}

impl Cli {
    pub fn parse_action() -> Result<CliAction, String> {
        Cli::parse().into_action()
    }

    fn into_action(self) -> Result<CliAction, String> {
        match self.command {
            Commands::Config => Ok(CliAction::InspectConfig),
            Commands::Show => Ok(CliAction::Show),
            Commands::Detect { yes } => Ok(CliAction::Detect { assume_yes: yes }),
            Commands::Set {
                sdk,
                target,
                gc,
                scheduler,
            } => {
                let patch = SettingsPatch {
                    sdk_root: sdk,
                    target,
                    gc,
                    scheduler,
                };
                if patch.is_empty() {
                    return Err(
                        "nothing to set; pass --sdk, --target, --gc or --scheduler".to_string()
                    );
                }
                Ok(CliAction::Set(patch))
            }
            Commands::Gate { min } => Ok(CliAction::Gate(min)),
            Commands::Args {
                kind,
                main,
                user_args,
            } => Ok(CliAction::Args(RunSettings::with_arguments(kind, main, user_args))),
            Commands::Init { dir, name } => Ok(CliAction::Init { dir, name }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(args: &[&str]) -> Result<CliAction, String> {
        let mut argv = vec!["tinygo-settings"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv)
            .map_err(|e| e.to_string())?
            .into_action()
    }

    #[test]
    fn set_builds_patch_from_flags() {
        let parsed = action(&["set", "--target", "pico", "--gc", "leaking"]).unwrap();
        assert_eq!(
            parsed,
            CliAction::Set(SettingsPatch {
                target: Some("pico".into()),
                gc: Some(GarbageCollector::Leaking),
                ..SettingsPatch::default()
            })
        );
    }

    #[test]
    fn empty_set_is_rejected() {
        assert!(action(&["set"]).unwrap_err().contains("nothing to set"));
    }

    #[test]
    fn unknown_gc_is_a_parse_error() {
        assert!(action(&["set", "--gc", "refcount"]).is_err());
    }

    #[test]
    fn gate_parses_version() {
        assert_eq!(
            action(&["gate", "--min", "0.14.0"]).unwrap(),
            CliAction::Gate(ToolchainVersion::new(0, 14, 0))
        );
    }

    #[test]
    fn args_collects_trailing_user_arguments() {
        let parsed = action(&["args", "flash", "main.go", "--", "-monitor", "-size", "short"]).unwrap();
        assert_eq!(
            parsed,
            CliAction::Args(RunSettings::new(
                CommandKind::Flash,
                "main.go",
                "-monitor -size short"
            ))
        );
    }

    #[test]
    fn args_keeps_each_shell_argument_intact() {
        let parsed = action(&["args", "build", "main.go", "--", "-ldflags", "-X main.v=1"]).unwrap();
        let CliAction::Args(run) = parsed else {
            panic!("expected args action");
        };
        assert_eq!(run.user_argument_list(), ["-ldflags", "-X main.v=1"]);
    }

    #[test]
    fn detect_yes_flag() {
        assert_eq!(
            action(&["detect", "--yes"]).unwrap(),
            CliAction::Detect { assume_yes: true }
        );
    }
}
