//! `tinygo-settings` 바이너리 진입점.

use std::process::ExitCode;

use anyhow::Result;
use tinygo_settings::infrastructure::adapters::AutoConfirmer;
use tinygo_settings::interface::cli::{AppComposition, Cli, CliAction};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let action = match Cli::parse_action() {
        Ok(action) => action,
        Err(msg) => {
            eprintln!("error: {msg}");
            return ExitCode::from(2);
        }
    };

    match run(action).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(action: CliAction) -> Result<ExitCode> {
    let composition = match &action {
        CliAction::Detect { assume_yes: true } => {
            AppComposition::with_confirmer(Box::new(AutoConfirmer))?
        }
        _ => AppComposition::load()?,
    };

    match action {
        CliAction::InspectConfig => {
            let report = composition.inspect_config_usecase().execute()?;
            println!("{}", report.json);
            for warning in &report.warnings {
                eprintln!("warning: {warning}");
            }
        }
        CliAction::Show => {
            println!("{}", composition.show_settings_usecase().execute_pretty_json()?);
        }
        CliAction::Detect { .. } => {
            composition.detect_usecase().execute().await?;
        }
        CliAction::Set(patch) => {
            composition.edit_settings_usecase().execute(patch)?;
        }
        CliAction::Gate(required) => {
            let decision = composition.gate_usecase().execute(required)?;
            if !decision.allowed {
                eprintln!(
                    "TinyGo {} does not satisfy required version {}",
                    decision.detected, decision.required
                );
                return Ok(ExitCode::FAILURE);
            }
            println!("TinyGo {} >= {}", decision.detected, decision.required);
        }
        CliAction::Args(run) => {
            println!("{}", composition.prepare_run_usecase().execute(&run)?);
        }
        CliAction::Init { dir, name } => {
            composition
                .init_project_usecase()
                .execute(&dir, name.as_deref())
                .await?;
        }
    }
    Ok(ExitCode::SUCCESS)
}
