//! TinyGo CLI 실행기.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;

use crate::domain::error::ProcessError;

/// 명령을 실행해 stdout을 돌려준다.
/// 제한 시간을 넘기면 자식 프로세스는 drop 시점에 종료된다.
pub async fn run_toolchain_command(
    program: &Path,
    args: &[String],
    timeout_ms: u64,
) -> Result<String, ProcessError> {
    let program_name = program.display().to_string();
    tracing::debug!(program = %program_name, ?args, timeout_ms, "running toolchain command");

    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| ProcessError::Spawn {
            program: program_name.clone(),
            source,
        })?;

    let output = match tokio::time::timeout(
        Duration::from_millis(timeout_ms),
        child.wait_with_output(),
    )
    .await
    {
        Ok(Ok(output)) => output,
        Ok(Err(source)) => {
            return Err(ProcessError::Spawn {
                program: program_name,
                source,
            });
        }
        Err(_) => {
            tracing::warn!(program = %program_name, timeout_ms, "toolchain command timed out");
            return Err(ProcessError::Timeout {
                program: program_name,
                timeout_ms,
            });
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(ProcessError::NonZeroExit {
            program: program_name,
            status: output.status.to_string(),
            stderr: if stderr.is_empty() {
                "no stderr output".to_string()
            } else {
                stderr
            },
        });
    }

    String::from_utf8(output.stdout).map_err(|_| ProcessError::UnreadableOutput {
        program: program_name,
    })
}
