//! 툴체인 introspection 포트 구현 어댑터.

use async_trait::async_trait;

use crate::application::ports::{IntrospectionRequest, ToolchainProbe};
use crate::domain::error::ProcessError;
use crate::infrastructure::toolchain::{info_args, run_toolchain_command};

/// `tinygo version` + `tinygo info` 출력을 이어 붙여 돌려주는 어댑터.
pub struct TinyGoProbe;

#[async_trait]
impl ToolchainProbe for TinyGoProbe {
    async fn introspect(&self, request: &IntrospectionRequest) -> Result<String, ProcessError> {
        let Some(program) = request.sdk.executable() else {
            return Err(ProcessError::NotConfigured);
        };

        let version = run_toolchain_command(
            &program,
            &["version".to_string()],
            request.timeout_ms,
        )
        .await?;
        let info = run_toolchain_command(&program, &info_args(request), request.timeout_ms).await?;

        Ok(format!("{}\n{}", version.trim_end(), info))
    }
}
