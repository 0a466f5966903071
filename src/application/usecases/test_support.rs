//! 유스케이스 테스트용 가짜 포트.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::application::config::Config;
use crate::application::ports::{ConfigRepository, IntrospectionRequest, Reporter, ToolchainProbe};
use crate::domain::error::ProcessError;
use crate::domain::settings::{ConfigurationSnapshot, Sdk};

pub const SDK_INFO_OUTPUT: &str = "\
tinygo version 0.19.0 linux/amd64 (using go version go1.16.5 and LLVM version 11.0.0)
LLVM triple:       thumbv7em-unknown-unknown-eabi
GOOS:              linux
GOARCH:            arm
build tags:        cortexm baremetal linux arm nrf52840 nrf pca10056 tinygo gc.conservative scheduler.tasks
garbage collector: conservative
scheduler:         tasks
";

pub fn snapshot_with_sdk() -> ConfigurationSnapshot {
    let mut snapshot = ConfigurationSnapshot::default();
    snapshot.user.sdk = Sdk::at("/opt/tinygo");
    snapshot.project.target_platform = "pca10056".into();
    snapshot
}

pub struct StaticConfigRepository;

impl ConfigRepository for StaticConfigRepository {
    fn load(&self) -> anyhow::Result<Config> {
        Ok(Config::default())
    }

    fn inspect_pretty_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(&Config::default())?)
    }
}

pub struct NullReporter;

impl Reporter for NullReporter {
    fn section(&self, _name: &str) {}
    fn kv(&self, _key: &str, _value: &str) {}
    fn status(&self, _scope: &str, _message: &str) {}
}

enum FakeResponse {
    Output(String),
    Timeout,
}

pub struct FakeProbe {
    response: FakeResponse,
    calls: AtomicUsize,
}

impl FakeProbe {
    pub fn output(text: &str) -> Self {
        Self {
            response: FakeResponse::Output(text.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn timeout() -> Self {
        Self {
            response: FakeResponse::Timeout,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ToolchainProbe for FakeProbe {
    async fn introspect(&self, request: &IntrospectionRequest) -> Result<String, ProcessError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            FakeResponse::Output(text) => Ok(text.clone()),
            FakeResponse::Timeout => Err(ProcessError::Timeout {
                program: "tinygo".to_string(),
                timeout_ms: request.timeout_ms,
            }),
        }
    }
}
