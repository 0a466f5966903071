//! 애플리케이션 포트를 실제 인프라 구현체로 연결하는 어댑터 계층.

mod config_repository;
mod module_scaffolder;
mod reporter;
mod settings_store;
mod toolchain_probe;
mod user_confirmer;

pub use config_repository::JsonConfigRepository;
pub use module_scaffolder::FsModuleScaffolder;
pub use reporter::ConsoleReporter;
pub use settings_store::{InMemorySettingsStore, JsonSettingsStore};
pub use toolchain_probe::TinyGoProbe;
pub use user_confirmer::{AutoConfirmer, StdinConfirmer};
