//! tinygo-settings library root.
//! Clean Architecture + DDD 계층을 외부에 노출한다.

use anyhow::Result;

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interface;

use domain::error::ReconcileError;
use domain::reconcile::{GoBuildTargetDerivation, reconcile};
use domain::settings::ConfigurationSnapshot;
use interface::cli::AppComposition;

/// 설정 점검 JSON 출력용 함수.
pub fn inspect_config_pretty_json() -> Result<String> {
    let composition = AppComposition::load()?;
    Ok(composition.inspect_config_usecase().execute()?.json)
}

/// 저장소 없이 introspection 출력을 스냅샷에 반영한다(기본 파생 규칙).
pub fn reconcile_output(
    snapshot: &ConfigurationSnapshot,
    raw: &str,
) -> Result<ConfigurationSnapshot, ReconcileError> {
    Ok(reconcile(snapshot, raw, &GoBuildTargetDerivation)?)
}
