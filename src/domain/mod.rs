//! Domain layer
//! 버전 게이팅, 설정 스냅샷, introspection 해석/병합 규칙을 I/O 없이 표현한다.

pub mod error;
pub mod introspection;
pub mod reconcile;
pub mod run;
pub mod settings;
pub mod version;
