//! 유스케이스 모음. 각 유스케이스는 필요한 포트만 참조로 받는다.

pub mod detect_toolchain;
pub mod edit_settings;
pub mod gate_feature;
pub mod init_project;
pub mod inspect_config;
pub mod prepare_run;
pub mod show_settings;

#[cfg(test)]
pub(crate) mod test_support;
