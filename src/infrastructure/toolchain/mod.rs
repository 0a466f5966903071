//! TinyGo 툴체인 프로세스 연동.

mod command_runner;

pub use command_runner::run_toolchain_command;

use crate::application::ports::IntrospectionRequest;

/// `tinygo info` 인자. 빈 target과 자동 감지 GC/scheduler는 넘기지 않는다.
pub fn info_args(request: &IntrospectionRequest) -> Vec<String> {
    let mut args = vec!["info".to_string()];
    let target = request.target.trim();
    if !target.is_empty() {
        args.push("-target".to_string());
        args.push(target.to_string());
    }
    if let Some(gc) = request.gc.token() {
        args.push("-gc".to_string());
        args.push(gc.to_string());
    }
    if let Some(scheduler) = request.scheduler.token() {
        args.push("-scheduler".to_string());
        args.push(scheduler.to_string());
    }
    args
}
