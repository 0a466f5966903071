//! 콘솔 리포터 포트 구현 어댑터.

use std::io::{self, IsTerminal};

use crate::application::ports::Reporter;

/// 콘솔 전용 리포터 어댑터. stdout이 TTY일 때만 상태를 색으로 구분한다.
pub struct ConsoleReporter {
    interactive: bool,
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self {
            interactive: io::stdout().is_terminal(),
        }
    }
}

impl Reporter for ConsoleReporter {
    fn section(&self, name: &str) {
        println!();
        println!("==================== {} ====================", name);
    }

    fn kv(&self, key: &str, value: &str) {
        println!("{:<12}: {}", key, value);
    }

    fn status(&self, scope: &str, message: &str) {
        if self.interactive {
            println!("[{:<12}] {}", scope, colorize_status(message));
        } else {
            println!("[{:<12}] {}", scope, message);
        }
    }
}

fn colorize_status(message: &str) -> String {
    if message.starts_with("saved") || message.starts_with("created") {
        format!("\x1b[32m{message}\x1b[0m")
    } else if message.starts_with("discarded") || message.starts_with("skipped") {
        format!("\x1b[33m{message}\x1b[0m")
    } else {
        message.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_is_green_and_other_messages_are_plain() {
        assert_eq!(colorize_status("saved"), "\x1b[32msaved\x1b[0m");
        assert_eq!(colorize_status("no changes"), "no changes");
    }
}
