//! `tinygo version` / `tinygo info` 출력 해석.
//!
//! 두 명령의 stdout을 이어 붙인 텍스트를 입력으로 받는다.
//! 실제 `tinygo info` 출력은 한 줄에 `key: value` 하나씩이지만,
//! 한 줄에 여러 flag가 섞인 요약 텍스트도 허용한다.
//! `build tags`, `cached GOROOT` 값만 줄 끝까지 읽는다.

use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::error::ParseError;
use crate::domain::settings::{GarbageCollector, Scheduler};
use crate::domain::version::ToolchainVersion;

static TINYGO_VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\btinygo\s+version\s+(\S+)").expect("TINYGO_VERSION_REGEX must compile")
});

// 줄 맨 앞의 `version X`만 인정한다. `go version`/`LLVM version`은 툴체인 버전이 아니다.
static BARE_VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t]*version[ \t]+(v?\d[0-9A-Za-z.+\-]*)")
        .expect("BARE_VERSION_REGEX must compile")
});

static GO_VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bgo\s+version\s+go(\d+\.\d+(?:\.\d+)?)").expect("GO_VERSION_REGEX must compile")
});

static FLAG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)\b(llvm triple|goos|goarch|build tags|garbage collector|gc|scheduler|cached goroot)[ \t]*:[ \t]*(\S*)",
    )
    .expect("FLAG_REGEX must compile")
});

/// introspection 명령이 보고한 툴체인 정보(ParsedInfo).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ToolchainInfo {
    pub version: ToolchainVersion,
    /// TinyGo가 사용하는 Go 버전(예: `1.16.5`)
    pub go_version: Option<String>,
    pub gc: Option<GarbageCollector>,
    pub scheduler: Option<Scheduler>,
    pub go_os: Option<String>,
    pub go_arch: Option<String>,
    pub build_tags: Vec<String>,
    pub cached_go_root: Option<PathBuf>,
    pub llvm_triple: Option<String>,
}

/// introspection 출력을 해석한다.
/// 버전 토큰과 최소 하나의 build flag가 필요하며, 일부만 채워진 결과는 반환하지 않는다.
pub fn extract_info(raw: &str) -> Result<ToolchainInfo, ParseError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(ParseError::EmptyOutput);
    }

    let version_token = TINYGO_VERSION_REGEX
        .captures(text)
        .or_else(|| BARE_VERSION_REGEX.captures(text))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or(ParseError::MissingVersion)?;

    let mut info = ToolchainInfo {
        version: version_token.parse()?,
        go_version: GO_VERSION_REGEX
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string()),
        ..ToolchainInfo::default()
    };

    let mut flag_count = 0;
    for caps in FLAG_REGEX.captures_iter(text) {
        let key = caps[1].to_ascii_lowercase();
        let value = match (key.as_str(), caps.get(2)) {
            ("build tags" | "cached goroot", Some(m)) => rest_of_line(text, m.start()),
            (_, Some(m)) => m.as_str(),
            (_, None) => "",
        };
        apply_flag(&mut info, &key, value)?;
        flag_count += 1;
    }

    if flag_count == 0 {
        return Err(ParseError::MissingFlags);
    }

    Ok(info)
}

fn rest_of_line(text: &str, start: usize) -> &str {
    let tail = &text[start..];
    let end = tail.find(['\r', '\n']).unwrap_or(tail.len());
    tail[..end].trim()
}

fn apply_flag(info: &mut ToolchainInfo, key: &str, value: &str) -> Result<(), ParseError> {
    let malformed = || ParseError::MalformedFlag {
        key: key.to_string(),
        value: value.to_string(),
    };

    let token = value.split_whitespace().next().ok_or_else(malformed)?;

    match key {
        "llvm triple" => info.llvm_triple = Some(token.to_string()),
        "goos" => info.go_os = Some(token.to_string()),
        "goarch" => info.go_arch = Some(token.to_string()),
        "build tags" => {
            info.build_tags = value.split_whitespace().map(ToString::to_string).collect();
        }
        "garbage collector" | "gc" => {
            let gc = GarbageCollector::from_token(token)
                .filter(|gc| *gc != GarbageCollector::AutoDetect)
                .ok_or_else(malformed)?;
            info.gc = Some(gc);
        }
        "scheduler" => {
            let scheduler = Scheduler::from_token(token)
                .filter(|s| *s != Scheduler::AutoDetect)
                .ok_or_else(malformed)?;
            info.scheduler = Some(scheduler);
        }
        "cached goroot" => info.cached_go_root = Some(PathBuf::from(value)),
        _ => return Err(malformed()),
    }

    Ok(())
}
