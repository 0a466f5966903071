//! 툴체인 버전 값 객체와 기능 게이팅 규칙.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::error::ParseError;

/// module 기반 프로젝트 생성을 지원하는 최소 TinyGo 버전.
pub const MODULES_MIN_VERSION: ToolchainVersion = ToolchainVersion::new(0, 14, 0);

/// (major, minor, patch) 삼중값. 필드 선언 순서대로 사전식 비교한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ToolchainVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl ToolchainVersion {
    /// 감지 실패/미설정 버전. 실제 임계값보다 항상 작다.
    pub const UNKNOWN: ToolchainVersion = ToolchainVersion::new(0, 0, 0);

    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    pub fn is_unknown(&self) -> bool {
        *self == Self::UNKNOWN
    }

    /// 파싱할 수 없는 입력은 `UNKNOWN`으로 정규화한다.
    pub fn parse_or_unknown(raw: &str) -> Self {
        raw.parse().unwrap_or(Self::UNKNOWN)
    }
}

/// `candidate >= threshold` 여부. major → minor → patch 순으로 비교한다.
pub fn is_at_least(candidate: ToolchainVersion, threshold: ToolchainVersion) -> bool {
    candidate >= threshold
}

/// module 기반 스캐폴딩 사용 가능 여부.
pub fn supports_modules(version: ToolchainVersion) -> bool {
    is_at_least(version, MODULES_MIN_VERSION)
}

impl fmt::Display for ToolchainVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for ToolchainVersion {
    type Err = ParseError;

    /// `0.19.0`, `v0.19`, `0.30.0-dev` 형태를 허용한다. 누락된 patch는 0이다.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let s = raw.trim().trim_start_matches('v');
        let core = s.split(['-', '+']).next().unwrap_or_default();
        if core.is_empty() {
            return Err(ParseError::MalformedVersion(raw.to_string()));
        }

        let mut parts = Vec::with_capacity(3);
        for part in core.split('.') {
            let Ok(v) = part.parse::<u32>() else {
                return Err(ParseError::MalformedVersion(raw.to_string()));
            };
            parts.push(v);
        }

        match parts.as_slice() {
            [major, minor] => Ok(Self::new(*major, *minor, 0)),
            [major, minor, patch] => Ok(Self::new(*major, *minor, *patch)),
            _ => Err(ParseError::MalformedVersion(raw.to_string())),
        }
    }
}

impl Serialize for ToolchainVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ToolchainVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(major: u32, minor: u32, patch: u32) -> ToolchainVersion {
        ToolchainVersion::new(major, minor, patch)
    }

    #[test]
    fn major_outranks_lower_fields() {
        assert!(is_at_least(v(1, 0, 0), v(0, 9, 9)));
    }

    #[test]
    fn equal_versions_pass_the_gate() {
        assert!(is_at_least(v(0, 14, 0), v(0, 14, 0)));
    }

    #[test]
    fn older_minor_fails_the_gate() {
        assert!(!is_at_least(v(0, 13, 9), v(0, 14, 0)));
    }

    #[test]
    fn patch_breaks_ties() {
        assert!(is_at_least(v(0, 14, 1), v(0, 14, 0)));
        assert!(!is_at_least(v(0, 14, 0), v(0, 14, 1)));
    }

    #[test]
    fn gate_agrees_with_tuple_order() {
        let samples = [v(0, 0, 0), v(0, 13, 9), v(0, 14, 0), v(0, 19, 0), v(1, 0, 0)];
        for a in samples {
            for b in samples {
                let tuple_order = (a.major, a.minor, a.patch) >= (b.major, b.minor, b.patch);
                assert_eq!(is_at_least(a, b), tuple_order, "{a} vs {b}");
            }
        }
    }

    #[test]
    fn unknown_is_below_module_threshold() {
        assert!(!supports_modules(ToolchainVersion::UNKNOWN));
        assert!(supports_modules(v(0, 19, 0)));
    }

    #[test]
    fn parses_common_forms() {
        assert_eq!("0.19.0".parse::<ToolchainVersion>().unwrap(), v(0, 19, 0));
        assert_eq!("v0.26".parse::<ToolchainVersion>().unwrap(), v(0, 26, 0));
        assert_eq!("0.30.0-dev".parse::<ToolchainVersion>().unwrap(), v(0, 30, 0));
    }

    #[test]
    fn garbage_normalizes_to_unknown() {
        assert!("nightly".parse::<ToolchainVersion>().is_err());
        assert_eq!(ToolchainVersion::parse_or_unknown("nightly"), ToolchainVersion::UNKNOWN);
        assert_eq!(ToolchainVersion::parse_or_unknown(""), ToolchainVersion::UNKNOWN);
    }

    #[test]
    fn serializes_as_dotted_string() {
        let json = serde_json::to_string(&v(0, 19, 0)).unwrap();
        assert_eq!(json, "\"0.19.0\"");
        let back: ToolchainVersion = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v(0, 19, 0));
    }
}
