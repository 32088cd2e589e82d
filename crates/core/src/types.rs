//! 도메인 타입: 호스트 변형, 프로비저닝된 아티팩트, 실행 결과

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// mdsbom CLI를 받을 수 있는 호스트 운영체제
///
/// 각 변형은 Mayhem 클러스터의 `cli/` 경로 아래 정확히 하나의 다운로드 경로에 대응합니다.
/// 새 대상을 추가할 때는 변형과 [`path`](Self::path) 매핑만 추가하면 됩니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostVariant {
    /// Debian 패키지 (dpkg)
    #[default]
    Linux,
}

impl HostVariant {
    /// 지원되는 모든 호스트 변형
    pub const ALL: &'static [HostVariant] = &[HostVariant::Linux];

    /// 서비스의 `cli/` 경로 아래 다운로드 경로 조각
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Linux => "mdsbom/linux/latest/mdsbom.deb",
        }
    }
}

impl fmt::Display for HostVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => write!(f, "linux"),
        }
    }
}

/// 다운로드되어 실행 권한이 부여된 스캐너 패키지
///
/// 실행마다 한 번 생성되며 캐시되지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedArtifact {
    path: PathBuf,
    source_url: String,
}

impl ProvisionedArtifact {
    /// 로컬 경로와 원본 URL로 아티팩트를 생성합니다.
    pub fn new(path: impl Into<PathBuf>, source_url: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            source_url: source_url.into(),
        }
    }

    /// 로컬 파일 시스템 경로
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 다운로드한 URL
    pub fn source_url(&self) -> &str {
        &self.source_url
    }
}

/// 프로비저닝 스크립트 종료 코드를 분류한 실행 결과
///
/// 순서는 종료 코드 계약(`0`..=`3`)과 같습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// 스캔 성공
    Success,
    /// 이미지에 접근할 수 없거나 설정이 잘못되어 스캔을 실행하지 못함
    ConfigurationOrPermissionError,
    /// 서비스 측 Mayhem 실행이 성공적으로 끝나지 않음
    ServiceRunFailed,
    /// 스캔이 완료되었고 결함이 발견됨
    DefectsFound,
}

impl RunOutcome {
    /// 종료 코드를 결과로 변환합니다.
    ///
    /// `0`..=`3` 이외의 코드는 `None`입니다. 호출자는 이를 실패로 취급하지 않습니다.
    pub const fn from_exit_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Success),
            1 => Some(Self::ConfigurationOrPermissionError),
            2 => Some(Self::ServiceRunFailed),
            3 => Some(Self::DefectsFound),
            _ => None,
        }
    }

    /// 이 결과에 대응하는 종료 코드
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Success => 0,
            Self::ConfigurationOrPermissionError => 1,
            Self::ServiceRunFailed => 2,
            Self::DefectsFound => 3,
        }
    }

    /// action 실패로 보고해야 하는지 여부
    pub const fn is_failure(&self) -> bool {
        !matches!(self, Self::Success)
    }

    /// 사용자에게 보여줄 고정 메시지
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Success => "The Mayhem for Dynamic SBOM scan completed successfully.",
            Self::ConfigurationOrPermissionError => {
                "The Mayhem for Dynamic SBOM scan failed to run on your image. \
                 Check your configuration. For package visibility/permissions issues, see \
                 https://docs.github.com/en/packages/learn-github-packages/configuring-a-packages-access-control-and-visibility \
                 on how to set your package to 'Public'."
            }
            Self::ServiceRunFailed => {
                "The Mayhem for Dynamic SBOM scan detected the Mayhem run for your target \
                 was unsuccessful."
            }
            Self::DefectsFound => "The Mayhem for Dynamic SBOM scan found defects in your target.",
        }
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linux_variant_maps_to_deb_route() {
        assert_eq!(HostVariant::Linux.path(), "mdsbom/linux/latest/mdsbom.deb");
        assert_eq!(HostVariant::default(), HostVariant::Linux);
        assert_eq!(HostVariant::ALL, &[HostVariant::Linux]);
    }

    #[test]
    fn every_variant_has_distinct_path() {
        let mut paths: Vec<_> = HostVariant::ALL.iter().map(|v| v.path()).collect();
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), HostVariant::ALL.len());
    }

    #[test]
    fn exit_code_mapping_is_exact() {
        assert_eq!(RunOutcome::from_exit_code(0), Some(RunOutcome::Success));
        assert_eq!(
            RunOutcome::from_exit_code(1),
            Some(RunOutcome::ConfigurationOrPermissionError)
        );
        assert_eq!(
            RunOutcome::from_exit_code(2),
            Some(RunOutcome::ServiceRunFailed)
        );
        assert_eq!(RunOutcome::from_exit_code(3), Some(RunOutcome::DefectsFound));
    }

    #[test]
    fn exit_code_roundtrips_for_known_outcomes() {
        for code in 0..=3 {
            let outcome = RunOutcome::from_exit_code(code).expect("known code");
            assert_eq!(outcome.exit_code(), code);
        }
    }

    #[test]
    fn unknown_exit_codes_are_unclassified() {
        for code in [-1, 4, 42, 126, 127, 255] {
            assert_eq!(RunOutcome::from_exit_code(code), None, "code {code}");
        }
    }

    #[test]
    fn only_success_is_not_a_failure() {
        assert!(!RunOutcome::Success.is_failure());
        assert!(RunOutcome::ConfigurationOrPermissionError.is_failure());
        assert!(RunOutcome::ServiceRunFailed.is_failure());
        assert!(RunOutcome::DefectsFound.is_failure());
    }

    #[test]
    fn failure_messages_describe_the_cause() {
        let config = RunOutcome::ConfigurationOrPermissionError.message();
        assert!(config.contains("Check your configuration"));
        assert!(config.contains("visibility"));

        assert!(RunOutcome::ServiceRunFailed.message().contains("unsuccessful"));
        assert!(RunOutcome::DefectsFound.message().contains("found defects"));
    }

    #[test]
    fn outcome_ordering_follows_exit_codes() {
        assert!(RunOutcome::Success < RunOutcome::ConfigurationOrPermissionError);
        assert!(RunOutcome::ServiceRunFailed < RunOutcome::DefectsFound);
    }

    #[test]
    fn outcome_serializes_snake_case() {
        let json = serde_json::to_string(&RunOutcome::DefectsFound).unwrap();
        assert_eq!(json, "\"defects_found\"");
    }
}
