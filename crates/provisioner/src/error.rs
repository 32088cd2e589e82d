//! 프로비저닝 에러 타입
//!
//! [`ProvisionError`]는 아티팩트 다운로드부터 결과 분류까지 한 번의 실행 중
//! 발생할 수 있는 모든 에러를 나타냅니다. `From<ProvisionError> for MdsbomError`
//! 구현을 통해 `?` 연산자로 상위 에러 타입으로 전파됩니다.
//!
//! # 에러 카테고리
//!
//! - **아티팩트 획득**: `Download`, `Io`
//! - **스크립트 구성**: `Compose`
//! - **스크립트 실행**: `Spawn`
//! - **사전 검증**: `Config`
//! - **실행 결과**: `Outcome`

use mdsbom_core::error::{ConfigError, MdsbomError};
use mdsbom_core::types::RunOutcome;

/// 프로비저닝 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    /// CLI 다운로드 실패 (네트워크, HTTP 상태)
    #[error("failed to download {url}: {reason}")]
    Download {
        /// 다운로드 URL
        url: String,
        /// 실패 사유
        reason: String,
    },

    /// 로컬 파일 I/O 에러
    #[error("io error: {path}: {source}")]
    Io {
        /// 관련 파일 경로
        path: String,
        /// 원본 I/O 에러
        source: std::io::Error,
    },

    /// 설정 문서 직렬화 실패
    #[error("failed to compose provisioning script: {0}")]
    Compose(String),

    /// 프로비저닝 프로세스 실행 실패
    #[error("failed to launch provisioning script with {program}: {source}")]
    Spawn {
        /// 실행 프로그램
        program: String,
        /// 원본 I/O 에러
        source: std::io::Error,
    },

    /// 사전 검증 실패
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// 실패로 분류된 실행 결과
    #[error("{0}")]
    Outcome(RunOutcome),
}

impl ProvisionError {
    /// 실패로 분류된 실행 결과. 다른 에러는 `None`
    pub fn outcome(&self) -> Option<RunOutcome> {
        match self {
            Self::Outcome(outcome) => Some(*outcome),
            _ => None,
        }
    }
}

impl From<ProvisionError> for MdsbomError {
    fn from(err: ProvisionError) -> Self {
        match err {
            ProvisionError::Config(config) => MdsbomError::Config(config),
            ProvisionError::Io { source, .. } => MdsbomError::Io(source),
            other => MdsbomError::Provision(other.to_string()),
        }
    }
}
