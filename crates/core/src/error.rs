//! 에러 타입: 도메인별 에러 정의

/// mdsbom action 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum MdsbomError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 아티팩트 다운로드 및 호스트 프로비저닝 에러
    #[error("{0}")]
    Provision(String),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}
