//! mdsbom action 공통 타입
//!
//! - [`config`]: 실행 설정 (`RunConfig`)과 호스트 상수
//! - [`host`]: CI 플랫폼 추상화 (`InputSource`, `ActionHost`)
//! - [`types`]: 도메인 타입 (`HostVariant`, `ProvisionedArtifact`, `RunOutcome`)
//! - [`error`]: 에러 타입 (`MdsbomError`, `ConfigError`)

pub mod config;
pub mod error;
pub mod host;
pub mod types;

// --- 주요 타입 re-export ---

// 에러
pub use error::{ConfigError, MdsbomError};

// 설정
pub use config::{RunConfig, RunConfigBuilder};

// CI 플랫폼
pub use host::{ActionHost, InputSource};

// 도메인 타입
pub use types::{HostVariant, ProvisionedArtifact, RunOutcome};
