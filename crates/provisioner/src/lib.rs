//! mdsbom 데몬 프로비저닝
//!
//! # Module Structure
//!
//! - [`error`]: 도메인 에러 타입 (`ProvisionError`)
//! - [`artifact`]: CLI 다운로드 (`Fetcher` trait, `HttpFetcher`, `ArtifactLocator`)
//! - [`script`]: 프로비저닝 스크립트 구성 (`compose`, `ProvisionScript`, `Stage`, `Step`)
//! - [`executor`]: 스크립트 실행 및 결과 분류 (`ProcessRunner` trait, `HostRunner`, `ScriptExecutor`)
//! - [`action`]: 오케스트레이터 (`ProvisionAction`, `run_action`)
//!
//! # Architecture
//!
//! ```text
//! RunConfig ──┐
//!             ├──> compose ──> ProvisionScript ──> ScriptExecutor ──> ExecutionReport
//! Fetcher ────┘                                         │
//! (ArtifactLocator)                               ProcessRunner
//!                                                 (bash -c ...)
//! ```

pub mod action;
pub mod artifact;
pub mod error;
pub mod executor;
pub mod script;

// --- Public API Re-exports ---

// Orchestrator
pub use action::{ActionStatus, ProvisionAction, RunOptions, run_action};

// Artifact
pub use artifact::{ArtifactLocator, Fetcher, HttpFetcher, download_url};

// Error
pub use error::ProvisionError;

// Execution
pub use executor::{ExecutionReport, HostRunner, ProcessRunner, ScriptExecutor};

// Script
pub use script::{ProvisionScript, Stage, Step, compose};
