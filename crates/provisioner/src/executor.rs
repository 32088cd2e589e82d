//! 프로비저닝 스크립트 실행 및 결과 분류
//!
//! [`ScriptExecutor`]는 렌더링된 스크립트를 `bash -c`로 한 번 실행하고 종료 코드만 수집합니다.
//! 출력은 파싱하지 않고 상속된 stdout/stderr로 job 로그에 그대로 흘려보냅니다.
//!
//! | 종료 코드 | 결과 |
//! |-----------|------|
//! | 0 | `Success` |
//! | 1 | `ConfigurationOrPermissionError` |
//! | 2 | `ServiceRunFailed` |
//! | 3 | `DefectsFound` |
//! | 그 외 / 시그널 | 분류 없음 (실패로 보고하지 않음) |

use std::future::Future;
use std::process::Stdio;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use mdsbom_core::types::RunOutcome;

use crate::error::ProvisionError;
use crate::script::ProvisionScript;

/// 스크립트를 실행하는 셸
pub const DEFAULT_SHELL: &str = "bash";

/// 호스트 프로세스 실행 기능
///
/// 0이 아닌 종료 코드는 에러가 아니라 반환 값입니다.
pub trait ProcessRunner: Send + Sync + 'static {
    /// 프로세스를 끝까지 실행하고 종료 코드를 반환합니다.
    ///
    /// 시그널로 종료된 경우 `None`을 반환합니다.
    ///
    /// # Errors
    ///
    /// 프로세스를 시작하지 못하면 `ProvisionError::Spawn`
    fn run(
        &self,
        program: &str,
        args: &[String],
    ) -> impl Future<Output = Result<Option<i32>, ProvisionError>> + Send;
}

/// `tokio::process` 기반 실행기
///
/// stdin은 닫고, stdout/stderr는 부모 프로세스에서 상속합니다.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostRunner;

impl ProcessRunner for HostRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<Option<i32>, ProvisionError> {
        let status = tokio::process::Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|source| ProvisionError::Spawn {
                program: program.to_owned(),
                source,
            })?;
        Ok(status.code())
    }
}

/// 한 번의 실행 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExecutionReport {
    /// 프로세스 종료 코드. 시그널 종료 시 `None`
    pub exit_code: Option<i32>,
    /// 분류된 결과. 계약 밖의 코드면 `None`
    pub outcome: Option<RunOutcome>,
}

impl ExecutionReport {
    /// 종료 코드로 보고서를 만듭니다.
    pub fn from_exit_code(exit_code: Option<i32>) -> Self {
        Self {
            exit_code,
            outcome: exit_code.and_then(RunOutcome::from_exit_code),
        }
    }

    /// 실패로 보고해야 하는 결과
    pub fn failure(&self) -> Option<RunOutcome> {
        self.outcome.filter(RunOutcome::is_failure)
    }
}

/// 프로비저닝 스크립트 실행기
pub struct ScriptExecutor<R: ProcessRunner> {
    runner: Arc<R>,
    shell: String,
}

impl<R: ProcessRunner> ScriptExecutor<R> {
    /// `bash`로 실행하는 실행기를 생성합니다.
    pub fn new(runner: Arc<R>) -> Self {
        Self {
            runner,
            shell: DEFAULT_SHELL.to_owned(),
        }
    }

    /// 스크립트를 해석할 셸을 바꿉니다.
    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }

    /// 스크립트를 실행하고 종료 코드를 분류합니다.
    ///
    /// 실패로 분류된 결과도 `Ok`로 반환합니다. 에러 변환은 호출자가 합니다.
    pub async fn execute(&self, script: &ProvisionScript) -> Result<ExecutionReport, ProvisionError> {
        let args = vec!["-c".to_owned(), script.render()];
        info!(shell = %self.shell, steps = script.steps().len(), "running provisioning script");

        let exit_code = self.runner.run(&self.shell, &args).await?;
        let report = ExecutionReport::from_exit_code(exit_code);

        match (report.exit_code, report.outcome) {
            (Some(code), Some(outcome)) => {
                info!(exit_code = code, outcome = ?outcome, "provisioning script finished");
            }
            (Some(code), None) => {
                warn!(
                    exit_code = code,
                    "provisioning script exited with an unclassified code, not reporting failure"
                );
            }
            (None, _) => {
                warn!("provisioning script terminated by signal, not reporting failure");
            }
        }

        Ok(report)
    }
}
