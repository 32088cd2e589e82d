//! action 오케스트레이터 -- 전체 실행 흐름 관리
//!
//! 한 번의 실행은 되돌아가지 않는 단일 경로입니다.
//!
//! ```text
//! ActionHost --> RunConfig::resolve --> ArtifactLocator::acquire --> compose
//!                                                                      |
//!                          ActionStatus <-- classify <-- ScriptExecutor::execute
//! ```
//!
//! [`run_action`]은 유일한 최상위 에러 경계입니다. 모든 에러를 로그로 남기고
//! job을 실패로 표시하며, 다시 던지지 않습니다.

use std::sync::Arc;

use tracing::{debug, error, info};

use mdsbom_core::config::RunConfig;
use mdsbom_core::host::ActionHost;
use mdsbom_core::types::HostVariant;

use crate::artifact::{ArtifactLocator, Fetcher};
use crate::error::ProvisionError;
use crate::executor::{ExecutionReport, ProcessRunner, ScriptExecutor};
use crate::script::compose;

/// [`run_action`] 실행 옵션
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// 실행 전에 [`RunConfig::validate`]를 적용합니다.
    pub strict: bool,
}

/// 최상위 경계가 만든 실행 상태
#[derive(Debug)]
pub enum ActionStatus {
    /// 스크립트가 끝났고 실패로 분류되지 않음 (분류되지 않은 종료 코드 포함)
    Completed(ExecutionReport),
    /// job이 실패로 표시됨
    Failed {
        /// job에 남긴 실패 메시지
        message: String,
        /// 실행 결과로 인한 실패라면 그 보고서
        report: Option<ExecutionReport>,
    },
}

impl ActionStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// 아티팩트 획득, 스크립트 구성, 실행, 분류를 묶은 action
pub struct ProvisionAction<F: Fetcher, R: ProcessRunner> {
    locator: ArtifactLocator<F>,
    executor: ScriptExecutor<R>,
    variant: HostVariant,
}

impl<F: Fetcher, R: ProcessRunner> ProvisionAction<F, R> {
    /// 기본 호스트 변형(Linux)으로 action을 생성합니다.
    pub fn new(fetcher: Arc<F>, runner: Arc<R>) -> Self {
        Self {
            locator: ArtifactLocator::new(fetcher),
            executor: ScriptExecutor::new(runner),
            variant: HostVariant::default(),
        }
    }

    /// 호스트 변형을 지정합니다.
    pub fn with_variant(mut self, variant: HostVariant) -> Self {
        self.variant = variant;
        self
    }

    /// 한 번의 프로비저닝 실행
    ///
    /// # Errors
    ///
    /// - 다운로드 실패: `Fetcher`의 에러 그대로 (스크립트는 실행되지 않음)
    /// - 실패로 분류된 결과: `ProvisionError::Outcome`
    pub async fn run(&self, config: &RunConfig) -> Result<ExecutionReport, ProvisionError> {
        debug!(
            workspace = config.workspace_id(),
            image = config.image_ref(),
            command = config.scan_command(),
            sarif_output = config.sarif_output_path(),
            fail_on_defects = config.fail_on_defects(),
            "resolved run configuration"
        );

        let artifact = self
            .locator
            .acquire(config.service_base_url(), self.variant)
            .await?;
        let script = compose(config, &artifact)?;
        let report = self.executor.execute(&script).await?;

        if let Some(outcome) = report.failure() {
            return Err(ProvisionError::Outcome(outcome));
        }
        Ok(report)
    }
}

/// action 진입점. 입력 해석부터 결과 보고까지 수행합니다.
///
/// 에러는 `mdsbom action failed with: <message>`로 로그에 남기고
/// `host.set_failed(<message>)`로 job을 실패 처리합니다.
pub async fn run_action<H, F, R>(
    host: &H,
    action: &ProvisionAction<F, R>,
    options: RunOptions,
) -> ActionStatus
where
    H: ActionHost,
    F: Fetcher,
    R: ProcessRunner,
{
    let config = RunConfig::resolve(host);
    if !config.auth_token().is_empty() {
        host.mask(config.auth_token());
    }

    match run_once(action, &config, options).await {
        Ok(report) => {
            info!(exit_code = ?report.exit_code, "mdsbom action completed");
            ActionStatus::Completed(report)
        }
        Err(e) => {
            let message = e.to_string();
            error!(error = %message, "mdsbom action failed");
            host.info(&format!("mdsbom action failed with: {message}"));
            host.set_failed(&message);
            ActionStatus::Failed {
                message,
                report: e.outcome().map(|o| ExecutionReport::from_exit_code(Some(o.exit_code()))),
            }
        }
    }
}

async fn run_once<F: Fetcher, R: ProcessRunner>(
    action: &ProvisionAction<F, R>,
    config: &RunConfig,
    options: RunOptions,
) -> Result<ExecutionReport, ProvisionError> {
    if options.strict {
        config.validate()?;
    }
    action.run(config).await
}
