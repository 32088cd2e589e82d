//! 호스트 프로비저닝 스크립트 구성
//!
//! [`compose`]는 실행 설정과 내려받은 아티팩트로 고정된 순서의 단계 목록을 만듭니다.
//! 단계 순서는 하드 의존성 순서이며 설정 값에 따라 바뀌지 않습니다.
//!
//! ```text
//! InstallPackage -> GrantGroup -> RegisterRuntime -> ConfigureSync
//!   -> InstallInspector -> RestartEngine -> RestartDaemon -> Login
//! ```
//!
//! 서비스 재시작 단계는 실패 시 journal을 출력하고 다음 단계로 진행합니다.
//! 구성 자체는 부수 효과가 없으며, 같은 입력은 항상 같은 스크립트를 만듭니다.

pub mod step;

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use mdsbom_core::config::{
    DAEMON_BINARY_PATH, DAEMON_CONFIG_PATH, DAEMON_NAME, ENGINE_CONFIG_PATH, ENGINE_SERVICE,
    INSPECTOR_INSTALL_URL, LOW_LEVEL_RUNTIME, RunConfig,
};
use mdsbom_core::types::ProvisionedArtifact;

use crate::error::ProvisionError;

pub use step::{Arg, Invocation, Step};

/// 스크립트 첫 줄. 명령을 출력하고 첫 실패에서 종료합니다.
pub const SCRIPT_PREAMBLE: &str = "set -xe";

/// 프로비저닝 단계 (실행 순서)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    /// 패키지 설치
    InstallPackage,
    /// 현재 사용자를 데몬 그룹에 추가
    GrantGroup,
    /// 컨테이너 런타임 등록 및 기본 런타임 지정
    RegisterRuntime,
    /// 데몬 sync 설정 추가
    ConfigureSync,
    /// 컨테이너 검사 CLI 설치
    InstallInspector,
    /// 컨테이너 엔진 재시작
    RestartEngine,
    /// 스캐닝 데몬 재시작
    RestartDaemon,
    /// 서비스 인증
    Login,
}

impl Stage {
    /// 모든 단계 (실행 순서)
    pub const ALL: [Stage; 8] = [
        Stage::InstallPackage,
        Stage::GrantGroup,
        Stage::RegisterRuntime,
        Stage::ConfigureSync,
        Stage::InstallInspector,
        Stage::RestartEngine,
        Stage::RestartDaemon,
        Stage::Login,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InstallPackage => "install-package",
            Self::GrantGroup => "grant-group",
            Self::RegisterRuntime => "register-runtime",
            Self::ConfigureSync => "configure-sync",
            Self::InstallInspector => "install-inspector",
            Self::RestartEngine => "restart-engine",
            Self::RestartDaemon => "restart-daemon",
            Self::Login => "login",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 단계 이름이 붙은 스크립트 한 줄
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptStep {
    pub stage: Stage,
    pub step: Step,
}

/// 아직 실행되지 않은 프로비저닝 스크립트
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionScript {
    steps: Vec<ScriptStep>,
}

impl ProvisionScript {
    pub fn steps(&self) -> &[ScriptStep] {
        &self.steps
    }

    /// 단계 순서
    pub fn stages(&self) -> Vec<Stage> {
        self.steps.iter().map(|s| s.stage).collect()
    }

    /// 특정 단계를 찾습니다.
    pub fn step(&self, stage: Stage) -> Option<&Step> {
        self.steps
            .iter()
            .find(|s| s.stage == stage)
            .map(|s| &s.step)
    }

    /// `bash -c`로 실행할 스크립트 본문
    pub fn render(&self) -> String {
        let mut out = String::from(SCRIPT_PREAMBLE);
        out.push('\n');
        for script_step in &self.steps {
            out.push_str(&script_step.step.render());
            out.push('\n');
        }
        out
    }
}

/// `/etc/docker/daemon.json` 문서
#[derive(Serialize)]
struct EngineConfig<'a> {
    runtimes: BTreeMap<&'a str, RuntimeEntry<'a>>,
    #[serde(rename = "default-runtime")]
    default_runtime: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RuntimeEntry<'a> {
    path: &'a str,
    runtime_args: [&'a str; 3],
}

/// `/etc/mdsbom/config.toml`에 추가되는 문서
#[derive(Serialize)]
struct DaemonConfig<'a> {
    sync: SyncSection<'a>,
}

#[derive(Serialize)]
struct SyncSection<'a> {
    api_token: &'a str,
    upstream_url: &'a str,
    workspace: &'a str,
}

/// 런타임 등록 문서를 만듭니다.
fn engine_config_document() -> Result<String, ProvisionError> {
    let doc = EngineConfig {
        runtimes: BTreeMap::from([(
            DAEMON_NAME,
            RuntimeEntry {
                path: DAEMON_BINARY_PATH,
                runtime_args: [LOW_LEVEL_RUNTIME, "--", LOW_LEVEL_RUNTIME],
            },
        )]),
        default_runtime: DAEMON_NAME,
    };
    serde_json::to_string_pretty(&doc).map_err(|e| ProvisionError::Compose(e.to_string()))
}

/// sync 설정 블록을 만듭니다. 기존 파일 끝에 붙도록 빈 줄로 시작합니다.
fn sync_config_document(config: &RunConfig) -> Result<String, ProvisionError> {
    let doc = DaemonConfig {
        sync: SyncSection {
            api_token: config.auth_token(),
            upstream_url: config.service_base_url(),
            workspace: config.workspace_id(),
        },
    };
    let body = toml::to_string(&doc).map_err(|e| ProvisionError::Compose(e.to_string()))?;
    Ok(format!("\n{}", body.trim_end()))
}

/// `echo <contents> | sudo tee [-a] <path>`
fn write_file(path: &str, contents: String, append: bool, quiet: bool) -> Step {
    let mut tee = Invocation::new("tee").privileged();
    if append {
        tee = tee.arg("-a");
    }
    tee = tee.arg(path);
    if quiet {
        tee = tee.discard_stdout();
    }
    Step::Pipe(Invocation::new("echo").arg(contents), tee)
}

/// `sudo systemctl restart <svc> || sudo journalctl -xeu <svc>`
fn restart_with_diagnostics(service: &str) -> Step {
    Step::OrElse(
        Invocation::new("systemctl")
            .args(["restart", service])
            .privileged(),
        Invocation::new("journalctl")
            .args(["-xeu", service])
            .privileged(),
    )
}

/// 프로비저닝 스크립트를 구성합니다.
///
/// # Errors
///
/// 설정 문서 직렬화가 실패하면 `ProvisionError::Compose`
pub fn compose(
    config: &RunConfig,
    artifact: &ProvisionedArtifact,
) -> Result<ProvisionScript, ProvisionError> {
    let steps = vec![
        ScriptStep {
            stage: Stage::InstallPackage,
            step: Step::Run(
                Invocation::new("dpkg")
                    .arg("-i")
                    .arg(artifact.path().display().to_string())
                    .privileged(),
            ),
        },
        ScriptStep {
            stage: Stage::GrantGroup,
            step: Step::Run(
                Invocation::new("usermod")
                    .args(["-aG", DAEMON_NAME])
                    .env_arg("USER")
                    .privileged(),
            ),
        },
        ScriptStep {
            stage: Stage::RegisterRuntime,
            step: write_file(ENGINE_CONFIG_PATH, engine_config_document()?, false, true),
        },
        ScriptStep {
            stage: Stage::ConfigureSync,
            step: write_file(DAEMON_CONFIG_PATH, sync_config_document(config)?, true, false),
        },
        ScriptStep {
            stage: Stage::InstallInspector,
            step: Step::Pipe(
                Invocation::new("curl").args(["-sSfL", INSPECTOR_INSTALL_URL]),
                Invocation::new("sh").args(["-s", "--"]),
            ),
        },
        ScriptStep {
            stage: Stage::RestartEngine,
            step: restart_with_diagnostics(ENGINE_SERVICE),
        },
        ScriptStep {
            stage: Stage::RestartDaemon,
            step: restart_with_diagnostics(DAEMON_NAME),
        },
        ScriptStep {
            stage: Stage::Login,
            step: Step::Run(
                Invocation::new(DAEMON_NAME)
                    .arg("login")
                    .arg(config.service_base_url())
                    .arg(config.auth_token()),
            ),
        },
    ];

    Ok(ProvisionScript { steps })
}
