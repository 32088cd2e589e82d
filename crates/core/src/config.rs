//! 실행 설정: action 입력을 [`RunConfig`]로 해석
//!
//! 모든 필드는 입력이 없을 때의 기본값 규칙을 가지며, 해석은 실패하지 않습니다.
//! 토큰이나 workspace가 비어 있는 것과 같은 값 오류는 외부 도구가 판단하도록
//! 실행 시점까지 미룹니다. [`RunConfig::validate`]는 선택적으로 사용하는 사전 검증입니다.
//!
//! # 사용 예시
//!
//! ```
//! use std::collections::HashMap;
//! use mdsbom_core::config::RunConfig;
//!
//! let mut inputs = HashMap::new();
//! inputs.insert("workspace".to_owned(), "ACME".to_owned());
//!
//! let config = RunConfig::resolve(&inputs);
//! assert_eq!(config.workspace_id(), "acme");
//! assert_eq!(config.service_base_url(), "https://app.mayhem.security");
//! ```

use serde::Serialize;
use tracing::warn;

use crate::error::ConfigError;
use crate::host::InputSource;

/// 기본 Mayhem 서비스 URL
pub const DEFAULT_SERVICE_URL: &str = "https://app.mayhem.security";
/// 기본 스캔 도구
pub const DEFAULT_SCAN_COMMAND: &str = "grype";

/// 스캐닝 데몬 이름 (패키지, 그룹, 서비스, 런타임 이름 공통)
pub const DAEMON_NAME: &str = "mdsbom";
/// 설치된 데몬 바이너리 경로
pub const DAEMON_BINARY_PATH: &str = "/usr/bin/mdsbom";
/// 데몬 로컬 설정 파일
pub const DAEMON_CONFIG_PATH: &str = "/etc/mdsbom/config.toml";
/// 컨테이너 엔진 서비스 이름
pub const ENGINE_SERVICE: &str = "docker";
/// 컨테이너 엔진 데몬 설정 파일
pub const ENGINE_CONFIG_PATH: &str = "/etc/docker/daemon.json";
/// 데몬이 감싸는 저수준 런타임
pub const LOW_LEVEL_RUNTIME: &str = "runc";
/// 컨테이너 검사 CLI (docker scout) 설치 스크립트
pub const INSPECTOR_INSTALL_URL: &str =
    "https://raw.githubusercontent.com/docker/scout-cli/main/install.sh";

/// action 입력 이름
pub mod inputs {
    pub const MAYHEM_URL: &str = "mayhem-url";
    pub const MAYHEM_TOKEN: &str = "mayhem-token";
    pub const SARIF_OUTPUT: &str = "sarif-output";
    pub const FAIL_ON_DEFECTS: &str = "fail-on-defects";
    pub const WORKSPACE: &str = "workspace";
    pub const IMAGE: &str = "image";
    pub const COMMAND: &str = "command";
}

/// 한 번의 action 실행을 위한 설정
///
/// 생성 후 변경되지 않으며, 필드는 접근자로만 읽습니다.
/// `workspace_id`는 항상 소문자입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunConfig {
    service_base_url: String,
    auth_token: String,
    image_ref: String,
    sarif_output_path: String,
    fail_on_defects: bool,
    workspace_id: String,
    scan_command: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            service_base_url: DEFAULT_SERVICE_URL.to_owned(),
            auth_token: String::new(),
            image_ref: String::new(),
            sarif_output_path: String::new(),
            fail_on_defects: false,
            workspace_id: String::new(),
            scan_command: DEFAULT_SCAN_COMMAND.to_owned(),
        }
    }
}

impl RunConfig {
    /// action 입력에서 설정을 해석합니다.
    ///
    /// 없는 입력은 모두 문서화된 기본값이 됩니다.
    pub fn resolve(source: &impl InputSource) -> Self {
        let defaults = Self::default();
        Self {
            service_base_url: source
                .input(inputs::MAYHEM_URL)
                .unwrap_or(defaults.service_base_url),
            auth_token: source.input(inputs::MAYHEM_TOKEN).unwrap_or_default(),
            image_ref: source.input(inputs::IMAGE).unwrap_or_default(),
            sarif_output_path: source.input(inputs::SARIF_OUTPUT).unwrap_or_default(),
            fail_on_defects: boolean_input(source, inputs::FAIL_ON_DEFECTS, defaults.fail_on_defects),
            workspace_id: source
                .input(inputs::WORKSPACE)
                .map(|w| w.to_lowercase())
                .unwrap_or_default(),
            scan_command: source
                .input(inputs::COMMAND)
                .unwrap_or(defaults.scan_command),
        }
    }

    /// 필수 값의 사전 검증
    ///
    /// 기본 동작에서는 호출되지 않습니다. 토큰과 workspace가 비어 있으면 거부합니다.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth_token.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: inputs::MAYHEM_TOKEN.to_owned(),
                reason: "must not be empty".to_owned(),
            });
        }

        if self.workspace_id.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: inputs::WORKSPACE.to_owned(),
                reason: "must not be empty".to_owned(),
            });
        }

        if !self.service_base_url.starts_with("http://")
            && !self.service_base_url.starts_with("https://")
        {
            return Err(ConfigError::InvalidValue {
                field: inputs::MAYHEM_URL.to_owned(),
                reason: format!("'{}' is not an http(s) URL", self.service_base_url),
            });
        }

        Ok(())
    }

    /// 토큰을 가린 사본. 출력용입니다.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.auth_token.is_empty() {
            copy.auth_token = "***".to_owned();
        }
        copy
    }

    pub fn service_base_url(&self) -> &str {
        &self.service_base_url
    }

    pub fn auth_token(&self) -> &str {
        &self.auth_token
    }

    pub fn image_ref(&self) -> &str {
        &self.image_ref
    }

    /// SARIF 결과 파일 경로. 빈 문자열이면 요청되지 않음
    pub fn sarif_output_path(&self) -> &str {
        &self.sarif_output_path
    }

    pub fn fail_on_defects(&self) -> bool {
        self.fail_on_defects
    }

    pub fn workspace_id(&self) -> &str {
        &self.workspace_id
    }

    pub fn scan_command(&self) -> &str {
        &self.scan_command
    }
}

/// [`RunConfig`] 빌더
///
/// 입력 없이 설정을 구성할 때 사용합니다. workspace는 `build`에서 소문자로 정규화됩니다.
#[derive(Default)]
pub struct RunConfigBuilder {
    config: RunConfig,
}

impl RunConfigBuilder {
    /// 기본값을 가진 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn service_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.service_base_url = url.into();
        self
    }

    pub fn auth_token(mut self, token: impl Into<String>) -> Self {
        self.config.auth_token = token.into();
        self
    }

    pub fn image_ref(mut self, image: impl Into<String>) -> Self {
        self.config.image_ref = image.into();
        self
    }

    pub fn sarif_output_path(mut self, path: impl Into<String>) -> Self {
        self.config.sarif_output_path = path.into();
        self
    }

    pub fn fail_on_defects(mut self, fail: bool) -> Self {
        self.config.fail_on_defects = fail;
        self
    }

    pub fn workspace_id(mut self, workspace: impl Into<String>) -> Self {
        self.config.workspace_id = workspace.into();
        self
    }

    pub fn scan_command(mut self, command: impl Into<String>) -> Self {
        self.config.scan_command = command.into();
        self
    }

    /// 설정을 빌드합니다.
    pub fn build(mut self) -> RunConfig {
        self.config.workspace_id = self.config.workspace_id.to_lowercase();
        self.config
    }
}

/// YAML 1.2 core schema 불리언 입력
///
/// 인식할 수 없는 값은 경고 후 기본값을 사용합니다.
fn boolean_input(source: &impl InputSource, name: &str, default: bool) -> bool {
    let Some(value) = source.input(name) else {
        return default;
    };

    match value.as_str() {
        "true" | "True" | "TRUE" => true,
        "false" | "False" | "FALSE" => false,
        _ => {
            warn!(
                input = name,
                value = value.as_str(),
                "failed to parse boolean input, using default"
            );
            default
        }
    }
}
