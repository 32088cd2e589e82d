//! mdsbom CLI 아티팩트 획득
//!
//! [`ArtifactLocator`]는 호스트 변형을 Mayhem 서비스의 다운로드 경로로 바꾸고
//! [`Fetcher`]에 전송을 위임합니다. 프로덕션은 [`HttpFetcher`], 테스트는 mock을 사용합니다.
//!
//! ```text
//! service_base_url + "/cli/" + HostVariant::path()
//!                  |
//!                  v
//!              Fetcher ──> <dest_dir>/<uuid> (0o755)
//!                  |
//!                  v
//!          ProvisionedArtifact
//! ```
//!
//! 한 번만 시도하며 캐시하지 않습니다. 실패는 그대로 호출자에게 전파됩니다.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use mdsbom_core::types::{HostVariant, ProvisionedArtifact};

use crate::error::ProvisionError;

/// 서비스에서 CLI 다운로드가 제공되는 경로 접두사
pub const CLI_ROUTE: &str = "cli";

/// 호스트 변형의 다운로드 URL을 만듭니다.
///
/// 기본 URL 끝의 `/`는 제거됩니다.
pub fn download_url(service_base_url: &str, variant: HostVariant) -> String {
    format!(
        "{}/{CLI_ROUTE}/{}",
        service_base_url.trim_end_matches('/'),
        variant.path()
    )
}

/// URL에서 바이너리를 받아 로컬 경로를 돌려주는 전송 기능
///
/// 구현은 받은 파일을 실행 가능하게 만들어야 합니다.
pub trait Fetcher: Send + Sync + 'static {
    /// `url`을 로컬 저장소로 내려받고 경로를 반환합니다.
    ///
    /// # Errors
    ///
    /// - `ProvisionError::Download`: 네트워크 에러 또는 2xx가 아닌 응답
    /// - `ProvisionError::Io`: 파일 쓰기 또는 권한 변경 실패
    fn fetch(&self, url: &str) -> impl Future<Output = Result<PathBuf, ProvisionError>> + Send;
}

/// `reqwest` 기반 HTTP 다운로더
///
/// 파일은 `dest_dir/<uuid v4>`에 저장되고 `0o755` 권한을 받습니다.
pub struct HttpFetcher {
    client: reqwest::Client,
    dest_dir: PathBuf,
}

impl HttpFetcher {
    /// 지정한 디렉토리에 저장하는 다운로더를 생성합니다.
    pub fn new(dest_dir: impl Into<PathBuf>) -> Self {
        Self {
            client: reqwest::Client::new(),
            dest_dir: dest_dir.into(),
        }
    }

    /// runner 임시 디렉토리(`RUNNER_TEMP`)에 저장합니다. 없으면 시스템 임시 디렉토리
    pub fn from_env() -> Self {
        let dest_dir = std::env::var_os("RUNNER_TEMP")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(std::env::temp_dir);
        Self::new(dest_dir)
    }

    /// 저장 디렉토리
    pub fn dest_dir(&self) -> &Path {
        &self.dest_dir
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<PathBuf, ProvisionError> {
        let download_err = |e: reqwest::Error| ProvisionError::Download {
            url: url.to_owned(),
            reason: e.to_string(),
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(download_err)?
            .error_for_status()
            .map_err(download_err)?;
        let body = response.bytes().await.map_err(download_err)?;

        tokio::fs::create_dir_all(&self.dest_dir)
            .await
            .map_err(|source| ProvisionError::Io {
                path: self.dest_dir.display().to_string(),
                source,
            })?;

        let dest = self.dest_dir.join(uuid::Uuid::new_v4().to_string());
        tokio::fs::write(&dest, &body)
            .await
            .map_err(|source| ProvisionError::Io {
                path: dest.display().to_string(),
                source,
            })?;
        make_executable(&dest).await?;

        debug!(url, path = %dest.display(), bytes = body.len(), "artifact downloaded");
        Ok(dest)
    }
}

#[cfg(unix)]
async fn make_executable(path: &Path) -> Result<(), ProvisionError> {
    use std::os::unix::fs::PermissionsExt;

    tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .await
        .map_err(|source| ProvisionError::Io {
            path: path.display().to_string(),
            source,
        })
}

#[cfg(not(unix))]
async fn make_executable(_path: &Path) -> Result<(), ProvisionError> {
    Ok(())
}

/// 호스트 변형에 맞는 mdsbom CLI를 찾아 내려받습니다.
pub struct ArtifactLocator<F: Fetcher> {
    fetcher: Arc<F>,
}

impl<F: Fetcher> ArtifactLocator<F> {
    /// 새 locator를 생성합니다.
    pub fn new(fetcher: Arc<F>) -> Self {
        Self { fetcher }
    }

    /// 아티팩트를 내려받습니다.
    ///
    /// 호출할 때마다 독립적으로 다운로드합니다.
    ///
    /// # Errors
    ///
    /// [`Fetcher::fetch`]의 에러를 그대로 반환합니다.
    pub async fn acquire(
        &self,
        service_base_url: &str,
        variant: HostVariant,
    ) -> Result<ProvisionedArtifact, ProvisionError> {
        let url = download_url(service_base_url, variant);
        info!(url = %url, variant = %variant, "downloading mdsbom cli");

        let path = self.fetcher.fetch(&url).await?;
        Ok(ProvisionedArtifact::new(path, url))
    }
}
