//! CI 플랫폼 추상화
//!
//! [`InputSource`]는 이름 있는 action 입력을 읽고, [`ActionHost`]는 여기에
//! 로그 출력과 job 실패 표시를 더합니다. 프로덕션 구현은 `mdsbom-action` 바이너리의
//! GitHub Actions 어댑터이며, 테스트는 메모리 기반 구현을 사용합니다.

use std::collections::HashMap;

/// 이름 있는 action 입력 읽기
pub trait InputSource {
    /// 입력의 원본 값. 설정되지 않았으면 `None`
    fn raw_input(&self, name: &str) -> Option<String>;

    /// 앞뒤 공백을 제거한 입력 값. 빈 값은 `None`으로 취급합니다.
    fn input(&self, name: &str) -> Option<String> {
        self.raw_input(name)
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
    }
}

/// action이 실행되는 CI 플랫폼
pub trait ActionHost: InputSource + Send + Sync {
    /// 정보 로그 한 줄을 job 로그에 출력합니다.
    fn info(&self, message: &str);

    /// job을 실패로 표시하고 실패 사유를 남깁니다.
    fn set_failed(&self, message: &str);

    /// 이후 로그에서 비밀 값을 가립니다.
    fn mask(&self, secret: &str);
}

impl InputSource for HashMap<String, String> {
    fn raw_input(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}
