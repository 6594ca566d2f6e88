//! # Authentication Configuration Module
//!
//! JWT 토큰 검증과 인증 필터 동작에 필요한 설정을 관리하는 모듈입니다.
//! Spring Security의 JWT 설정 및 `SecurityURLSettings`와 유사한 역할을 수행합니다.
//!
//! ## Spring Security와의 비교
//!
//! | Spring Security | 이 모듈 |
//! |-----------------|---------|
//! | `jwt.secret` | `JwtConfig::secret()` |
//! | `jwt.header` | `SecurityUrlConfig::token_header()` |
//! | `jwt.route.authentication.path` | `SecurityUrlConfig::authentication_path()` |
//! | `jwt.route.refresh.path` | `SecurityUrlConfig::refresh_path()` |
//!
//! ## 환경 변수 설정
//!
//! ```bash
//! export JWT_SECRET="your-super-secret-jwt-key"
//! export AUTH_TOKEN_HEADER="Authorization"
//! export AUTH_LOGIN_PATH="/api/v1/auth/login"
//! export AUTH_REFRESH_PATH="/api/v1/auth/refresh"
//! ```

use std::env;

/// JWT 토큰 검증 설정을 관리하는 구조체
///
/// HMAC-SHA256 서명 검증에 사용되는 비밀키와 만료 정책을 제공합니다.
/// 토큰 발급은 별도 서브시스템의 책임이므로, 이 게이트웨이는 동일한
/// 비밀키로 검증만 수행합니다.
pub struct JwtConfig;

impl JwtConfig {
    /// JWT 서명 검증에 사용할 비밀키를 반환합니다.
    ///
    /// 토큰 발급 서브시스템과 반드시 동일한 키를 공유해야 합니다.
    ///
    /// # 기본값
    ///
    /// 환경 변수가 설정되지 않은 경우 "your-secret-key"를 사용하지만,
    /// 이는 개발 환경에서만 안전하며 프로덕션에서는 경고 로그가 출력됩니다.
    ///
    /// # 환경 변수 설정
    ///
    /// ```bash
    /// export JWT_SECRET="your-super-secret-256-bit-key-generated-securely"
    /// ```
    pub fn secret() -> String {
        env::var("JWT_SECRET")
            .unwrap_or_else(|_| {
                log::warn!("JWT_SECRET not set, using default (not secure for production!)");
                "your-secret-key".to_string()
            })
    }

}

/// 인증 필터의 URL/헤더 설정을 관리하는 구조체
///
/// Spring Security 필터 체인의 `SecurityURLSettings`에 해당합니다.
/// 토큰을 담는 헤더 이름과, 필터를 통과하지 않고 우회하는
/// 인증/갱신 엔드포인트 경로를 정의합니다.
pub struct SecurityUrlConfig;

impl SecurityUrlConfig {
    /// 베어러 토큰을 담는 HTTP 헤더 이름을 반환합니다.
    ///
    /// # 기본값
    ///
    /// `Authorization`
    pub fn token_header() -> String {
        env::var("AUTH_TOKEN_HEADER")
            .unwrap_or_else(|_| "Authorization".to_string())
    }

    /// 로그인 엔드포인트 경로를 반환합니다.
    ///
    /// 이 경로로 들어오는 요청은 인증 필터를 우회합니다.
    /// 토큰이 아직 없는 상태에서 호출되는 엔드포인트이기 때문입니다.
    ///
    /// # 기본값
    ///
    /// `/api/v1/auth/login`
    pub fn authentication_path() -> String {
        env::var("AUTH_LOGIN_PATH")
            .unwrap_or_else(|_| "/api/v1/auth/login".to_string())
    }

    /// 토큰 갱신 엔드포인트 경로를 반환합니다.
    ///
    /// 만료된 액세스 토큰으로도 접근 가능해야 하므로 필터를 우회합니다.
    ///
    /// # 기본값
    ///
    /// `/api/v1/auth/refresh`
    pub fn refresh_path() -> String {
        env::var("AUTH_REFRESH_PATH")
            .unwrap_or_else(|_| "/api/v1/auth/refresh".to_string())
    }

    /// 주어진 요청 경로가 인증 필터 제외 대상인지 판정합니다.
    ///
    /// 로그인/갱신 경로와 대소문자 구분 없이 비교합니다. 부수 효과가 없는
    /// 순수 술어이며, `true`인 경우 필터는 나머지 모든 단계를 건너뜁니다.
    pub fn is_excluded(path: &str) -> bool {
        path_is_excluded(path, &Self::authentication_path(), &Self::refresh_path())
    }
}

/// 경로 제외 판정의 순수 구현
///
/// 설정 조회와 분리되어 있어 단위 테스트에서 직접 검증할 수 있습니다.
fn path_is_excluded(path: &str, authentication_path: &str, refresh_path: &str) -> bool {
    path.eq_ignore_ascii_case(authentication_path) || path.eq_ignore_ascii_case(refresh_path)
}
