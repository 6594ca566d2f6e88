//! # 인증된 사용자 신원 스냅샷
//!
//! 인증 필터가 확립하여 요청 확장(extensions)에 기록하는 신원 정보입니다.
//! Spring Security의 SecurityContextHolder에 저장되는 Authentication 객체와
//! 동일한 역할을 수행하지만, 스레드 로컬이 아닌 요청 단위로 격리됩니다.
//!
//! ## Spring Security와의 비교
//!
//! | Spring Security | 이 모듈 |
//! |---|---|
//! | `SecurityContextHolder.getContext()` | `req.extensions()` |
//! | `Authentication.getPrincipal()` | `AuthenticatedUser.username` |
//! | `Authentication.getAuthorities()` | `AuthenticatedUser.roles` |
//! | `@AuthenticationPrincipal` 주입 | `FromRequest` 추출기 |

use actix_web::{dev::Payload, Error, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};

use crate::errors::AppError;

/// 인증 필터가 확립한 사용자 신원 스냅샷
///
/// 디렉토리의 사용자 엔트리와 역할 그룹을 조합한 불변 뷰입니다.
/// 핸들러는 이 스냅샷만 보고 권한을 판단하며, 디렉토리를 다시 조회하지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthenticatedUser {
    /// 사용자명 (토큰의 sub 클레임과 일치)
    pub username: String,
    /// 소속된 역할 그룹 이름 목록
    pub roles: Vec<String>,
    /// 마지막 자격증명 변경 시각 (Unix timestamp, 변경 이력이 없으면 None)
    pub password_changed_at: Option<i64>,
}

impl AuthenticatedUser {
    /// 특정 역할을 보유하고 있는지 확인합니다.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// 주어진 역할 중 하나라도 보유하고 있는지 확인합니다.
    pub fn has_any_role(&self, roles: &[&str]) -> bool {
        roles.iter().any(|role| self.has_role(role))
    }

    /// 관리자 역할 보유 여부
    pub fn is_admin(&self) -> bool {
        self.has_role("ADMIN")
    }
}

/// 핸들러 파라미터로 인증된 사용자를 주입받기 위한 추출기
///
/// 인증 필터가 요청 확장에 기록한 스냅샷을 꺼내 전달합니다.
/// 필터가 신원을 확립하지 못한 요청에서는 401 응답으로 이어집니다.
///
/// ## 사용 예제
/// ```rust,ignore
/// #[actix_web::get("/me")]
/// async fn get_current_user(user: AuthenticatedUser) -> HttpResponse {
///     HttpResponse::Ok().json(user)
/// }
/// ```
impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user = req.extensions().get::<AuthenticatedUser>().cloned();

        ready(match user {
            Some(user) => Ok(user),
            None => Err(AppError::AuthenticationError(
                "인증이 필요한 요청입니다".to_string(),
            )
            .into()),
        })
    }
}

/// 인증 여부와 무관하게 동작해야 하는 핸들러를 위한 선택적 추출기
///
/// 신원이 확립된 요청에서는 `Some`, 익명 요청에서는 `None`이 주입됩니다.
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<AuthenticatedUser>);

impl FromRequest for OptionalUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user = req.extensions().get::<AuthenticatedUser>().cloned();
        ready(Ok(OptionalUser(user)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> AuthenticatedUser {
        AuthenticatedUser {
            username: "alice".to_string(),
            roles: vec!["USER".to_string(), "AUDITOR".to_string()],
            password_changed_at: None,
        }
    }

    #[test]
    fn test_has_role() {
        let user = sample_user();
        assert!(user.has_role("USER"));
        assert!(!user.has_role("ADMIN"));
    }

    #[test]
    fn test_has_any_role() {
        let user = sample_user();
        assert!(user.has_any_role(&["ADMIN", "AUDITOR"]));
        assert!(!user.has_any_role(&["ADMIN", "OPERATOR"]));
    }

    #[test]
    fn test_is_admin() {
        let mut user = sample_user();
        assert!(!user.is_admin());

        user.roles.push("ADMIN".to_string());
        assert!(user.is_admin());
    }

    #[actix_web::test]
    async fn test_from_request_without_context_fails() {
        let req = actix_web::test::TestRequest::default().to_http_request();
        let result = AuthenticatedUser::from_request(&req, &mut Payload::None).await;
        assert!(result.is_err());
    }

    #[actix_web::test]
    async fn test_from_request_reads_committed_context() {
        let req = actix_web::test::TestRequest::default().to_http_request();
        req.extensions_mut().insert(sample_user());

        let extracted = AuthenticatedUser::from_request(&req, &mut Payload::None)
            .await
            .unwrap();
        assert_eq!(extracted.username, "alice");
    }

    #[actix_web::test]
    async fn test_optional_user_is_none_for_anonymous_request() {
        let req = actix_web::test::TestRequest::default().to_http_request();
        let OptionalUser(user) = OptionalUser::from_request(&req, &mut Payload::None)
            .await
            .unwrap();
        assert!(user.is_none());
    }
}
