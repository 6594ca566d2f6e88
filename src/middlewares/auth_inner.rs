//! JwtAuthorizationFilter 판정 로직의 핵심적인 기능
//!
//! 요청 한 건에 대한 판정은 다음 순서로 진행됩니다:
//!
//! 1. 인증 제외 경로 확인 (로그인/재발급 경로는 토큰 해석 생략)
//! 2. Authorization 헤더에서 Bearer 토큰 추출
//! 3. 활성 토큰 화이트리스트 조회 (철회된 토큰 차단)
//! 4. 토큰 디코딩 및 서명/만료 검증
//! 5. 토큰 타입 확인 (AUTH 타입만 인증 수단으로 인정)
//! 6. 기존 보안 컨텍스트 확인 (업스트림 필터 결과 존중)
//! 7. 디렉토리에서 신원 스냅샷 조립
//! 8. 토큰-신원 일치 재검증 후 보안 컨텍스트 기록
//!
//! 어느 단계에서 실패하든 요청은 계속 전달됩니다. 실패의 유일한 흔적은
//! 기록되지 않은 보안 컨텍스트와 (만료의 경우) 만료 알림 속성입니다.

use std::future::Future;
use std::rc::Rc;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{Error, HttpMessage};
use futures_util::future::LocalBoxFuture;

use crate::config::SecurityUrlConfig;
use crate::domain::models::auth::auth_outcome::{AuthOutcome, ExpiredTokenNotice};
use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
use crate::domain::models::token::token::{TokenError, TokenType};
use crate::errors::errors::AppResult;
use crate::repositories::tokens::token_repository::TokenRepository;
use crate::services::auth::token_service::TokenService;
use crate::services::users::identity_service::IdentityService;

/// 실제 인가 판정을 수행하는 서비스
pub struct JwtAuthorizationService<S> {
    pub service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthorizationService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let outcome = authorize_request(&req).await;
            commit_outcome(&req, outcome);

            // 판정 결과와 무관하게 항상 후속 파이프라인으로 전달
            service.call(req).await
        })
    }
}

/// Authorization 헤더 값에서 Bearer 토큰을 추출합니다.
///
/// `Bearer ` 접두사(공백 포함, 대소문자 구분)가 없으면 토큰 없음으로 처리합니다.
pub(crate) fn extract_bearer_token(header: &str) -> Option<&str> {
    header.strip_prefix("Bearer ")
}

/// 요청 한 건에 대한 인가 판정을 수행합니다.
///
/// 싱글톤 리포지토리/서비스를 저장소 조회자로 묶어
/// [`evaluate_request`]에 위임합니다.
pub(crate) async fn authorize_request(req: &ServiceRequest) -> AuthOutcome {
    let token_repository = TokenRepository::instance();
    let identity_service = IdentityService::instance();

    evaluate_request(
        req,
        move |token| async move { token_repository.is_token_live(&token).await },
        move |subject| async move { identity_service.resolve(&subject).await },
    )
    .await
}

/// 인가 판정 시퀀스의 본체
///
/// 두 저장소 조회(화이트리스트, 신원)를 파라미터로 받으므로
/// 라이브 저장소 없이도 판정 순서를 단위 테스트할 수 있습니다.
/// 요청을 변경하지 않으며, 판정 결과만 반환합니다.
/// 보안 컨텍스트 기록은 [`commit_outcome`]이 담당합니다.
pub(crate) async fn evaluate_request<LiveFut, ResolveFut>(
    req: &ServiceRequest,
    check_token_live: impl FnOnce(String) -> LiveFut,
    resolve_subject: impl FnOnce(String) -> ResolveFut,
) -> AuthOutcome
where
    LiveFut: Future<Output = AppResult<bool>>,
    ResolveFut: Future<Output = AppResult<Option<AuthenticatedUser>>>,
{
    // 1. 인증 제외 경로는 토큰 해석 자체를 생략
    if SecurityUrlConfig::is_excluded(req.path()) {
        log::debug!("인증 제외 경로: {}", req.path());
        return AuthOutcome::Bypassed;
    }

    // 2. Bearer 토큰 추출
    let header_name = SecurityUrlConfig::token_header();
    let header_value = req
        .headers()
        .get(header_name.as_str())
        .and_then(|value| value.to_str().ok());

    let token = match header_value.and_then(extract_bearer_token) {
        Some(token) => token.to_owned(),
        None => {
            log::warn!("Bearer 토큰이 없어 익명 요청으로 처리합니다: {}", req.path());
            return AuthOutcome::Unauthenticated;
        }
    };

    // 3. 활성 토큰 화이트리스트 조회 (디코딩보다 먼저)
    let live = match check_token_live(token.clone()).await {
        Ok(live) => live,
        Err(e) => {
            // 화이트리스트 상태를 알 수 없으면 무효로 취급 (fail closed)
            log::error!("토큰 화이트리스트 조회 실패: {}", e);
            false
        }
    };

    if !live {
        log::debug!("화이트리스트에 등록되지 않은 토큰");
        return AuthOutcome::Unauthenticated;
    }

    // 4. 토큰 디코딩 및 검증
    let token_service = TokenService::instance();
    let claims = match token_service.decode_claims(&token) {
        Ok(claims) => claims,
        Err(rejection) => {
            log::warn!("토큰 검증 실패: {}", rejection);
            return AuthOutcome::TokenRejected(rejection);
        }
    };

    // 5. AUTH 타입 토큰만 인증 수단으로 인정
    if claims.token_type != TokenType::Auth {
        let rejection = TokenError::WrongType(format!("{:?}", claims.token_type));
        log::warn!("인증용이 아닌 토큰 제시: {}", rejection);
        return AuthOutcome::TokenRejected(rejection);
    }

    // 6. 업스트림에서 이미 확립된 컨텍스트는 재해석하지 않음
    let existing = req.extensions().get::<AuthenticatedUser>().cloned();
    if let Some(existing) = existing {
        log::debug!("보안 컨텍스트가 이미 존재함: {}", existing.username);
        return AuthOutcome::Authenticated(existing);
    }

    // 7. 디렉토리에서 신원 스냅샷 조립
    let identity = match resolve_subject(claims.sub.clone()).await {
        Ok(Some(identity)) => identity,
        Ok(None) => {
            log::debug!("신원을 확립할 수 없는 주체: {}", claims.sub);
            return AuthOutcome::Unauthenticated;
        }
        Err(e) => {
            log::error!("신원 조회 실패: {}", e);
            return AuthOutcome::Unauthenticated;
        }
    };

    // 8. 토큰과 현재 신원의 일치 재검증
    if !token_service.matches_identity(&token, &identity) {
        log::warn!("토큰이 현재 신원과 일치하지 않음: {}", claims.sub);
        return AuthOutcome::Unauthenticated;
    }

    AuthOutcome::Authenticated(identity)
}

/// 판정 결과를 요청 확장에 반영합니다.
///
/// 인증 성공 시에만 보안 컨텍스트를 기록하며, 이미 컨텍스트가 존재하는
/// 요청에서는 덮어쓰지 않습니다. 만료 거부는 만료 알림 속성을 남깁니다.
pub(crate) fn commit_outcome(req: &ServiceRequest, outcome: AuthOutcome) {
    match outcome {
        AuthOutcome::Authenticated(identity) => {
            let mut extensions = req.extensions_mut();
            if extensions.get::<AuthenticatedUser>().is_none() {
                log::debug!("보안 컨텍스트 기록: {}", identity.username);
                extensions.insert(identity);
            }
        }
        AuthOutcome::TokenRejected(rejection) => {
            if matches!(rejection, TokenError::Expired(_)) {
                req.extensions_mut()
                    .insert(ExpiredTokenNotice(rejection.to_string()));
            }
        }
        AuthOutcome::Bypassed | AuthOutcome::Unauthenticated => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use actix_web::test::TestRequest;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};

    use crate::config::JwtConfig;
    use crate::domain::models::token::token::TokenClaims;
    use crate::errors::errors::AppError;

    fn sample_identity() -> AuthenticatedUser {
        AuthenticatedUser {
            username: "alice".to_string(),
            roles: vec!["USER".to_string()],
            password_changed_at: None,
        }
    }

    fn issue_token(sub: &str, token_type: TokenType, iat: i64, exp: i64) -> String {
        let claims = TokenClaims {
            sub: sub.to_string(),
            token_type,
            iat,
            exp,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(JwtConfig::secret().as_ref()),
        )
        .unwrap()
    }

    fn valid_auth_token(sub: &str) -> String {
        let now = Utc::now().timestamp();
        issue_token(sub, TokenType::Auth, now, now + 3600)
    }

    fn request_with_bearer(token: &str) -> ServiceRequest {
        TestRequest::with_uri("/api/v1/me")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_srv_request()
    }

    #[actix_web::test]
    async fn test_excluded_path_skips_both_store_lookups() {
        let req = TestRequest::with_uri("/api/v1/auth/login")
            .insert_header(("Authorization", format!("Bearer {}", valid_auth_token("alice"))))
            .to_srv_request();
        let live_checked = Cell::new(false);
        let resolved = Cell::new(false);

        let outcome = evaluate_request(
            &req,
            |_| {
                live_checked.set(true);
                async { Ok(true) }
            },
            |_| {
                resolved.set(true);
                async { Ok(Some(sample_identity())) }
            },
        )
        .await;

        assert_eq!(outcome, AuthOutcome::Bypassed);
        assert!(!live_checked.get());
        assert!(!resolved.get());
        assert!(req.extensions().get::<AuthenticatedUser>().is_none());
    }

    #[actix_web::test]
    async fn test_unlisted_token_is_rejected_before_decoding() {
        // 서명 키로는 완벽히 검증되는 토큰이라도 화이트리스트에 없으면 무효
        let req = request_with_bearer(&valid_auth_token("alice"));
        let resolved = Cell::new(false);

        let outcome = evaluate_request(
            &req,
            |_| async { Ok(false) },
            |_| {
                resolved.set(true);
                async { Ok(Some(sample_identity())) }
            },
        )
        .await;

        assert_eq!(outcome, AuthOutcome::Unauthenticated);
        assert!(!resolved.get());
    }

    #[actix_web::test]
    async fn test_whitelist_store_error_fails_closed() {
        let req = request_with_bearer(&valid_auth_token("alice"));
        let resolved = Cell::new(false);

        let outcome = evaluate_request(
            &req,
            |_| async { Err(AppError::RedisError("store unreachable".to_string())) },
            |_| {
                resolved.set(true);
                async { Ok(Some(sample_identity())) }
            },
        )
        .await;

        assert_eq!(outcome, AuthOutcome::Unauthenticated);
        assert!(!resolved.get());
    }

    #[actix_web::test]
    async fn test_live_refresh_token_is_rejected_for_wrong_type() {
        let now = Utc::now().timestamp();
        let req = request_with_bearer(&issue_token("alice", TokenType::Refresh, now, now + 3600));

        let outcome = evaluate_request(
            &req,
            |_| async { Ok(true) },
            |_| async { Ok(Some(sample_identity())) },
        )
        .await;

        assert!(matches!(
            outcome,
            AuthOutcome::TokenRejected(TokenError::WrongType(_))
        ));
    }

    #[actix_web::test]
    async fn test_live_expired_token_surfaces_notice_after_commit() {
        let now = Utc::now().timestamp();
        let req = request_with_bearer(&issue_token("alice", TokenType::Auth, now - 7200, now - 3600));

        let outcome = evaluate_request(
            &req,
            |_| async { Ok(true) },
            |_| async { Ok(Some(sample_identity())) },
        )
        .await;

        assert!(matches!(
            outcome,
            AuthOutcome::TokenRejected(TokenError::Expired(_))
        ));

        commit_outcome(&req, outcome);

        let extensions = req.extensions();
        assert!(extensions.get::<AuthenticatedUser>().is_none());
        assert!(extensions.get::<ExpiredTokenNotice>().is_some());
    }

    #[actix_web::test]
    async fn test_stale_token_after_credential_change_stays_anonymous() {
        let now = Utc::now().timestamp();
        let req = request_with_bearer(&issue_token("alice", TokenType::Auth, now - 600, now + 3600));

        // 토큰 발급 이후에 자격증명이 변경된 신원
        let outcome = evaluate_request(
            &req,
            |_| async { Ok(true) },
            |_| async {
                Ok(Some(AuthenticatedUser {
                    username: "alice".to_string(),
                    roles: vec!["USER".to_string()],
                    password_changed_at: Some(now - 60),
                }))
            },
        )
        .await;

        assert_eq!(outcome, AuthOutcome::Unauthenticated);
    }

    #[actix_web::test]
    async fn test_live_admin_token_authenticates_with_roles() {
        let req = request_with_bearer(&valid_auth_token("alice"));

        let outcome = evaluate_request(
            &req,
            |_| async { Ok(true) },
            |subject| async move {
                assert_eq!(subject, "alice");
                Ok(Some(AuthenticatedUser {
                    username: "alice".to_string(),
                    roles: vec!["ADMIN".to_string()],
                    password_changed_at: None,
                }))
            },
        )
        .await;

        let identity = outcome.identity().cloned().expect("인증 성공이어야 함");
        assert_eq!(identity.username, "alice");
        assert!(identity.has_role("ADMIN"));

        commit_outcome(&req, outcome);

        let extensions = req.extensions();
        assert_eq!(
            extensions.get::<AuthenticatedUser>().map(|u| u.username.clone()),
            Some("alice".to_string())
        );
        assert!(extensions.get::<ExpiredTokenNotice>().is_none());
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(extract_bearer_token("bearer abc.def.ghi"), None);
        assert_eq!(extract_bearer_token("Basic dXNlcjpwYXNz"), None);
        assert_eq!(extract_bearer_token("Bearer"), None);
        assert_eq!(extract_bearer_token(""), None);
    }

    #[test]
    fn test_commit_authenticated_writes_context() {
        let req = TestRequest::default().to_srv_request();

        commit_outcome(&req, AuthOutcome::Authenticated(sample_identity()));

        let committed = req.extensions().get::<AuthenticatedUser>().cloned();
        assert_eq!(committed.unwrap().username, "alice");
    }

    #[test]
    fn test_commit_does_not_overwrite_existing_context() {
        let req = TestRequest::default().to_srv_request();
        req.extensions_mut().insert(AuthenticatedUser {
            username: "upstream".to_string(),
            roles: vec![],
            password_changed_at: None,
        });

        commit_outcome(&req, AuthOutcome::Authenticated(sample_identity()));

        let committed = req.extensions().get::<AuthenticatedUser>().cloned();
        assert_eq!(committed.unwrap().username, "upstream");
    }

    #[test]
    fn test_commit_expired_rejection_sets_notice() {
        let req = TestRequest::default().to_srv_request();
        let rejection = TokenError::Expired("ExpiredSignature".to_string());
        let expected_message = rejection.to_string();

        commit_outcome(&req, AuthOutcome::TokenRejected(rejection));

        let extensions = req.extensions();
        assert!(extensions.get::<AuthenticatedUser>().is_none());
        assert_eq!(
            extensions.get::<ExpiredTokenNotice>().map(|n| n.0.clone()),
            Some(expected_message)
        );
    }

    #[test]
    fn test_commit_other_rejections_leave_no_trace() {
        let req = TestRequest::default().to_srv_request();

        commit_outcome(&req, AuthOutcome::TokenRejected(TokenError::BadSignature));

        let extensions = req.extensions();
        assert!(extensions.get::<AuthenticatedUser>().is_none());
        assert!(extensions.get::<ExpiredTokenNotice>().is_none());
    }

    #[test]
    fn test_commit_anonymous_outcomes_leave_extensions_untouched() {
        let req = TestRequest::default().to_srv_request();

        commit_outcome(&req, AuthOutcome::Bypassed);
        commit_outcome(&req, AuthOutcome::Unauthenticated);

        assert!(req.extensions().get::<AuthenticatedUser>().is_none());
    }
}
