//! JWT 인가 필터
//!
//! ActixWeb 요청 파이프라인의 모든 요청에 대해 JWT 토큰을 해석하고
//! 성공 시 신원 스냅샷을 요청 확장에 기록합니다.
//!
//! Spring Security의 `OncePerRequestFilter`를 계승한 설계로, 이 필터는
//! **요청을 거부하지 않습니다**. 판정 결과와 무관하게 요청은 항상 후속
//! 파이프라인으로 전달되며, 보호된 핸들러의 접근 제어는 신원 스냅샷의
//! 존재 여부를 확인하는 추출기([`crate::domain::models::auth::authenticated_user::AuthenticatedUser`])가
//! 담당합니다. 인증과 인가를 분리하는 이 구조 덕분에 공개 엔드포인트와
//! 보호 엔드포인트가 동일한 필터를 공유할 수 있습니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::middlewares::auth_inner::JwtAuthorizationService;

/// JWT 인가 필터 (파이프라인 장착부)
///
/// `App::wrap()`으로 전역 장착합니다. 요청당 상태를 갖지 않으므로
/// 워커 수만큼 복제되어도 동작이 동일합니다.
pub struct JwtAuthorizationFilter;

impl JwtAuthorizationFilter {
    /// 새로운 인가 필터를 생성합니다.
    pub fn new() -> Self {
        Self
    }
}

impl Default for JwtAuthorizationFilter {
    fn default() -> Self {
        Self::new()
    }
}

/// ActixWeb Transform trait 구현
impl<S, B> Transform<S, ServiceRequest> for JwtAuthorizationFilter
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    // 필터가 자체 응답을 만들지 않으므로 본문 타입은 그대로 통과합니다.
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = JwtAuthorizationService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthorizationService {
            service: Rc::new(service),
        }))
    }
}
