//! # 인증 필터 판정 결과
//!
//! 요청 하나에 대한 인증 필터의 최종 판정을 표현합니다.
//! 판정은 요청을 거부하지 않습니다. 어떤 값이든 요청은 후속 파이프라인으로
//! 계속 전달되고, 판정에 따라 보안 컨텍스트 기록 여부만 달라집니다.

use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
use crate::domain::models::token::TokenError;

/// 요청 한 건에 대한 인증 필터의 판정
#[derive(Debug, Clone, PartialEq)]
pub enum AuthOutcome {
    /// 인증 제외 경로 요청. 토큰 해석을 시도하지 않았습니다.
    Bypassed,
    /// 신원을 확립하지 못한 익명 요청 (토큰 없음, 화이트리스트 미등록,
    /// 주체 미존재, 신원 불일치 등)
    Unauthenticated,
    /// 화이트리스트에는 있으나 토큰 자체가 거부됨 (만료, 서명 오류 등)
    TokenRejected(TokenError),
    /// 신원 확립 성공
    Authenticated(AuthenticatedUser),
}

impl AuthOutcome {
    /// 신원 확립에 성공했는지 여부
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthOutcome::Authenticated(_))
    }

    /// 확립된 신원에 대한 참조 (실패 판정이면 None)
    pub fn identity(&self) -> Option<&AuthenticatedUser> {
        match self {
            AuthOutcome::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

/// 만료된 토큰으로 접근했음을 후속 핸들러에 알리는 요청 속성
///
/// 토큰 재발급 엔드포인트가 이 속성을 보고 "만료로 인한 401"과
/// "그 외 인증 실패"를 구분할 수 있습니다. 내부 값은 디코딩 오류 메시지입니다.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpiredTokenNotice(pub String);
