//! JWT 인증 토큰 클레임 구조체
//!
//! RFC 7519 JWT 표준 클레임 중 이 게이트웨이가 검사하는 최소 집합을 표현합니다.
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 토큰 용도 구분 태그
///
/// 발급 서브시스템은 API 접근용(AUTH)과 갱신용(REFRESH) 토큰을 구분하여
/// 발급합니다. 인증 필터는 AUTH 타입만 신원 확립에 사용하며,
/// REFRESH 토큰은 구조적으로 유효하더라도 인증 수단으로 인정하지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TokenType {
    /// API 접근용 액세스 토큰
    Auth,
    /// 토큰 갱신용 리프레시 토큰
    Refresh,
}

/// JWT 토큰의 클레임(Payload) 구조체
///
/// 개인정보 보호를 위해 최소한의 정보만 포함합니다.
///
/// ## 클레임 구성
///
/// - `sub`: 토큰의 주체 (사용자명)
/// - `token_type`: 토큰 용도 (AUTH / REFRESH)
/// - `iat`: 토큰 발급 시간 (Unix timestamp)
/// - `exp`: 토큰 만료 시간 (Unix timestamp)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// 토큰의 주체 (사용자명)
    pub sub: String,
    /// 토큰 용도
    pub token_type: TokenType,
    /// 토큰 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// 토큰 만료 시간 (Unix timestamp)
    pub exp: i64,
}

/// 토큰 디코딩/검증 실패 종류
///
/// 인증 필터는 실패 종류에 따라 다르게 반응합니다.
/// `Expired`만 요청 속성으로 표면화되고, 나머지는 조용히 미인증 처리됩니다.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// 구조적으로 해석할 수 없는 토큰
    #[error("유효하지 않은 토큰입니다: {0}")]
    Malformed(String),

    /// 서명 검증 실패
    #[error("토큰 서명이 일치하지 않습니다")]
    BadSignature,

    /// 만료된 토큰 (만료 진단 메시지 포함)
    #[error("토큰이 만료되었습니다: {0}")]
    Expired(String),

    /// 인증용(AUTH)이 아닌 토큰이 제시됨
    #[error("인증에 사용할 수 없는 토큰 타입입니다: {0}")]
    WrongType(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_type_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&TokenType::Auth).unwrap(), "\"AUTH\"");
        assert_eq!(serde_json::to_string(&TokenType::Refresh).unwrap(), "\"REFRESH\"");
    }

    #[test]
    fn test_token_type_deserializes_from_issuer_format() {
        let parsed: TokenType = serde_json::from_str("\"AUTH\"").unwrap();
        assert_eq!(parsed, TokenType::Auth);
    }

    #[test]
    fn test_expired_error_carries_diagnostic_message() {
        let error = TokenError::Expired("ExpiredSignature".to_string());
        assert!(error.to_string().contains("ExpiredSignature"));
    }
}
