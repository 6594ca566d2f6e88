//! JWT 토큰 검증 서비스 구현
//!
//! 제시된 액세스 토큰의 디코딩, 서명/만료 검증, 그리고 현재 신원과의
//! 일치 여부 판정을 담당합니다. 토큰 발급은 별도 서브시스템의 책임이며
//! 이 서비스는 검증 전용입니다.

use jsonwebtoken::{decode, errors::ErrorKind, DecodingKey, Validation};
use singleton_macro::service;
use crate::config::JwtConfig;
use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
use crate::domain::models::token::token::{TokenClaims, TokenError, TokenType};

/// JWT 토큰 검증 서비스
///
/// HMAC-SHA256 서명을 사용하는 토큰을 검증합니다.
/// 서명 키는 발급 서브시스템과 공유하는 대칭 키입니다.
#[service(name = "token")]
pub struct TokenService {
    // 외부 의존성 없음
}

impl TokenService {
    /// 토큰을 디코딩하고 서명과 만료를 검증합니다.
    ///
    /// 검증 실패는 [`TokenError`]로 분류되어 반환됩니다.
    /// 만료 실패만 진단 메시지를 보존하는데, 인증 필터가 이를
    /// 요청 속성으로 후속 핸들러에 전달하기 때문입니다.
    pub fn decode_claims(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let secret = JwtConfig::secret();
        let decoding_key = DecodingKey::from_secret(secret.as_ref());
        let validation = Validation::default();

        decode::<TokenClaims>(token, &decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired(e.to_string()),
                ErrorKind::InvalidSignature => TokenError::BadSignature,
                _ => TokenError::Malformed(e.to_string()),
            })
    }

    /// 토큰의 용도 타입을 추출합니다.
    ///
    /// 타입 클레임도 서명된 페이로드의 일부이므로 전체 검증을 거칩니다.
    /// 만료되거나 위조된 토큰은 타입 확인 단계까지 오기 전에 거부됩니다.
    pub fn token_type(&self, token: &str) -> Result<TokenType, TokenError> {
        Ok(self.decode_claims(token)?.token_type)
    }

    /// 토큰이 현재 신원 스냅샷과 일치하는지 판정합니다.
    ///
    /// 다음 세 조건을 모두 만족해야 일치로 판정합니다:
    ///
    /// 1. 토큰이 구조적으로 유효하고 만료되지 않음
    /// 2. 토큰 주체(sub)가 스냅샷의 사용자명과 동일
    /// 3. 토큰 발급 시각(iat)이 마지막 자격증명 변경 이후
    ///
    /// 조건 3은 비밀번호 변경 시 기존 토큰을 전부 무효화하는 장치입니다.
    pub fn matches_identity(&self, token: &str, identity: &AuthenticatedUser) -> bool {
        match self.decode_claims(token) {
            Ok(claims) => {
                claims.sub == identity.username
                    && identity
                        .password_changed_at
                        .is_none_or(|changed_at| claims.iat >= changed_at)
            }
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn issue_token(sub: &str, token_type: TokenType, iat: i64, exp: i64, secret: &str) -> String {
        let claims = TokenClaims {
            sub: sub.to_string(),
            token_type,
            iat,
            exp,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_ref()),
        )
        .unwrap()
    }

    fn valid_token(sub: &str, token_type: TokenType) -> String {
        let now = Utc::now().timestamp();
        issue_token(sub, token_type, now, now + 3600, &JwtConfig::secret())
    }

    fn identity(username: &str, password_changed_at: Option<i64>) -> AuthenticatedUser {
        AuthenticatedUser {
            username: username.to_string(),
            roles: vec!["USER".to_string()],
            password_changed_at,
        }
    }

    #[test]
    fn test_decode_claims_accepts_valid_token() {
        let service = TokenService::instance();
        let token = valid_token("alice", TokenType::Auth);

        let claims = service.decode_claims(&token).unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.token_type, TokenType::Auth);
    }

    #[test]
    fn test_decode_claims_rejects_expired_token() {
        let service = TokenService::instance();
        let now = Utc::now().timestamp();
        // 검증기의 기본 leeway(60초)를 확실히 벗어나는 과거 시점
        let token = issue_token("alice", TokenType::Auth, now - 7200, now - 3600, &JwtConfig::secret());

        match service.decode_claims(&token) {
            Err(TokenError::Expired(message)) => assert!(!message.is_empty()),
            other => panic!("만료 판정이 아님: {:?}", other),
        }
    }

    #[test]
    fn test_decode_claims_rejects_forged_signature() {
        let service = TokenService::instance();
        let now = Utc::now().timestamp();
        let token = issue_token("alice", TokenType::Auth, now, now + 3600, "wrong-secret");

        assert_eq!(service.decode_claims(&token), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_decode_claims_rejects_garbage() {
        let service = TokenService::instance();

        assert!(matches!(
            service.decode_claims("not-a-token"),
            Err(TokenError::Malformed(_))
        ));
    }

    #[test]
    fn test_token_type_distinguishes_refresh_token() {
        let service = TokenService::instance();
        let token = valid_token("alice", TokenType::Refresh);

        assert_eq!(service.token_type(&token), Ok(TokenType::Refresh));
    }

    #[test]
    fn test_matches_identity_accepts_current_token() {
        let service = TokenService::instance();
        let token = valid_token("alice", TokenType::Auth);

        assert!(service.matches_identity(&token, &identity("alice", None)));
    }

    #[test]
    fn test_matches_identity_rejects_subject_mismatch() {
        let service = TokenService::instance();
        let token = valid_token("alice", TokenType::Auth);

        assert!(!service.matches_identity(&token, &identity("bob", None)));
    }

    #[test]
    fn test_matches_identity_rejects_token_issued_before_credential_change() {
        let service = TokenService::instance();
        let now = Utc::now().timestamp();
        let token = issue_token("alice", TokenType::Auth, now - 600, now + 3600, &JwtConfig::secret());

        // 자격증명이 토큰 발급 이후에 변경되었으므로 무효
        assert!(!service.matches_identity(&token, &identity("alice", Some(now - 60))));
        // 발급 이전 변경은 영향 없음
        assert!(service.matches_identity(&token, &identity("alice", Some(now - 3600))));
    }
}
