//! # 활성 토큰 화이트리스트 리포지토리
//!
//! 발급 서브시스템이 Redis에 유지하는 활성 토큰 화이트리스트를 조회합니다.
//! 토큰은 발급 시 등록되고, 로그아웃이나 강제 철회 시 즉시 삭제됩니다.
//! 이 게이트웨이는 화이트리스트를 읽기만 하며, 등록과 삭제는
//! 발급 서브시스템의 책임입니다.

use std::sync::Arc;
use singleton_macro::repository;
use crate::caching::redis::RedisClient;
use crate::core::registry::Repository;
use crate::errors::errors::AppError;

/// 활성 토큰 화이트리스트 조회 Repository
///
/// 발급 서브시스템은 토큰 문자열 자체를 키로 등록합니다.
/// 덕분에 서명 검증 이전에도 철회 여부를 O(1)로 판정할 수 있습니다.
#[repository(name = "token", collection = "tokens")]
pub struct TokenRepository {
    redis: Arc<RedisClient>,
}

impl TokenRepository {
    /// 토큰이 화이트리스트에 등록되어 있는지 확인합니다.
    ///
    /// `Ok(false)`는 미등록(철회됨 또는 발급된 적 없음)을 의미합니다.
    /// Redis 조회 자체가 실패하면 `Err`를 반환하며, 이 경우의 처리는
    /// 호출자가 결정합니다. 인증 필터는 실패를 미등록과 동일하게
    /// 취급합니다(fail closed).
    pub async fn is_token_live(&self, access_token: &str) -> Result<bool, AppError> {
        self.redis
            .exists(access_token)
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))
    }
}
