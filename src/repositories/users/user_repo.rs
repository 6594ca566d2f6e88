//! # 사용자 리포지토리 구현
//!
//! 디렉토리 사용자 엔트리의 데이터 액세스 계층입니다.
//! MongoDB를 주 저장소로 사용하고, Redis를 통한 조회 캐싱을 지원합니다.

use std::sync::Arc;
use mongodb::bson::doc;
use crate::{
    caching::redis::RedisClient,
    core::registry::Repository,
    db::Database,
    domain::entities::users::user::User,
};
use singleton_macro::repository;
use crate::errors::errors::AppError;

/// 사용자 엔트리 조회 리포지토리
///
/// 인증 필터의 신원 재검증 경로에서 요청마다 호출되므로
/// Redis 읽기 우선 캐시로 디렉토리 부하를 줄입니다.
///
/// ## 캐싱 전략
///
/// - **TTL**: 10분 (600초)
/// - **키 패턴**: `user:username:{username}`
/// - 캐시 조회 실패는 무시하고 MongoDB로 폴백합니다.
///
/// ## 사용 예제
///
/// ```rust,ignore
/// let repo = UserRepository::instance();
/// let user = repo.find_by_username("alice").await?;
/// ```
#[repository(name = "user", collection = "users")]
pub struct UserRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl UserRepository {
    /// 사용자명으로 사용자 엔트리 조회
    ///
    /// 사용자명은 디렉토리 전체에서 유니크하므로 최대 1개의 결과만 반환됩니다.
    /// 존재하지 않는 사용자명은 에러가 아닌 `Ok(None)`입니다.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        // 캐시에서 먼저 확인
        let cache_key = format!("user:username:{}", username);

        if let Ok(Some(cached)) = self.redis.get::<User>(&cache_key).await {
            return Ok(Some(cached));
        }

        // 디렉토리에서 조회
        let user = self.collection::<User>()
            .find_one(doc! { "username": username })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        // 캐시에 저장 (10분)
        if let Some(ref user) = user {
            let _ = self.redis
                .set_with_expiry(&cache_key, user, 600)
                .await;
        }

        Ok(user)
    }

    /// 활성 상태인 사용자 엔트리 수를 조회합니다.
    pub async fn count_active(&self) -> Result<u64, AppError> {
        self.collection::<User>()
            .count_documents(doc! { "is_active": true })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }
}
