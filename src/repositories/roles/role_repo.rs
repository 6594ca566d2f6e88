//! # 역할 리포지토리 구현
//!
//! 역할 그룹의 데이터 액세스 계층입니다.
//! 역할은 구성원 목록을 보유하는 그룹 형태로 저장되며,
//! 조회는 항상 구성원 기준 역방향으로 수행됩니다.

use std::sync::Arc;
use futures_util::TryStreamExt;
use mongodb::bson::doc;
use crate::{
    db::Database,
    domain::entities::roles::role::Role,
};
use singleton_macro::repository;
use crate::errors::errors::AppError;

/// 역할 그룹 조회 리포지토리
///
/// 신원 스냅샷 조립 시 사용자가 소속된 모든 역할 이름을 수집합니다.
/// 역할 데이터는 신원 확립 시점마다 새로 조회하며 별도 캐시를 두지 않습니다.
#[repository(name = "role", collection = "roles")]
pub struct RoleRepository {
    db: Arc<Database>,
}

impl RoleRepository {
    /// 주어진 사용자가 구성원으로 등록된 모든 역할의 이름을 조회합니다.
    ///
    /// 소속된 역할이 없으면 빈 벡터를 반환합니다. 역할 없는 사용자도
    /// 유효한 신원이며, 권한 판단은 핸들러 몫입니다.
    pub async fn find_names_by_member(&self, username: &str) -> Result<Vec<String>, AppError> {
        let mut cursor = self.collection::<Role>()
            .find(doc! { "members": username })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let mut names = Vec::new();
        while let Some(role) = cursor
            .try_next()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
        {
            names.push(role.name);
        }

        Ok(names)
    }
}
