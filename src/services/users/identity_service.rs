//! 신원 스냅샷 조립 서비스 구현
//!
//! 토큰 주체(sub)를 디렉토리의 현재 상태와 대조하여
//! 인증 필터가 사용할 신원 스냅샷을 조립합니다.

use std::sync::Arc;
use singleton_macro::service;
use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
use crate::errors::errors::AppResult;
use crate::repositories::roles::role_repo::RoleRepository;
use crate::repositories::users::user_repo::UserRepository;

/// 신원 스냅샷 조립 서비스
///
/// 사용자 엔트리와 역할 그룹 두 저장소를 조합하는 유일한 지점입니다.
/// 토큰이 유효하더라도 디렉토리의 현재 상태가 우선합니다. 즉,
/// 삭제되거나 비활성화된 계정은 토큰과 무관하게 신원이 확립되지 않습니다.
#[service(name = "identity")]
pub struct IdentityService {
    /// 사용자 엔트리 조회 리포지토리 (싱글톤 주입)
    user_repo: Arc<UserRepository>,
    /// 역할 그룹 조회 리포지토리 (싱글톤 주입)
    role_repo: Arc<RoleRepository>,
}

impl IdentityService {
    /// 사용자명으로 신원 스냅샷을 조립합니다.
    ///
    /// ## 반환값
    ///
    /// - `Ok(Some(snapshot))` - 활성 계정이 존재함
    /// - `Ok(None)` - 계정이 없거나 비활성 상태 (인증 실패로 이어지지만 에러 아님)
    /// - `Err(AppError)` - 저장소 조회 실패
    pub async fn resolve(&self, username: &str) -> AppResult<Option<AuthenticatedUser>> {
        let user = match self.user_repo.find_by_username(username).await? {
            Some(user) => user,
            None => {
                log::debug!("디렉토리에 존재하지 않는 주체: {}", username);
                return Ok(None);
            }
        };

        if !user.is_active {
            log::debug!("비활성 계정의 토큰 제시: {}", username);
            return Ok(None);
        }

        let roles = self.role_repo.find_names_by_member(&user.username).await?;
        let password_changed_at = user.password_changed_at_secs();

        Ok(Some(AuthenticatedUser {
            username: user.username,
            roles,
            password_changed_at,
        }))
    }
}
