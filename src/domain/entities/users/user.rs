//! 디렉토리 사용자 엔트리 엔티티

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 디렉토리에 영속되는 사용자 엔트리
///
/// 인증 필터는 토큰의 주체(sub)로 이 엔트리를 조회하여
/// 계정 활성 상태와 자격증명 변경 시각을 재검증합니다.
/// 자격증명 원문(비밀번호 해시 등)은 발급 서브시스템 소관이며
/// 이 게이트웨이는 보관하지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// MongoDB ObjectId
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// 사용자명 (토큰 sub 클레임의 대응 키, 고유값)
    pub username: String,

    /// 표시 이름
    pub display_name: String,

    /// 계정 활성 여부. 비활성 계정은 유효한 토큰으로도 인증되지 않습니다.
    pub is_active: bool,

    /// 마지막 자격증명 변경 시각. 이 시각 이전에 발급된 토큰은 무효입니다.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_changed_at: Option<DateTime>,

    /// 엔트리 생성 시간
    pub created_at: DateTime,

    /// 엔트리 수정 시간
    pub updated_at: DateTime,
}

impl User {
    /// 새 사용자 엔트리를 생성합니다.
    pub fn new(username: String, display_name: String) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            username,
            display_name,
            is_active: true,
            password_changed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// 자격증명 변경 시각을 Unix timestamp(초)로 반환합니다.
    ///
    /// 토큰의 iat 클레임과 직접 비교할 수 있는 단위입니다.
    pub fn password_changed_at_secs(&self) -> Option<i64> {
        self.password_changed_at
            .map(|changed| changed.timestamp_millis() / 1000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_is_active_by_default() {
        let user = User::new("alice".to_string(), "Alice Kim".to_string());
        assert!(user.is_active);
        assert!(user.password_changed_at.is_none());
    }

    #[test]
    fn test_password_changed_at_converts_to_seconds() {
        let mut user = User::new("bob".to_string(), "Bob Lee".to_string());
        user.password_changed_at = Some(DateTime::from_millis(1_700_000_000_000));

        assert_eq!(user.password_changed_at_secs(), Some(1_700_000_000));
    }
}
