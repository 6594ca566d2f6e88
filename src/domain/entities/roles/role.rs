//! 디렉토리 역할 그룹 엔티티

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 디렉토리에 영속되는 역할 그룹
///
/// LDAP의 groupOfNames와 같은 형태로, 역할이 구성원 목록을 보유합니다.
/// 사용자 엔트리는 역할을 역참조하지 않으며, 역할 조회는 항상
/// 구성원 목록 기준으로 수행됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    /// MongoDB ObjectId
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// 역할 이름 (예: "ADMIN", "USER")
    pub name: String,

    /// 역할 설명
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// 이 역할에 소속된 사용자명 목록
    #[serde(default)]
    pub members: Vec<String>,

    /// 그룹 생성 시간
    pub created_at: DateTime,
}

impl Role {
    /// 새 역할 그룹을 생성합니다.
    pub fn new(name: String) -> Self {
        Self {
            id: None,
            name,
            description: None,
            members: Vec::new(),
            created_at: DateTime::now(),
        }
    }

    /// 주어진 사용자가 이 역할의 구성원인지 확인합니다.
    pub fn has_member(&self, username: &str) -> bool {
        self.members.iter().any(|member| member == username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_member() {
        let mut role = Role::new("ADMIN".to_string());
        role.members.push("alice".to_string());

        assert!(role.has_member("alice"));
        assert!(!role.has_member("bob"));
    }
}
