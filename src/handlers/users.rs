//! 사용자 조회 핸들러
//!
//! 인가 필터가 확립한 신원 스냅샷을 소비하는 엔드포인트들입니다.

use actix_web::{get, HttpResponse};
use serde_json::json;

use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
use crate::errors::errors::AppError;
use crate::repositories::users::user_repo::UserRepository;

/// 현재 인증된 사용자의 디렉토리 엔트리 조회
///
/// `AuthenticatedUser` 추출기가 신원 미확립 요청을 401로 차단하므로
/// 핸들러 본문은 인증된 요청만 처리합니다.
///
/// # Endpoint
///
/// `GET /api/v1/me`
#[get("/me")]
pub async fn get_current_user(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let user_repo = UserRepository::instance();

    // 스냅샷은 필터 시점의 뷰이므로 응답은 디렉토리를 다시 조회해 구성
    let entry = user_repo
        .find_by_username(&user.username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("사용자를 찾을 수 없습니다: {}", user.username)))?;

    Ok(HttpResponse::Ok().json(json!({
        "username": entry.username,
        "display_name": entry.display_name,
        "roles": user.roles,
        "is_active": entry.is_active,
    })))
}

/// 디렉토리 현황 요약 조회 (관리자 전용)
///
/// 역할 기반 접근 제어 예시 엔드포인트입니다.
/// ADMIN 역할이 없는 인증 사용자는 403 응답을 받습니다.
///
/// # Endpoint
///
/// `GET /api/v1/admin/directory`
#[get("/admin/directory")]
pub async fn get_directory_summary(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    if !user.is_admin() {
        log::warn!("권한 부족: {} (보유 역할: {:?})", user.username, user.roles);
        return Err(AppError::AuthorizationError(
            "관리자 권한이 필요합니다".to_string(),
        ));
    }

    let user_repo = UserRepository::instance();
    let active_users = user_repo.count_active().await?;

    Ok(HttpResponse::Ok().json(json!({
        "active_users": active_users,
        "requested_by": user.username,
    })))
}
