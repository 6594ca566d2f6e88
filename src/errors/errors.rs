//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! 보안 게이트웨이를 위한 통합 에러 처리 시스템입니다.
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 타입 안전하고
//! 일관된 에러 처리를 제공합니다.
//!
//! 인증 필터 내부의 실패(토큰 디코딩 실패 등)는 이 타입으로 표면화되지
//! 않습니다. 필터는 모든 실패를 "미인증" 상태로 삼키고 파이프라인을
//! 계속 진행하며, `AppError`는 다운스트림 핸들러와 저장소 계층에서만
//! HTTP 응답으로 변환됩니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::AppError;
//!
//! async fn find_directory_user(username: &str) -> Result<User, AppError> {
//!     user_repo.find_by_username(username).await?
//!         .ok_or_else(|| AppError::NotFound(format!("사용자 {} 없음", username)))
//! }
//! ```

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 게이트웨이에서 발생할 수 있는 모든 종류의 에러를 포괄하는 열거형입니다.
/// 자동으로 HTTP 응답으로 변환되어 클라이언트에게 전달됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 디렉토리 저장소(MongoDB) 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 토큰 화이트리스트 저장소(Redis) 관련 에러 (500 Internal Server Error)
    ///
    /// 인증 필터 안에서는 이 에러가 HTTP 응답이 되지 않습니다.
    /// 폐기 여부를 확인할 수 없는 토큰은 무조건 무효로 간주합니다(fail closed).
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 리소스 찾을 수 없음 에러 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 인증 실패 에러 (401 Unauthorized)
    ///
    /// 보안 컨텍스트가 비어 있는 요청이 보호된 핸들러에 도달했을 때
    /// 다운스트림 추출자가 반환합니다.
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 권한 부족 에러 (403 Forbidden)
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl actix_web::ResponseError for AppError {
    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 각 에러 타입을 적절한 HTTP 상태 코드와 JSON 응답으로 변환합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        use actix_web::http::StatusCode;

        let status = match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        actix_web::HttpResponse::build(status)
            .json(serde_json::json!({
                "error": self.to_string()
            }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;
