//! 보안 게이트웨이 서비스 백엔드
//!
//! Rust 기반의 JWT 인가 게이트웨이 서비스입니다.
//! 매 요청마다 액세스 토큰을 해석하여 보안 컨텍스트를 확립하고,
//! 싱글톤 매크로를 활용한 의존성 주입 위에서 동작합니다.
//!
//! # Features
//!
//! - **JWT 인가 필터**: 경로 제외, Bearer 추출, 토큰 검증을 수행하는 전역 필터
//! - **토큰 화이트리스트**: Redis 기반 활성 토큰 조회로 즉시 철회 지원
//! - **신원 재검증**: 토큰 주체를 디렉토리의 현재 상태와 대조
//! - **싱글톤 DI**: 매크로 기반 자동 의존성 주입
//! - **MongoDB**: 사용자 엔트리와 역할 그룹 저장
//! - **Redis**: 토큰 화이트리스트 및 조회 캐싱
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐
//! │ JwtAuthorizationFilter │ ← 전역 인가 필터 (요청 거부 없음)
//! └──────────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 추출기로 보안 컨텍스트 소비
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 토큰 검증 / 신원 조립
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 화이트리스트 / 디렉토리 액세스
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use security_service_backend::services::auth::TokenService;
//! use security_service_backend::services::users::IdentityService;
//!
//! // 싱글톤 서비스 인스턴스 가져오기
//! let token_service = TokenService::instance();
//! let identity_service = IdentityService::instance();
//!
//! // 토큰 검증 및 신원 조립
//! let claims = token_service.decode_claims(&token)?;
//! let identity = identity_service.resolve(&claims.sub).await?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;
