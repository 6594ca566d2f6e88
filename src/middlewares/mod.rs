//! # Middleware Layer Module
//!
//! ActixWeb 요청 파이프라인에 장착되는 미들웨어 모듈입니다.
//! Spring Security의 Filter Chain과 동일한 역할을 수행합니다.
//!
//! - [`auth_middleware`] - JWT 인가 필터의 Transform (파이프라인 장착부)
//! - [`auth_inner`] - 요청당 판정 로직을 수행하는 내부 서비스

pub mod auth_inner;
pub mod auth_middleware;

pub use auth_middleware::JwtAuthorizationFilter;
