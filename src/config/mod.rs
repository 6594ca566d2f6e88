//! 설정 모듈
//!
//! 환경 변수 기반 설정을 관리합니다.
//! JWT 서명 설정과 인증 필터의 URL/헤더 설정을 제공합니다.

pub mod auth_config;

pub use auth_config::*;
