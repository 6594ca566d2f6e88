//! # Service Layer Module
//!
//! 비즈니스 로직 계층을 구성하는 서비스 모듈입니다.
//! Spring Framework의 `@Service` 계층과 동일한 역할을 수행합니다.
//!
//! ## 모듈 구성
//!
//! - [`auth`] - JWT 토큰 디코딩과 신원 일치 검증
//! - [`users`] - 사용자 엔트리와 역할을 조합한 신원 스냅샷 조립

pub mod auth;
pub mod users;
