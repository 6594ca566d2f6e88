//! # Repository Layer Module
//!
//! 데이터 액세스 계층을 구성하는 리포지토리 모듈입니다.
//! Spring Data의 Repository 계층과 동일한 역할을 수행합니다.
//!
//! ## 모듈 구성
//!
//! - [`users`] - 디렉토리 사용자 엔트리 조회 (MongoDB + Redis 캐시)
//! - [`roles`] - 역할 그룹 조회 (MongoDB)
//! - [`tokens`] - 활성 토큰 화이트리스트 조회 (Redis)
//!
//! 모든 리포지토리는 싱글톤 매크로로 등록되며 `instance()`로 접근합니다.

pub mod roles;
pub mod tokens;
pub mod users;
