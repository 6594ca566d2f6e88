//! # Domain Layer Module
//!
//! 도메인 계층을 구성하는 핵심 모듈입니다.
//! Spring Framework의 Domain Layer와 동일한 역할을 수행합니다.
//!
//! ## 모듈 구성
//!
//! - [`entities`] - 디렉토리 저장소에 영속되는 핵심 객체 (사용자 엔트리, 역할 그룹)
//! - [`models`] - 요청 처리 과정에서 사용되는 모델 (토큰 클레임, 신원 스냅샷,
//!   인증 필터 결과)
//!
//! 엔티티는 저장소의 형태를 따르고, 모델은 요청 수명 주기를 따릅니다.
//! 인증 필터는 엔티티를 직접 다루지 않고 `IdentityService`가 조립한
//! 불변 스냅샷([`models::auth::authenticated_user::AuthenticatedUser`])만 사용합니다.

pub mod entities;
pub mod models;

pub use entities::*;
pub use models::*;
