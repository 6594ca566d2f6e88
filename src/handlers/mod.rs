//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//! Spring Framework의 Controller 레이어와 동일한 역할을 수행합니다.
//!
//! 인가 필터가 전역에 장착되어 있으므로 핸들러는 토큰을 직접 다루지
//! 않습니다. 보호가 필요한 핸들러는 `AuthenticatedUser` 추출기를
//! 파라미터로 선언하는 것만으로 401 응답이 보장되고, 역할 검증은
//! 핸들러 본문에서 스냅샷의 역할 목록으로 수행합니다.

pub mod users;
