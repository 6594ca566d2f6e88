//! 핵심 인프라 모듈
//!
//! 싱글톤 의존성 주입 레지스트리를 제공합니다.
//! Spring의 ApplicationContext가 보안 필터 체인에 빈을 공급하듯,
//! 이 모듈의 ServiceLocator가 필터와 서비스 계층에 컴포넌트를 공급합니다.

pub mod registry;

pub use registry::*;
