//! 캐싱 계층 모듈
//!
//! Redis를 백엔드로 하는 토큰 화이트리스트 조회와 사용자 조회 캐싱을 제공합니다.
//!
//! # 주요 기능
//!
//! - Redis 통합 및 멀티플렉싱 연결 관리
//! - JSON 기반 자동 직렬화/역직렬화
//! - 키 존재 여부 확인 (토큰 화이트리스트 조회용)
//! - TTL 지원 캐시 저장
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod redis;
