//! raul-core: Raul Awards 클라이언트 핵심 라이브러리
//!
//! CLI와 다른 프론트엔드가 공유하는 세션 수명주기와 REST 클라이언트를 제공합니다.
//!
//! # 모듈 구조
//!
//! - `session`: 세션 토큰/role 저장소 (`TokenStore`)
//! - `http`: 저장된 토큰을 Bearer 헤더로 주입하는 HTTP 클라이언트
//! - `auth`: 로그인, 로그아웃, 토큰 검증
//! - `router`: 라우트 테이블과 네비게이션 가드
//! - `api`: Weekly Winner / 이미지 REST 래퍼
//! - `week`: 일요일 날짜 계산
//! - `config`: 클라이언트 설정
//! - `error`: 공통 에러 타입

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod router;
pub mod session;
pub mod week;

pub use auth::{AuthService, SessionValidator};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use http::HttpClient;
pub use router::{Navigation, RouteGuard, Router, View};
pub use session::{FileTokenStore, MemoryTokenStore, TokenStore};
