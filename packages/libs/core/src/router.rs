//! 라우트 테이블과 네비게이션 가드
//!
//! 모든 네비게이션은 `RouteGuard`를 거칩니다. 가드는 매번 토큰을 검증하며
//! 결과를 캐시하지 않으므로, 서버에서 무효화된 토큰은 다음 이동 시 감지됩니다.
//!
//! # 가드 규칙
//!
//! - 로그인 경로: 세션이 유효하면 기본 페이지(`/`)로 리다이렉트, 아니면 진행
//! - 그 외 경로: 세션이 유효하지 않으면 로그인으로 리다이렉트, 유효하면 진행

use std::fmt;

use crate::auth::SessionValidator;

/// 로그인 경로
pub const LOGIN_PATH: &str = "/login";

/// 인증 후 기본 페이지
pub const LANDING_PATH: &str = "/";

/// 리다이렉트 최대 횟수
pub const MAX_REDIRECTS: usize = 4;

/// 화면 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Home,
    AllWinners,
    Archive,
    Admin,
}

impl View {
    pub fn name(&self) -> &'static str {
        match self {
            View::Login => "Login",
            View::Home => "Home",
            View::AllWinners => "AllWinners",
            View::Archive => "Archive",
            View::Admin => "Admin",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 접근 등급
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// 로그인 페이지 (세션이 있으면 건너뜀)
    Login,
    /// 유효한 세션 필요
    Protected,
}

/// 라우트 항목
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteEntry {
    pub path: &'static str,
    pub view: View,
    pub access: Access,
}

/// 고정 라우트 테이블
pub const ROUTES: &[RouteEntry] = &[
    RouteEntry {
        path: LOGIN_PATH,
        view: View::Login,
        access: Access::Login,
    },
    RouteEntry {
        path: LANDING_PATH,
        view: View::Home,
        access: Access::Protected,
    },
    RouteEntry {
        path: "/winners",
        view: View::AllWinners,
        access: Access::Protected,
    },
    RouteEntry {
        path: "/archive",
        view: View::Archive,
        access: Access::Protected,
    },
    RouteEntry {
        path: "/admin",
        view: View::Admin,
        access: Access::Protected,
    },
];

/// 경로 정규화 (쿼리/프래그먼트 및 끝의 `/` 제거)
pub fn normalize_path(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default().trim();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        LANDING_PATH.to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

/// 경로에 해당하는 라우트 조회
pub fn resolve(path: &str) -> Option<&'static RouteEntry> {
    let path = normalize_path(path);
    ROUTES.iter().find(|route| route.path == path)
}

/// 가드 판정
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// 목적지로 진행
    Proceed(String),
    /// 다른 경로로 리다이렉트
    Redirect(String),
}

/// 네비게이션 가드
pub struct RouteGuard<V> {
    validator: V,
}

impl<V: SessionValidator> RouteGuard<V> {
    pub fn new(validator: V) -> Self {
        Self { validator }
    }

    pub fn validator(&self) -> &V {
        &self.validator
    }

    /// 네비게이션 판정
    ///
    /// 검증 호출이 끝난 뒤에만 결과를 반환합니다.
    pub async fn check(&self, target: &str) -> Navigation {
        let target = normalize_path(target);
        let valid = self.validator.validate_token().await;

        if target == LOGIN_PATH {
            if valid {
                Navigation::Redirect(LANDING_PATH.to_string())
            } else {
                Navigation::Proceed(target)
            }
        } else if valid {
            Navigation::Proceed(target)
        } else {
            Navigation::Redirect(LOGIN_PATH.to_string())
        }
    }
}

/// 네비게이션 최종 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// 화면 렌더링
    Render {
        route: RouteEntry,
        /// 따라간 리다이렉트 경로 (순서대로)
        redirects: Vec<String>,
    },
    /// 가드는 통과했으나 라우트 없음
    NotFound { path: String },
    /// 리다이렉트가 끝나지 않음
    TooManyRedirects { path: String },
}

/// 라우터
///
/// 라우트를 찾고 가드를 적용하며 리다이렉트를 따라갑니다. 각 리다이렉트마다
/// 가드가 다시 실행됩니다.
pub struct Router<V> {
    guard: RouteGuard<V>,
}

impl<V: SessionValidator> Router<V> {
    pub fn new(validator: V) -> Self {
        Self {
            guard: RouteGuard::new(validator),
        }
    }

    pub fn guard(&self) -> &RouteGuard<V> {
        &self.guard
    }

    /// 경로로 이동
    pub async fn navigate(&self, path: &str) -> Resolved {
        let mut target = normalize_path(path);
        let mut redirects = Vec::new();

        loop {
            match self.guard.check(&target).await {
                Navigation::Proceed(path) => {
                    return match resolve(&path) {
                        Some(route) => Resolved::Render {
                            route: *route,
                            redirects,
                        },
                        None => Resolved::NotFound { path },
                    };
                }
                Navigation::Redirect(next) => {
                    if redirects.len() >= MAX_REDIRECTS {
                        tracing::warn!("Navigation to {} exceeded redirect limit", path);
                        return Resolved::TooManyRedirects { path: next };
                    }
                    tracing::debug!("Redirecting {} -> {}", target, next);
                    redirects.push(next.clone());
                    target = next;
                }
            }
        }
    }
}
