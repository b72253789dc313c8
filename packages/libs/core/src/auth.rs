//! 세션 수명주기
//!
//! 로그인, 로그아웃, 토큰 검증을 담당합니다.
//!
//! `login`과 `validate_token`은 절대 에러를 반환하지 않습니다. 네트워크 실패,
//! 인증 실패, 잘못된 응답은 모두 `false`로 변환됩니다.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::http::{self, HttpClient};

/// 로그인 엔드포인트
pub const LOGIN_PATH: &str = "/auth/login";

/// 토큰 검증 엔드포인트
pub const VALIDATE_PATH: &str = "/auth/validate";

/// 세션 유효성 확인
///
/// 라우터 가드가 의존하는 유일한 연산입니다.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    async fn validate_token(&self) -> bool;
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// `/auth/login` 응답
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginResponse {
    pub success: bool,
    pub token: Option<String>,
    pub role: Option<String>,
    pub message: Option<String>,
}

/// `/auth/validate` 응답
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ValidateResponse {
    pub success: bool,
    pub role: Option<String>,
    pub message: Option<String>,
}

/// 인증 서비스
#[derive(Clone)]
pub struct AuthService {
    http: HttpClient,
}

impl AuthService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// 로그인
    ///
    /// 성공 응답에 토큰이 있을 때만 토큰과 role을 저장하고 `true`를 반환합니다.
    /// 그 외에는 저장소를 건드리지 않고 `false`를 반환합니다.
    pub async fn login(&self, username: &str, password: &str) -> bool {
        let req = self
            .http
            .post(LOGIN_PATH)
            .json(&LoginRequest { username, password });

        let resp: LoginResponse = match http::send_json(req).await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::debug!("Login request failed: {}", e);
                return false;
            }
        };

        let token = match resp.token.as_deref() {
            Some(token) if resp.success && !token.is_empty() => token,
            _ => {
                tracing::debug!(
                    "Login rejected: {}",
                    resp.message.as_deref().unwrap_or("no token in response")
                );
                return false;
            }
        };

        let store = self.http.store();
        if let Err(e) = store.set_token(token) {
            tracing::warn!("Failed to store session token: {}", e);
            return false;
        }

        // 이전 세션의 role이 남지 않도록 응답에 role이 없으면 삭제
        let role_result = match resp.role.as_deref() {
            Some(role) if !role.is_empty() => store.set_role(role),
            _ => store.clear_role(),
        };
        if let Err(e) = role_result {
            tracing::warn!("Failed to store session role: {}", e);
        }

        tracing::info!("Logged in as {}", username);
        true
    }

    /// 토큰 검증
    ///
    /// 저장된 토큰이 없으면 네트워크 호출 없이 `false`를 반환합니다.
    pub async fn validate_token(&self) -> bool {
        if self.http.store().get_token().is_none() {
            return false;
        }

        match http::send_json::<ValidateResponse>(self.http.get(VALIDATE_PATH)).await {
            Ok(resp) => resp.success,
            Err(e) => {
                tracing::debug!("Token validation failed: {}", e);
                false
            }
        }
    }

    /// 로그아웃 (로컬 상태만 초기화)
    pub fn logout(&self) {
        let store = self.http.store();
        if let Err(e) = store.clear_token() {
            tracing::warn!("Failed to clear session token: {}", e);
        }
        if let Err(e) = store.clear_role() {
            tracing::warn!("Failed to clear session role: {}", e);
        }
    }

    /// 저장된 role
    pub fn role(&self) -> Option<String> {
        self.http.store().get_role()
    }

    /// 저장된 role이 관리자인지
    pub fn is_admin(&self) -> bool {
        self.role()
            .map(|role| role.eq_ignore_ascii_case("admin"))
            .unwrap_or(false)
    }
}

#[async_trait]
impl SessionValidator for AuthService {
    async fn validate_token(&self) -> bool {
        AuthService::validate_token(self).await
    }
}
