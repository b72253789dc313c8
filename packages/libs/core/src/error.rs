//! 공통 에러 타입
//!
//! raul-core 전체에서 사용되는 에러 타입을 정의합니다.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// raul-core 공통 에러
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────────────────────
    // Session Store Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("session store error: {message}")]
    SessionStore { message: String },

    #[error("session file error: {0}")]
    Io(#[from] std::io::Error),

    // ─────────────────────────────────────────────────────────────────────────────
    // Transport Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    // ─────────────────────────────────────────────────────────────────────────────
    // API Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("invalid sunday date: {date} is a {weekday}")]
    NotSunday { date: String, weekday: String },

    #[error("admin role required")]
    AdminRequired,

    // ─────────────────────────────────────────────────────────────────────────────
    // Config/Serialization Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("invalid config: {message}")]
    Config { message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// 에러 코드 (출력용)
    pub fn code(&self) -> &'static str {
        match self {
            Error::SessionStore { .. } => "SESSION_STORE_ERROR",
            Error::Io(_) => "SESSION_IO_ERROR",
            Error::Transport(_) => "TRANSPORT_ERROR",
            Error::Status { .. } => "UNEXPECTED_STATUS",
            Error::Api { .. } => "API_ERROR",
            Error::NotSunday { .. } => "NOT_SUNDAY",
            Error::AdminRequired => "ADMIN_REQUIRED",
            Error::Config { .. } => "CONFIG_ERROR",
            Error::Json(_) => "JSON_ERROR",
        }
    }

    /// 인증 실패(401/403) 여부
    pub fn is_unauthorized(&self) -> bool {
        match self {
            Error::Status { status, .. } | Error::Api { status, .. } => {
                *status == 401 || *status == 403
            }
            Error::AdminRequired => true,
            _ => false,
        }
    }
}
