//! 클라이언트 설정

use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// 기본 REST API URL
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// 클라이언트 설정
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// REST API base URL (끝의 `/` 제외)
    pub api_url: String,

    /// 세션 파일 경로
    pub session_file: PathBuf,
}

impl ClientConfig {
    /// 환경변수에서 설정 로드
    pub fn from_env() -> Result<Self> {
        let api_url = env::var("RAUL_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let session_file = match env::var("RAUL_SESSION_FILE") {
            Ok(path) => PathBuf::from(path),
            Err(_) => default_session_file()?,
        };

        Self::new(api_url, session_file)
    }

    /// 명시적 값으로 생성
    pub fn new(api_url: impl Into<String>, session_file: impl Into<PathBuf>) -> Result<Self> {
        let api_url = normalize_base_url(&api_url.into())?;
        Ok(Self {
            api_url,
            session_file: session_file.into(),
        })
    }
}

/// 기본 세션 파일 경로 (`~/.raul/session.json`)
pub fn default_session_file() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| Error::Config {
        message: "cannot find home directory".to_string(),
    })?;
    Ok(home.join(".raul").join("session.json"))
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(Error::Config {
            message: format!("api url must start with http:// or https://, got '{}'", raw),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_normalization() {
        let config = ClientConfig::new("https://raul-awards.com/api/", "/tmp/s.json").unwrap();
        assert_eq!(config.api_url, "https://raul-awards.com/api");

        assert!(ClientConfig::new("raul-awards.com", "/tmp/s.json").is_err());
    }
}
