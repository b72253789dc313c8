//! Edge 설정

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

/// 기본 인증서 경로
pub const DEFAULT_TLS_CERT: &str = "/etc/letsencrypt/live/raul-awards.com/fullchain.pem";

/// 기본 개인키 경로
pub const DEFAULT_TLS_KEY: &str = "/etc/letsencrypt/live/raul-awards.com/privkey.pem";

/// Edge 설정
#[derive(Debug, Clone)]
pub struct Config {
    /// 바인드 주소
    pub bind: IpAddr,

    /// 평문 HTTP 포트 (리다이렉트 전용)
    pub http_port: u16,

    /// HTTPS 포트
    pub https_port: u16,

    /// 정적 파일 디렉토리
    pub static_dir: PathBuf,

    /// TLS 인증서 체인 (PEM)
    pub tls_cert: PathBuf,

    /// TLS 개인키 (PEM)
    pub tls_key: PathBuf,
}

impl Config {
    /// 환경변수에서 설정 로드
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            bind: env::var("RAUL_EDGE_BIND")
                .unwrap_or_else(|_| "0.0.0.0".to_string())
                .parse()?,

            http_port: env::var("RAUL_EDGE_HTTP_PORT")
                .unwrap_or_else(|_| "80".to_string())
                .parse()?,

            https_port: env::var("RAUL_EDGE_HTTPS_PORT")
                .unwrap_or_else(|_| "443".to_string())
                .parse()?,

            static_dir: env::var("RAUL_EDGE_STATIC_DIR")
                .unwrap_or_else(|_| "public".to_string())
                .into(),

            tls_cert: env::var("RAUL_EDGE_TLS_CERT")
                .unwrap_or_else(|_| DEFAULT_TLS_CERT.to_string())
                .into(),

            tls_key: env::var("RAUL_EDGE_TLS_KEY")
                .unwrap_or_else(|_| DEFAULT_TLS_KEY.to_string())
                .into(),
        })
    }
}
