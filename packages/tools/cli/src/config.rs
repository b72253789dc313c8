//! CLI 설정

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use raul_core::config::{default_session_file, DEFAULT_API_URL};
use raul_core::ClientConfig;
use serde::{Deserialize, Serialize};

/// CLI 설정 (`~/.raul/config.json`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// 기본 API URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// 세션 파일 경로
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_file: Option<PathBuf>,
}

impl CliConfig {
    /// 설정 파일 경로
    pub fn config_path() -> anyhow::Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?;
        Ok(home.join(".raul").join("config.json"))
    }

    /// 설정 로드
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let config: CliConfig = serde_json::from_str(&content)
                .with_context(|| format!("invalid config file {}", path.display()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// 설정 저장
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// 최종 클라이언트 설정 결정 (CLI 옵션 > 환경변수 > 설정 파일 > 기본값)
    pub fn resolve(
        &self,
        api_url: Option<&str>,
        session_file: Option<&Path>,
    ) -> anyhow::Result<ClientConfig> {
        let api_url = api_url
            .map(|s| s.to_string())
            .or_else(|| std::env::var("RAUL_API_URL").ok())
            .or_else(|| self.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let session_file = match session_file
            .map(Path::to_path_buf)
            .or_else(|| std::env::var("RAUL_SESSION_FILE").ok().map(PathBuf::from))
            .or_else(|| self.session_file.clone())
        {
            Some(path) => path,
            None => default_session_file()?,
        };

        Ok(ClientConfig::new(api_url, session_file)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_and_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = CliConfig {
            api_url: Some("https://raul-awards.com/api".to_string()),
            session_file: Some(dir.path().join("session.json")),
        };
        config.save_to(&path).unwrap();

        let loaded = CliConfig::load_from(&path).unwrap();
        let resolved = loaded
            .resolve(Some("http://127.0.0.1:9000/api/"), None)
            .unwrap();
        assert_eq!(resolved.api_url, "http://127.0.0.1:9000/api");
        assert_eq!(resolved.session_file, dir.path().join("session.json"));
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = CliConfig::load_from(&dir.path().join("absent.json")).unwrap();
        assert!(loaded.api_url.is_none());
    }
}
