//! 설정 명령어

use std::path::{Path, PathBuf};

use crate::config::CliConfig;

pub fn set(api_url: Option<String>, session_file: Option<PathBuf>) -> anyhow::Result<()> {
    let path = CliConfig::config_path()?;
    set_at(&path, api_url, session_file)?;
    println!("Config updated.");
    show()
}

fn set_at(path: &Path, api_url: Option<String>, session_file: Option<PathBuf>) -> anyhow::Result<()> {
    // 손상된 설정 파일은 덮어쓰지 않음
    let mut config = CliConfig::load_from(path)?;

    if let Some(url) = api_url {
        config.api_url = Some(url);
    }
    if let Some(path) = session_file {
        config.session_file = Some(path);
    }

    // 저장 전에 검증
    config.resolve(None, None)?;
    config.save_to(path)
}

pub fn show() -> anyhow::Result<()> {
    let path = CliConfig::config_path()?;
    let config = CliConfig::load_from(&path)?;
    let effective = config.resolve(None, None)?;

    println!("Config ({}):", path.display());
    println!("  api url:      {}", config.api_url.as_deref().unwrap_or("(not set)"));
    println!(
        "  session file: {}",
        config
            .session_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(not set)".to_string())
    );
    println!("Effective:");
    println!("  api url:      {}", effective.api_url);
    println!("  session file: {}", effective.session_file.display());

    Ok(())
}
