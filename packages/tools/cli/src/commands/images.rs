//! 이미지 명령어

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use raul_core::api::mime_from_file_name;
use raul_core::router::View;

use crate::context::App;

pub fn url(app: &App, image_id: i64) -> anyhow::Result<()> {
    println!("{}", app.images.image_url(image_id));
    Ok(())
}

pub async fn show(app: &App, image_id: i64, out: Option<&Path>) -> anyhow::Result<()> {
    app.enter("/winners", View::AllWinners).await?;

    let Some(blob) = app.images.fetch_image(image_id).await else {
        println!("Image {} unavailable.", image_id);
        return Ok(());
    };

    println!("Image {}: {} ({} bytes)", image_id, blob.mime_type, blob.bytes.len());
    if let Some(path) = out {
        std::fs::write(path, &blob.bytes).with_context(|| format!("failed to write {}", path.display()))?;
        println!("Saved to {}", path.display());
    }
    Ok(())
}

pub async fn download(app: &App, image_id: i64, dir: &Path) -> anyhow::Result<()> {
    app.enter("/winners", View::AllWinners).await?;

    let download = app.images.download_image(image_id).await?;
    let file_name = download
        .file_name
        .as_deref()
        .map(sanitize_file_name)
        .unwrap_or_else(|| fallback_file_name(image_id, &download.blob.mime_type));

    let path: PathBuf = dir.join(&file_name);
    std::fs::create_dir_all(dir)?;
    std::fs::write(&path, &download.blob.bytes)
        .with_context(|| format!("failed to write {}", path.display()))?;

    println!("Downloaded image {} to {}", image_id, path.display());
    Ok(())
}

/// 경로 구분자 제거 (서버가 준 이름이 디렉토리를 벗어나지 않도록)
fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    match base {
        "" | "." | ".." => "image".to_string(),
        other => other.to_string(),
    }
}

fn fallback_file_name(image_id: i64, mime_type: &str) -> String {
    let ext = ["png", "jpg", "gif", "webp", "bmp", "svg"]
        .into_iter()
        .find(|ext| mime_from_file_name(&format!("x.{}", ext)) == mime_type)
        .unwrap_or("bin");
    format!("image-{}.{}", image_id, ext)
}
