//! 관리자 명령어 (등록/교체/제목 변경/삭제)
//!
//! 저장된 role로 먼저 걸러내지만, 최종 권한 판단은 서버가 합니다.

use std::path::Path;

use anyhow::Context as _;
use chrono::NaiveDate;
use raul_core::api::{ApiMessage, ImageUpload, WinnerUpload};
use raul_core::router::View;
use raul_core::{week, Error};

use crate::context::App;
use crate::OutputFormat;

async fn enter_admin(app: &App) -> anyhow::Result<()> {
    app.enter("/admin", View::Admin).await?;
    if !app.auth.is_admin() {
        return Err(Error::AdminRequired.into());
    }
    Ok(())
}

fn read_upload(
    sunday_date: NaiveDate,
    kind: &str,
    image: &Path,
    title: Option<String>,
) -> anyhow::Result<WinnerUpload> {
    let sunday_date = week::require_sunday(sunday_date)?;
    let bytes = std::fs::read(image).with_context(|| format!("failed to read {}", image.display()))?;
    let file_name = image
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image")
        .to_string();

    Ok(WinnerUpload {
        sunday_date,
        kind: kind.to_string(),
        image: ImageUpload::new(bytes, file_name),
        title,
    })
}

pub async fn create(
    app: &App,
    sunday_date: NaiveDate,
    kind: &str,
    image: &Path,
    title: Option<String>,
) -> anyhow::Result<()> {
    enter_admin(app).await?;
    let upload = read_upload(sunday_date, kind, image, title)?;
    let msg = app.winners.create(upload).await?;
    print_message(app, &msg)
}

pub async fn update(
    app: &App,
    sunday_date: NaiveDate,
    kind: &str,
    image: &Path,
    title: Option<String>,
) -> anyhow::Result<()> {
    enter_admin(app).await?;
    let upload = read_upload(sunday_date, kind, image, title)?;
    let msg = app.winners.update(upload).await?;
    print_message(app, &msg)
}

pub async fn update_title(
    app: &App,
    sunday_date: NaiveDate,
    kind: &str,
    title: &str,
) -> anyhow::Result<()> {
    enter_admin(app).await?;
    let msg = app.winners.update_title(sunday_date, kind, title).await?;
    print_message(app, &msg)
}

pub async fn delete(app: &App, sunday_date: NaiveDate, kind: &str) -> anyhow::Result<()> {
    enter_admin(app).await?;
    let msg = app.winners.delete(sunday_date, kind).await?;
    print_message(app, &msg)
}

fn print_message(app: &App, msg: &ApiMessage) -> anyhow::Result<()> {
    match app.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(msg)?),
        OutputFormat::Text => {
            println!("{}", msg.message.as_deref().unwrap_or("Done."));
            if let Some(id) = msg.get_i64("winnerId") {
                println!("  winner: {}", id);
            }
            if let Some(id) = msg.get_i64("imageId") {
                println!("  image:  {}", id);
            }
            if let Some(action) = msg.get_str("action") {
                println!("  action: {}", action);
            }
        }
    }
    Ok(())
}
