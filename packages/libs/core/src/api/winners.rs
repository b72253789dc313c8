//! Weekly Winner 엔드포인트

use chrono::NaiveDate;
use reqwest::multipart::{Form, Part};
use reqwest::RequestBuilder;

use crate::error::{Error, Result};
use crate::http::{self, HttpClient};
use crate::week::require_sunday;

use super::models::{ApiMessage, WeeklyWinner, WinnerUpload};

const BASE: &str = "/weekly-winners";

/// `/weekly-winners/*` 래퍼
#[derive(Clone)]
pub struct WinnersApi {
    http: HttpClient,
}

impl WinnersApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // 조회
    // ─────────────────────────────────────────────────────────────────────────

    /// 이번 주 수상자
    pub async fn current(&self) -> Result<Vec<WeeklyWinner>> {
        http::send_json(self.http.get(&format!("{}/current", BASE))).await
    }

    /// 최근 수상자 2명
    pub async fn latest(&self) -> Result<Vec<WeeklyWinner>> {
        http::send_json(self.http.get(&format!("{}/latest", BASE))).await
    }

    /// 전체 수상자 (최신순)
    pub async fn all(&self) -> Result<Vec<WeeklyWinner>> {
        http::send_json(self.http.get(&format!("{}/all", BASE))).await
    }

    /// 지난 수상자 아카이브
    pub async fn archive(&self) -> Result<Vec<WeeklyWinner>> {
        http::send_json(self.http.get(&format!("{}/archive", BASE))).await
    }

    /// 특정 일요일의 수상자
    pub async fn by_date(&self, sunday_date: NaiveDate) -> Result<Vec<WeeklyWinner>> {
        let req = self
            .http
            .get(&format!("{}/by-date", BASE))
            .query(&[("sundayDate", sunday_date.to_string())]);
        http::send_json(req).await
    }

    /// 부문별 수상자
    pub async fn by_type(&self, kind: &str) -> Result<Vec<WeeklyWinner>> {
        http::send_json(self.http.get(&format!("{}/by-type/{}", BASE, kind))).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // 변경 (관리자)
    // ─────────────────────────────────────────────────────────────────────────

    /// 수상자 등록
    pub async fn create(&self, upload: WinnerUpload) -> Result<ApiMessage> {
        let form = upload_form(upload)?;
        send_mutation(self.http.post(&format!("{}/create", BASE)).multipart(form)).await
    }

    /// 수상자 교체 (없으면 등록)
    pub async fn update(&self, upload: WinnerUpload) -> Result<ApiMessage> {
        let form = upload_form(upload)?;
        send_mutation(self.http.put(&format!("{}/update", BASE)).multipart(form)).await
    }

    /// 제목만 변경
    pub async fn update_title(
        &self,
        sunday_date: NaiveDate,
        kind: &str,
        title: &str,
    ) -> Result<ApiMessage> {
        let sunday_date = require_sunday(sunday_date)?;
        let form = Form::new()
            .text("sundayDate", sunday_date.to_string())
            .text("type", kind.to_string())
            .text("title", title.to_string());
        send_mutation(self.http.put(&format!("{}/update-title", BASE)).multipart(form)).await
    }

    /// 날짜+부문으로 삭제
    pub async fn delete(&self, sunday_date: NaiveDate, kind: &str) -> Result<ApiMessage> {
        let sunday_date = require_sunday(sunday_date)?;
        let req = self
            .http
            .delete(&format!("{}/delete", BASE))
            .query(&[("sundayDate", sunday_date.to_string()), ("type", kind.to_string())]);
        send_mutation(req).await
    }
}

fn upload_form(upload: WinnerUpload) -> Result<Form> {
    let sunday_date = require_sunday(upload.sunday_date)?;

    let image = Part::bytes(upload.image.bytes)
        .file_name(upload.image.file_name)
        .mime_str(&upload.image.mime_type)?;

    let mut form = Form::new()
        .text("sundayDate", sunday_date.to_string())
        .text("type", upload.kind)
        .part("image", image);
    if let Some(title) = upload.title {
        form = form.text("title", title);
    }
    Ok(form)
}

/// `{success, message}` 응답 처리
///
/// 2xx가 아니거나 `success: false`이면 `Error::Api`로 변환합니다.
async fn send_mutation(req: RequestBuilder) -> Result<ApiMessage> {
    let resp = req.send().await?;
    let status = resp.status();
    let text = resp.text().await?;

    let msg = serde_json::from_str::<ApiMessage>(&text).unwrap_or_else(|_| ApiMessage {
        message: (!text.is_empty()).then(|| text.clone()),
        ..ApiMessage::default()
    });

    if !status.is_success() || !msg.success {
        return Err(Error::Api {
            status: status.as_u16(),
            message: msg
                .message
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string()),
        });
    }

    Ok(msg)
}
