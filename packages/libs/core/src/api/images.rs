//! 이미지 엔드포인트

use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::Response;

use crate::error::Result;
use crate::http::{self, HttpClient};

use super::models::{ImageBlob, ImageDownload};

/// `/images/*` 래퍼
#[derive(Clone)]
pub struct ImagesApi {
    http: HttpClient,
}

impl ImagesApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// 인라인 이미지 URL
    pub fn image_url(&self, image_id: i64) -> String {
        self.http.url(&format!("/images/{}", image_id))
    }

    /// 인증된 이미지 조회
    ///
    /// 실패하면 로그를 남기고 `None`을 반환합니다. 이미지 하나 때문에 화면 전체가
    /// 실패하지 않도록 합니다.
    pub async fn fetch_image(&self, image_id: i64) -> Option<ImageBlob> {
        match self.try_fetch_image(image_id).await {
            Ok(blob) => Some(blob),
            Err(e) => {
                tracing::warn!("Failed to load image {}: {}", image_id, e);
                None
            }
        }
    }

    /// 인증된 이미지 조회 (에러 전달)
    pub async fn try_fetch_image(&self, image_id: i64) -> Result<ImageBlob> {
        let resp = http::send(self.http.get(&format!("/images/{}", image_id))).await?;
        read_blob(resp).await
    }

    /// 이미지 다운로드 (파일 이름 포함)
    pub async fn download_image(&self, image_id: i64) -> Result<ImageDownload> {
        let resp = http::send(self.http.get(&format!("/images/{}/download", image_id))).await?;

        let file_name = resp
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(content_disposition_file_name);

        let blob = read_blob(resp).await?;
        Ok(ImageDownload { blob, file_name })
    }
}

async fn read_blob(resp: Response) -> Result<ImageBlob> {
    let mime_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_string();
    let bytes = resp.bytes().await?.to_vec();
    Ok(ImageBlob { bytes, mime_type })
}

/// `Content-Disposition` 헤더에서 파일 이름 추출
pub fn content_disposition_file_name(value: &str) -> Option<String> {
    value.split(';').map(str::trim).find_map(|param| {
        let (key, raw) = param.split_once('=')?;
        if !key.trim().eq_ignore_ascii_case("filename") {
            return None;
        }
        let name = raw.trim().trim_matches('"');
        (!name.is_empty()).then(|| name.to_string())
    })
}
