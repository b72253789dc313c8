//! REST API 데이터 타입

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 주간 수상자
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyWinner {
    pub id: i64,

    /// 기준 일요일
    pub sunday_date: NaiveDate,

    /// 수상 부문
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageSummary>,
}

/// 수상자에 연결된 이미지 요약
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSummary {
    pub id: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_date: Option<String>,
}

/// 변경 요청 응답 (`{success, message, ...}`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// winnerId, imageId, action 등 추가 필드
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiMessage {
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.extra.get(key).and_then(Value::as_i64)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(Value::as_str)
    }
}

/// 업로드할 이미지 파일
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub mime_type: String,
}

impl ImageUpload {
    /// 파일 이름 확장자로 MIME 타입 추정
    pub fn new(bytes: Vec<u8>, file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        let mime_type = mime_from_file_name(&file_name).to_string();
        Self {
            bytes,
            file_name,
            mime_type,
        }
    }
}

/// 수상자 등록/교체 요청
#[derive(Debug, Clone)]
pub struct WinnerUpload {
    pub sunday_date: NaiveDate,
    pub kind: String,
    pub image: ImageUpload,
    pub title: Option<String>,
}

/// 이미지 바이트
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBlob {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

/// 다운로드한 이미지
#[derive(Debug, Clone, PartialEq)]
pub struct ImageDownload {
    pub blob: ImageBlob,
    /// `Content-Disposition`의 파일 이름
    pub file_name: Option<String>,
}

pub fn mime_from_file_name(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winner_from_server_json() {
        let json = r#"{
            "id": 7,
            "sundayDate": "2026-10-18",
            "type": "PHOTO",
            "image": { "id": 11, "title": "Winner for 2026-10-18", "mimeType": "image/png" }
        }"#;
        let winner: WeeklyWinner = serde_json::from_str(json).unwrap();
        assert_eq!(winner.kind, "PHOTO");
        assert_eq!(winner.sunday_date, NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());
        assert_eq!(winner.image.unwrap().mime_type.as_deref(), Some("image/png"));
    }

    #[test]
    fn test_api_message_extra_fields() {
        let json = r#"{"success":true,"message":"ok","winnerId":3,"action":"updated"}"#;
        let msg: ApiMessage = serde_json::from_str(json).unwrap();
        assert!(msg.success);
        assert_eq!(msg.get_i64("winnerId"), Some(3));
        assert_eq!(msg.get_str("action"), Some("updated"));
    }

    #[test]
    fn test_mime_from_file_name() {
        assert_eq!(mime_from_file_name("cat.JPG"), "image/jpeg");
        assert_eq!(mime_from_file_name("noext"), "application/octet-stream");
    }
}
