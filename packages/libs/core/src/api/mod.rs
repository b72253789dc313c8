//! REST API 클라이언트
//!
//! 각 메서드는 `HttpClient` 호출 하나에 대응합니다. 변환 로직은 두지 않습니다.

mod images;
mod models;
mod winners;

pub use images::{content_disposition_file_name, ImagesApi};
pub use models::{
    mime_from_file_name, ApiMessage, ImageBlob, ImageDownload, ImageSummary, ImageUpload,
    WeeklyWinner, WinnerUpload,
};
pub use winners::WinnersApi;
