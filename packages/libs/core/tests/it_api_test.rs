//! Integration tests for the winners and images REST wrappers

use std::sync::Arc;

use chrono::NaiveDate;
use mockito::{Matcher, Server, ServerGuard};
use raul_core::api::{ImageUpload, ImagesApi, WinnerUpload, WinnersApi};
use raul_core::{Error, HttpClient, MemoryTokenStore};

fn http(server: &ServerGuard, token: Option<&str>) -> HttpClient {
    let store = match token {
        Some(token) => MemoryTokenStore::with_session(token, Some("ADMIN")),
        None => MemoryTokenStore::new(),
    };
    HttpClient::new(format!("{}/api", server.url()), Arc::new(store))
        .expect("Failed to build http client")
}

fn sunday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

#[tokio::test]
async fn current_winners_with_token() {
    //* Given
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/weekly-winners/current")
        .match_header("authorization", "Bearer T")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[
                {"id":1,"sundayDate":"2026-10-18","type":"PHOTO","image":{"id":10,"title":"Sunset"}},
                {"id":2,"sundayDate":"2026-10-18","type":"MEME"}
            ]"#,
        )
        .expect(1)
        .create_async()
        .await;

    //* When
    let winners = WinnersApi::new(http(&server, Some("T")))
        .current()
        .await
        .expect("Failed to fetch winners");

    //* Then
    mock.assert_async().await;
    assert_eq!(winners.len(), 2);
    assert_eq!(winners[0].image.as_ref().map(|i| i.id), Some(10));
    assert!(winners[1].image.is_none());
}

#[tokio::test]
async fn requests_without_token_carry_no_authorization() {
    //* Given
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/weekly-winners/all")
        .match_header("authorization", Matcher::Missing)
        .with_status(401)
        .with_body(r#"{"success":false,"message":"Unauthorized"}"#)
        .expect(1)
        .create_async()
        .await;

    //* When
    let result = WinnersApi::new(http(&server, None)).all().await;

    //* Then
    mock.assert_async().await;
    match result {
        Err(err @ Error::Status { status: 401, .. }) => assert!(err.is_unauthorized()),
        other => panic!("Expected 401, got {:?}", other),
    }
}

#[tokio::test]
async fn by_date_sends_sunday_query() {
    //* Given
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/weekly-winners/by-date")
        .match_query(Matcher::UrlEncoded(
            "sundayDate".into(),
            "2026-10-18".into(),
        ))
        .with_status(200)
        .with_body("[]")
        .expect(1)
        .create_async()
        .await;

    //* When
    let winners = WinnersApi::new(http(&server, Some("T")))
        .by_date(sunday())
        .await
        .expect("Failed to fetch winners by date");

    //* Then
    mock.assert_async().await;
    assert!(winners.is_empty());
}

#[tokio::test]
async fn create_sends_multipart_form() {
    //* Given
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/weekly-winners/create")
        .match_header("authorization", "Bearer T")
        .match_header("content-type", Matcher::Regex("^multipart/form-data".into()))
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="sundayDate"\r\n\r\n2026-10-18"#.into()),
            Matcher::Regex(r#"name="type"\r\n\r\nPHOTO"#.into()),
            Matcher::Regex(r#"name="image"; filename="sunset.png""#.into()),
            Matcher::Regex(r#"name="title"\r\n\r\nSunset"#.into()),
        ]))
        .with_status(200)
        .with_body(r#"{"success":true,"message":"Weekly winner created successfully","winnerId":5,"imageId":9}"#)
        .expect(1)
        .create_async()
        .await;

    let upload = WinnerUpload {
        sunday_date: sunday(),
        kind: "PHOTO".to_string(),
        image: ImageUpload::new(b"PNGDATA".to_vec(), "sunset.png"),
        title: Some("Sunset".to_string()),
    };

    //* When
    let msg = WinnersApi::new(http(&server, Some("T")))
        .create(upload)
        .await
        .expect("Failed to create winner");

    //* Then
    mock.assert_async().await;
    assert_eq!(msg.get_i64("winnerId"), Some(5));
    assert_eq!(msg.get_i64("imageId"), Some(9));
}

#[tokio::test]
async fn create_conflict_surfaces_api_error() {
    //* Given
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/weekly-winners/create")
        .with_status(409)
        .with_body(r#"{"success":false,"message":"A winner entry for PHOTO already exists"}"#)
        .create_async()
        .await;

    let upload = WinnerUpload {
        sunday_date: sunday(),
        kind: "PHOTO".to_string(),
        image: ImageUpload::new(vec![1, 2, 3], "a.jpg"),
        title: None,
    };

    //* When
    let result = WinnersApi::new(http(&server, Some("T"))).create(upload).await;

    //* Then
    match result {
        Err(Error::Api { status, message }) => {
            assert_eq!(status, 409);
            assert!(message.contains("already exists"));
        }
        other => panic!("Expected api error, got {:?}", other),
    }
}

#[tokio::test]
async fn delete_rejects_non_sunday_without_request() {
    //* Given
    let mut server = Server::new_async().await;
    let mock = server
        .mock("DELETE", "/api/weekly-winners/delete")
        .expect(0)
        .create_async()
        .await;
    let wednesday = NaiveDate::from_ymd_opt(2026, 10, 21).unwrap();

    //* When
    let result = WinnersApi::new(http(&server, Some("T")))
        .delete(wednesday, "PHOTO")
        .await;

    //* Then
    mock.assert_async().await;
    assert!(matches!(result, Err(Error::NotSunday { .. })));
}

#[tokio::test]
async fn delete_sends_date_and_type() {
    //* Given
    let mut server = Server::new_async().await;
    let mock = server
        .mock("DELETE", "/api/weekly-winners/delete")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("sundayDate".into(), "2026-10-18".into()),
            Matcher::UrlEncoded("type".into(), "MEME".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"success":true,"message":"Weekly winner deleted successfully"}"#)
        .expect(1)
        .create_async()
        .await;

    //* When
    let msg = WinnersApi::new(http(&server, Some("T")))
        .delete(sunday(), "MEME")
        .await
        .expect("Failed to delete winner");

    //* Then
    mock.assert_async().await;
    assert_eq!(msg.message.as_deref(), Some("Weekly winner deleted successfully"));
}

#[tokio::test]
async fn fetch_image_degrades_to_none() {
    //* Given
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/images/42")
        .with_status(404)
        .expect(1)
        .create_async()
        .await;

    //* When
    let image = ImagesApi::new(http(&server, Some("T"))).fetch_image(42).await;

    //* Then
    mock.assert_async().await;
    assert!(image.is_none());
}

#[tokio::test]
async fn download_image_reads_file_name() {
    //* Given
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/images/7/download")
        .match_header("authorization", "Bearer T")
        .with_status(200)
        .with_header("content-type", "image/png")
        .with_header("content-disposition", r#"attachment; filename="Sunset.png""#)
        .with_body([1u8, 2, 3])
        .expect(1)
        .create_async()
        .await;

    let images = ImagesApi::new(http(&server, Some("T")));

    //* When
    let download = images.download_image(7).await.expect("Failed to download image");

    //* Then
    mock.assert_async().await;
    assert_eq!(download.file_name.as_deref(), Some("Sunset.png"));
    assert_eq!(download.blob.mime_type, "image/png");
    assert_eq!(download.blob.bytes, vec![1, 2, 3]);
    assert_eq!(images.image_url(7), format!("{}/api/images/7", server.url()));
}
