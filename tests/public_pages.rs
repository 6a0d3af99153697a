//! Integration tests for the public pages and the report form
//!
//! Runs the full router against a recording fake backend:
//! - County and project pages and the filters they send
//! - Report form validation and delivery

mod common;

use axum::http::{Method, StatusCode};
use common::{MultipartBuilder, TestApp, API_KEY, APP_URL};
use serde_json::json;

#[tokio::test]
async fn home_lists_counties_from_the_backend() {
    let app = TestApp::new().await;
    app.backend.respond(
        Method::GET,
        "/rest/v1/counties",
        StatusCode::OK,
        json!([{ "id": 1, "name": "Busia", "slug": "busia", "county_number": 40 }]),
    );

    let (status, body) = app.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"<a href="/counties/busia">Busia</a>"#));

    let requests = app.backend.requests_to(Method::GET, "/rest/v1/counties");
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].headers.get("apikey").map(String::as_str), Some(API_KEY));
    assert_eq!(
        requests[0].headers.get("authorization").map(String::as_str),
        Some(format!("Bearer {}", API_KEY).as_str())
    );
}

#[tokio::test]
async fn county_page_asks_for_verified_projects_of_that_county() {
    let app = TestApp::new().await;
    app.backend.respond(
        Method::GET,
        "/rest/v1/projects",
        StatusCode::OK,
        json!([{ "id": 7, "title": "Water Dam", "county": "busia", "description": "Dam works", "verified": true }]),
    );

    let (status, body) = app.get("/counties/busia").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Projects in busia"));
    assert!(body.contains(r#"href="/projects/7""#));

    let requests = app.backend.requests_to(Method::GET, "/rest/v1/projects");
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].param("county"), Some("eq.busia"));
    assert_eq!(requests[0].param("verified"), Some("eq.true"));
}

#[tokio::test]
async fn backend_errors_are_rendered_inline() {
    let app = TestApp::new().await;
    app.backend.respond(
        Method::GET,
        "/rest/v1/projects",
        StatusCode::SERVICE_UNAVAILABLE,
        json!({ "message": "upstream down" }),
    );

    let (status, body) = app.get("/counties/lamu").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.contains("Error loading projects: Request failed with status code 503: upstream down"));
}

#[tokio::test]
async fn unknown_project_is_not_found() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/projects/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Project not found"));

    let requests = app.backend.requests_to(Method::GET, "/rest/v1/projects");
    assert_eq!(requests[0].param("id"), Some("eq.999"));
}

#[tokio::test]
async fn project_page_carries_a_share_link() {
    let app = TestApp::new().await;
    app.backend.respond(
        Method::GET,
        "/rest/v1/projects",
        StatusCode::OK,
        json!([{
            "id": 12,
            "title": "Clinic",
            "county": "kwale",
            "description": "Maternity wing",
            "verified": false,
            "images": ["https://cdn.example/a.png"],
            "docs": "https://cdn.example/plan.pdf"
        }]),
    );

    let (status, body) = app.get("/projects/12").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Verified: </strong>No"));
    assert!(body.contains("Download Document 1"));
    assert!(body.contains(&format!(r#"data-url="{}/projects/12""#, APP_URL)));
}

#[tokio::test]
async fn old_report_path_redirects_permanently() {
    let app = TestApp::new().await;
    let response_status = app.get("/report-project").await.0;
    assert_eq!(response_status, StatusCode::PERMANENT_REDIRECT);
}

#[tokio::test]
async fn valid_report_form_sends_one_email() {
    let app = TestApp::new().await;
    let request = MultipartBuilder::default()
        .text("title", "Road Repair")
        .text("county", "Nakuru")
        .text("details", "Potholes on the bypass")
        .file("images", "road.jpg", "image/jpeg", b"jpeg-bytes")
        .request("/submit-report");

    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Report submitted successfully!"));

    let sent = app.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "New Report Submission: Road Repair");
    assert_eq!(sent[0].attachments.len(), 1);
    assert_eq!(sent[0].attachments[0].filename, "road.jpg");
    assert!(app.backend.requests().is_empty());
}

#[tokio::test]
async fn missing_fields_block_the_report_form() {
    let app = TestApp::new().await;
    let request = MultipartBuilder::default()
        .text("title", "Road Repair")
        .text("county", "")
        .text("details", "Potholes")
        .request("/submit-report");

    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains("County is required"));
    assert!(body.contains("Images are required"));
    assert!(body.contains(r#"value="Road Repair""#));

    assert!(app.mailer.sent().is_empty());
    assert!(app.backend.requests().is_empty());
}

#[tokio::test]
async fn oversized_image_blocks_the_report_form() {
    let app = TestApp::new().await;
    let image = vec![0u8; 5 * 1024 * 1024 + 1];
    let request = MultipartBuilder::default()
        .text("title", "Road Repair")
        .text("county", "Nakuru")
        .text("details", "Potholes")
        .file("images", "huge.jpg", "image/jpeg", &image)
        .request("/submit-report");

    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains("Image should be less than 5 MB"));
    assert!(app.mailer.sent().is_empty());
}

#[tokio::test]
async fn oversized_document_blocks_the_report_form() {
    let app = TestApp::new().await;
    let document = vec![0u8; 15 * 1024 * 1024 + 1];
    let request = MultipartBuilder::default()
        .text("title", "Road Repair")
        .text("county", "Nakuru")
        .text("details", "Potholes")
        .file("images", "road.jpg", "image/jpeg", b"jpeg-bytes")
        .file("documents", "tender.pdf", "application/pdf", &document)
        .request("/submit-report");

    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains("Document should be less than 15 MB"));
    assert!(!body.contains("Image should be less than 5 MB"));
    assert!(app.mailer.sent().is_empty());
}

#[tokio::test]
async fn text_part_named_images_is_not_an_image() {
    let app = TestApp::new().await;
    let request = MultipartBuilder::default()
        .text("title", "Road Repair")
        .text("county", "Nakuru")
        .text("details", "Potholes")
        .text("images", "not-a-file")
        .request("/submit-report");

    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains("Images are required"));
    assert!(app.mailer.sent().is_empty());
}
