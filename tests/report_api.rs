//! Integration tests for POST /api/send-report

mod common;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use common::{MultipartBuilder, TestApp};
use serde_json::{json, Value};

fn json_request(body: Value) -> Request<Body> {
    Request::post("/api/send-report")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn json_report_is_relayed() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(json_request(json!({
            "title": "Road Repair",
            "county": "Nakuru",
            "details": "Potholes"
        })))
        .await;

    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["message"], "Report sent successfully");

    let sent = app.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "New Report Submission: Road Repair");
    assert_eq!(sent[0].to, "admin@counties.example");
    assert_eq!(sent[0].text, "Project Title: Road Repair\nCounty: Nakuru\nDetails: Potholes");
    assert!(sent[0].attachments.is_empty());
}

#[tokio::test]
async fn referenced_attachments_are_fetched() {
    let app = TestApp::new().await;

    let (status, _) = app
        .send(json_request(json!({
            "title": "Bridge",
            "county": "Busia",
            "details": "Cracked deck",
            "documents": { "name": "bq.pdf", "path": format!("{}/files/bq.pdf", app.backend_url) }
        })))
        .await;

    assert_eq!(status, StatusCode::OK);
    let sent = app.mailer.sent();
    assert_eq!(sent[0].attachments.len(), 1);
    assert_eq!(sent[0].attachments[0].filename, "bq.pdf");
    assert_eq!(app.backend.requests()[0].path, "/files/bq.pdf");
}

#[tokio::test]
async fn local_paths_are_refused() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(json_request(json!({
            "title": "Bridge",
            "images": { "name": "passwd", "path": "/etc/passwd" }
        })))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["message"], "Error sending report");
    assert!(app.mailer.sent().is_empty());
}

#[tokio::test]
async fn multipart_report_carries_uploads() {
    let app = TestApp::new().await;
    let request = MultipartBuilder::default()
        .text("title", "Market")
        .text("county", "Kisumu")
        .text("details", "Roof leaks")
        .file("documents", "report.pdf", "application/pdf", b"%PDF")
        .request("/api/send-report");

    let (status, _) = app.send(request).await;
    assert_eq!(status, StatusCode::OK);

    let sent = app.mailer.sent();
    assert_eq!(sent[0].attachments[0].content_type, "application/pdf");
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let app = TestApp::new().await;
    let request = Request::post("/api/send-report")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["message"], "Malformed payload");
    assert!(app.mailer.sent().is_empty());
}

#[tokio::test]
async fn other_methods_are_not_allowed() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/send-report").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["message"], "Method not allowed");
}

#[tokio::test]
async fn oversized_referenced_attachment_is_refused() {
    let app = TestApp::new().await;
    app.backend.respond(
        Method::GET,
        "/files/huge.bin",
        StatusCode::OK,
        Value::String("a".repeat(15 * 1024 * 1024)),
    );

    let (status, body) = app
        .send(json_request(json!({
            "title": "Bridge",
            "county": "Busia",
            "details": "Cracked deck",
            "documents": { "name": "huge.bin", "path": format!("{}/files/huge.bin", app.backend_url) }
        })))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["message"], "Error sending report");
    assert!(body["error"].as_str().unwrap_or_default().contains("larger than"));
    assert!(app.mailer.sent().is_empty());
}
