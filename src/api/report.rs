/// Report-submission endpoint
///
/// POST /api/send-report relays a report to the configured recipient by email.
/// Each call is one synchronous send attempt: read body, build message, send,
/// respond. The public report form reuses `deliver_report` after validation.

use crate::api::{AppState, UPLOAD_BODY_LIMIT};
use crate::forms::FormInput;
use crate::mail::{attachments, EmailAttachment, MailError, ReportAttachment, ReportEmail, ReportSubmission};
use axum::{
    extract::{DefaultBodyLimit, FromRequest, Multipart, Request, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{post, Router},
};
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

/// Report endpoint failures, mapped onto the endpoint's status codes
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error(transparent)]
    Mail(#[from] MailError),
}

impl IntoResponse for ReportError {
    fn into_response(self) -> Response {
        match self {
            ReportError::MalformedPayload(reason) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": "Malformed payload", "error": reason })),
            )
                .into_response(),
            ReportError::Mail(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": "Error sending report", "error": e.to_string() })),
            )
                .into_response(),
        }
    }
}

/// JSON form of a report; attachments are referenced by name and URL
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ReportPayload {
    pub title: String,
    pub county: String,
    pub details: String,
    pub images: Option<AttachmentRef>,
    pub documents: Option<AttachmentRef>,
}

#[derive(Debug, Deserialize)]
pub struct AttachmentRef {
    pub name: String,
    pub path: String,
}

impl ReportPayload {
    pub fn into_submission(self) -> ReportSubmission {
        let attachments = [self.images, self.documents]
            .into_iter()
            .flatten()
            .map(|r| ReportAttachment::Remote { name: r.name, path: r.path })
            .collect();
        ReportSubmission {
            title: self.title,
            county: self.county,
            details: self.details,
            attachments,
        }
    }
}

/// Build a submission from a validated report form, moving uploads into attachments
pub fn submission_from_form(input: &mut FormInput) -> ReportSubmission {
    let attachments = ["images", "documents"]
        .into_iter()
        .filter_map(|field| input.take_file(field))
        .map(|file| {
            ReportAttachment::Inline(EmailAttachment {
                filename: file.file_name,
                content_type: file.content_type,
                content: file.data,
            })
        })
        .collect();

    ReportSubmission {
        title: input.text("title").to_string(),
        county: input.text("county").to_string(),
        details: input.text("details").to_string(),
        attachments,
    }
}

/// Create report routes
///
/// Only POST is served; any other method gets a JSON 405.
pub fn create_report_routes() -> Router<AppState> {
    Router::new().route(
        "/api/send-report",
        post(send_report)
            .fallback(method_not_allowed)
            .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
    )
}

/// Resolve attachments, compose the email and send it once
pub async fn deliver_report(state: &AppState, submission: ReportSubmission) -> Result<(), ReportError> {
    let mut resolved = Vec::with_capacity(submission.attachments.len());
    for attachment in submission.attachments.iter().cloned() {
        resolved.push(attachments::resolve(&state.http, attachment).await?);
    }

    let email = ReportEmail::compose(&state.mail, &submission, resolved);
    if let Err(e) = state.mailer.send(&email).await {
        tracing::error!("❌ Failed to send report '{}': {}", submission.title, e);
        return Err(e.into());
    }

    tracing::info!(
        "✅ Report '{}' ({}) sent with {} attachment(s)",
        submission.title,
        submission.county,
        email.attachments.len()
    );
    Ok(())
}

/// Send a report
///
/// POST /api/send-report
/// Body: multipart form, or JSON { "title", "county", "details", "images"?: {name, path}, "documents"?: {name, path} }
/// Returns: { "message": "Report sent successfully" }
async fn send_report(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<Value>, ReportError> {
    let submission = read_submission(request).await?;
    tracing::info!("📥 Report received: {} ({})", submission.title, submission.county);

    deliver_report(&state, submission).await?;
    Ok(Json(json!({ "message": "Report sent successfully" })))
}

async fn method_not_allowed() -> (StatusCode, Json<Value>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "message": "Method not allowed" })),
    )
}

async fn read_submission(request: Request) -> Result<ReportSubmission, ReportError> {
    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("multipart/form-data"));

    if is_multipart {
        let multipart = Multipart::from_request(request, &())
            .await
            .map_err(|e| ReportError::MalformedPayload(e.to_string()))?;
        let mut input = FormInput::from_multipart(multipart)
            .await
            .map_err(|e| ReportError::MalformedPayload(e.to_string()))?;
        Ok(submission_from_form(&mut input))
    } else {
        let Json(payload) = Json::<ReportPayload>::from_request(request, &())
            .await
            .map_err(|e| ReportError::MalformedPayload(e.to_string()))?;
        Ok(payload.into_submission())
    }
}
