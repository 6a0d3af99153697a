/// Public pages
///
/// Read-only pages anyone can browse, plus the report form. Fetch failures are
/// rendered inline on the page; nothing here panics on a backend error.

use crate::api::report::{deliver_report, submission_from_form};
use crate::api::{AppState, UPLOAD_BODY_LIMIT};
use crate::baas::{County, Project, Query, Resource};
use crate::forms::schemas::report_schema;
use crate::forms::FormInput;
use crate::views::public as pages;
use crate::views::widgets::Feedback;
use crate::views::{encode_component, error_page, not_found_page};
use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
    response::{Html, Redirect},
    routing::{get, Router},
};

const REPORT_SENT: &str = "Report submitted successfully!";
const REPORT_FAILED: &str = "Error submitting report. Please try again.";

/// Create public routes
pub fn create_public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/counties/{slug}", get(county_projects))
        .route("/projects/{id}", get(project_details))
        .route(
            "/submit-report",
            get(report_form)
                .post(submit_report)
                .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/report-project", get(report_project))
}

/// List counties
///
/// GET /
async fn home(State(state): State<AppState>) -> (StatusCode, Html<String>) {
    let counties = state
        .baas
        .select::<County>(&Query::new(Resource::Counties).select("*"))
        .await;

    let status = match &counties {
        Ok(list) => {
            tracing::debug!("📋 Loaded {} counties", list.len());
            StatusCode::OK
        }
        Err(e) => {
            tracing::warn!("⚠️ Failed to load counties: {}", e);
            StatusCode::BAD_GATEWAY
        }
    };
    (status, Html(pages::home_page(&counties)))
}

/// Verified projects of one county
///
/// GET /counties/{slug}
async fn county_projects(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> (StatusCode, Html<String>) {
    let query = Query::new(Resource::Projects)
        .select("*")
        .eq("county", &slug)
        .eq("verified", true);
    let projects = state.baas.select::<Project>(&query).await;

    let status = match &projects {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!("⚠️ Failed to load projects for {}: {}", slug, e);
            StatusCode::BAD_GATEWAY
        }
    };
    (status, Html(pages::county_page(&slug, &projects)))
}

/// Project details
///
/// GET /projects/{id}
async fn project_details(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> (StatusCode, Html<String>) {
    match state
        .baas
        .select_one::<Project>(&Query::by_id(Resource::Projects, &id))
        .await
    {
        Ok(Some(project)) => {
            let share_url = state.site.project_url(&encode_component(project.id.as_str()));
            (StatusCode::OK, Html(pages::project_page(&project, &share_url)))
        }
        Ok(None) => (StatusCode::NOT_FOUND, Html(not_found_page("Project not found"))),
        Err(e) => {
            tracing::warn!("⚠️ Failed to load project {}: {}", id, e);
            (
                StatusCode::BAD_GATEWAY,
                Html(error_page("Project", "Error loading project details", &e)),
            )
        }
    }
}

/// GET /submit-report
async fn report_form() -> Html<String> {
    Html(pages::report_form_page(&FormInput::new(), &Feedback::default()))
}

/// Validate and relay a report
///
/// POST /submit-report (multipart)
/// Invalid input is re-rendered with field errors and never reaches the relay.
async fn submit_report(
    State(state): State<AppState>,
    multipart: Multipart,
) -> (StatusCode, Html<String>) {
    let mut input = match FormInput::from_multipart(multipart).await {
        Ok(input) => input,
        Err(e) => {
            tracing::warn!("⚠️ Unreadable report form: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                Html(pages::report_form_page(&FormInput::new(), &Feedback::failure(REPORT_FAILED))),
            );
        }
    };

    if let Err(errors) = report_schema().validate(&input) {
        tracing::info!("📋 Report form rejected: {}", errors);
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(pages::report_form_page(&input, &Feedback::invalid(&errors))),
        );
    }

    let submission = submission_from_form(&mut input);
    match deliver_report(&state, submission).await {
        Ok(()) => (
            StatusCode::OK,
            Html(pages::report_form_page(&FormInput::new(), &Feedback::success(REPORT_SENT))),
        ),
        Err(e) => {
            tracing::error!("❌ Report form submission failed: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Html(pages::report_form_page(&input, &Feedback::failure(REPORT_FAILED))),
            )
        }
    }
}

/// Old project-report path, kept as a permanent redirect to the report form
///
/// GET /report-project
async fn report_project() -> Redirect {
    Redirect::permanent("/submit-report")
}
