/// Admin dashboard
///
/// County management and project review. Every mutation is issued together
/// with a fresh read of the list it affects; the mutation's own result is then
/// applied to that list by id, so the rendered page reflects the change even
/// when the read raced ahead of it.

use crate::api::{AppState, UPLOAD_BODY_LIMIT};
use crate::baas::{
    slugify, County, CountyDraft, FetchError, MultipartBody, Payload, Project, ProjectStatus, Query,
    RecordId, Resource,
};
use crate::forms::schemas::{county_schema, project_schema};
use crate::forms::FormInput;
use crate::view_state::KeyedList;
use crate::views::dashboard::{self as pages, CountiesView, CountyForm, ProjectEditView};
use crate::views::widgets::Feedback;
use crate::views::{error_page, not_found_page};
use axum::{
    extract::{DefaultBodyLimit, Form, Multipart, Path, Query as UrlQuery, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post, Router},
};
use serde::Deserialize;
use std::collections::HashMap;

const VERIFIED_LIST: &str = "/dashboard/projects/verified";
const PROJECT_UPDATE_FAILED: &str = "Error updating project. Please try again.";

/// Create dashboard routes
pub fn create_dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(index))
        .route("/dashboard/counties", get(counties).post(create_county))
        .route("/dashboard/counties/{id}", post(update_county))
        .route("/dashboard/counties/{id}/delete", post(delete_county))
        .route("/dashboard/projects", get(projects_index))
        .route("/dashboard/projects/verified", get(verified_projects))
        .route("/dashboard/projects/unverified", get(unverified_projects))
        .route(
            "/dashboard/projects/{id}",
            get(edit_project)
                .post(update_project)
                .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/dashboard/projects/{id}/delete", post(delete_project))
}

async fn index() -> Html<String> {
    Html(pages::dashboard_index())
}

/// `?edit=<id>` opens the edit form, `?delete=<id>` the delete confirmation
#[derive(Debug, Default, Deserialize)]
struct CountySelection {
    edit: Option<String>,
    delete: Option<String>,
}

fn counties_query() -> Query {
    Query::new(Resource::Counties).select("*")
}

fn split_list(result: Result<Vec<County>, FetchError>) -> (Vec<County>, Option<FetchError>) {
    match result {
        Ok(counties) => (counties, None),
        Err(e) => {
            tracing::warn!("⚠️ Failed to load counties: {}", e);
            (Vec::new(), Some(e))
        }
    }
}

fn find_county<'a>(counties: &'a [County], id: &str) -> Option<&'a County> {
    counties.iter().find(|county| county.id.as_str() == id)
}

fn county_draft(input: &FormInput, slug: Option<String>) -> CountyDraft {
    CountyDraft {
        name: input.trimmed("name").to_string(),
        slug,
        county_number: input.trimmed("county_number").parse().unwrap_or_default(),
        description: input.text("description").to_string(),
    }
}

/// Manage counties
///
/// GET /dashboard/counties
async fn counties(
    State(state): State<AppState>,
    UrlQuery(selection): UrlQuery<CountySelection>,
) -> Html<String> {
    let (counties, load_error) = split_list(state.baas.select::<County>(&counties_query()).await);

    let mut view = CountiesView::new(&counties);
    view.load_error = load_error.as_ref();
    if let Some(county) = selection.edit.as_deref().and_then(|id| find_county(&counties, id)) {
        view.form = CountyForm::Edit(county);
        view.values = pages::county_values(county);
    }
    view.confirm_delete = selection.delete.as_deref().and_then(|id| find_county(&counties, id));

    Html(pages::counties_page(&view))
}

/// Create a county; its slug is derived from the name
///
/// POST /dashboard/counties
async fn create_county(
    State(state): State<AppState>,
    Form(fields): Form<HashMap<String, String>>,
) -> (StatusCode, Html<String>) {
    let input = FormInput::from_fields(fields);

    if let Err(errors) = county_schema().validate(&input) {
        let (counties, load_error) = split_list(state.baas.select::<County>(&counties_query()).await);
        let mut view = CountiesView::new(&counties);
        view.load_error = load_error.as_ref();
        view.values = input;
        view.feedback = Feedback::invalid(&errors);
        return (StatusCode::UNPROCESSABLE_ENTITY, Html(pages::counties_page(&view)));
    }

    let draft = county_draft(&input, Some(slugify(input.trimmed("name"))));
    let created = async {
        let payload = Payload::json(&draft)?;
        state.baas.insert::<County>(Resource::Counties, payload).await
    };
    let listing = counties_query();
    let (created, listed) = tokio::join!(created, state.baas.select::<County>(&listing));
    let (counties, load_error) = split_list(listed);

    match created {
        Ok(rows) => {
            let list = rows
                .into_iter()
                .fold(KeyedList::new(counties), |list, county| {
                    tracing::info!("✅ County created: {} ({})", county.name, county.id);
                    list.apply_created(county)
                })
                .into_items();
            let mut view = CountiesView::new(&list);
            view.load_error = load_error.as_ref();
            view.feedback = Feedback::success("County created successfully.");
            (StatusCode::OK, Html(pages::counties_page(&view)))
        }
        Err(e) => {
            tracing::error!("❌ Failed to create county '{}': {}", draft.name, e);
            let mut view = CountiesView::new(&counties);
            view.load_error = load_error.as_ref();
            view.values = input;
            view.feedback = Feedback::failure(format!("Error creating county: {}", e));
            (StatusCode::BAD_GATEWAY, Html(pages::counties_page(&view)))
        }
    }
}

/// Edit a county; the slug is left as it was
///
/// POST /dashboard/counties/{id}
async fn update_county(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(fields): Form<HashMap<String, String>>,
) -> (StatusCode, Html<String>) {
    let input = FormInput::from_fields(fields);

    if let Err(errors) = county_schema().validate(&input) {
        let (counties, load_error) = split_list(state.baas.select::<County>(&counties_query()).await);
        let mut view = CountiesView::new(&counties);
        view.load_error = load_error.as_ref();
        if let Some(county) = find_county(&counties, &id) {
            view.form = CountyForm::Edit(county);
        }
        view.values = input;
        view.feedback = Feedback::invalid(&errors);
        return (StatusCode::UNPROCESSABLE_ENTITY, Html(pages::counties_page(&view)));
    }

    let draft = county_draft(&input, None);
    let target = Query::by_id(Resource::Counties, &id);
    let updated = async {
        let payload = Payload::json(&draft)?;
        state.baas.update::<County>(&target, payload).await
    };
    let listing = counties_query();
    let (updated, listed) = tokio::join!(updated, state.baas.select::<County>(&listing));
    let (counties, load_error) = split_list(listed);

    match updated {
        Ok(rows) => {
            let list = rows
                .into_iter()
                .fold(KeyedList::new(counties), |list, county| {
                    tracing::info!("✅ County updated: {} ({})", county.name, county.id);
                    list.apply_updated(county)
                })
                .into_items();
            let mut view = CountiesView::new(&list);
            view.load_error = load_error.as_ref();
            view.feedback = Feedback::success("County updated successfully.");
            (StatusCode::OK, Html(pages::counties_page(&view)))
        }
        Err(e) => {
            tracing::error!("❌ Failed to update county {}: {}", id, e);
            let mut view = CountiesView::new(&counties);
            view.load_error = load_error.as_ref();
            if let Some(county) = find_county(&counties, &id) {
                view.form = CountyForm::Edit(county);
            }
            view.values = input;
            view.feedback = Feedback::failure(format!("Error updating county: {}", e));
            (StatusCode::BAD_GATEWAY, Html(pages::counties_page(&view)))
        }
    }
}

/// Delete a county after confirmation
///
/// POST /dashboard/counties/{id}/delete
async fn delete_county(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> (StatusCode, Html<String>) {
    let target = Query::by_id(Resource::Counties, &id);
    let listing = counties_query();
    let (deleted, listed) = tokio::join!(
        state.baas.delete(&target),
        state.baas.select::<County>(&listing)
    );
    let (counties, load_error) = split_list(listed);

    match deleted {
        Ok(()) => {
            tracing::info!("🗑️ County deleted: {}", id);
            let list = KeyedList::new(counties)
                .apply_deleted(&RecordId::new(id))
                .into_items();
            let mut view = CountiesView::new(&list);
            view.load_error = load_error.as_ref();
            view.feedback = Feedback::success("County deleted successfully.");
            (StatusCode::OK, Html(pages::counties_page(&view)))
        }
        Err(e) => {
            tracing::error!("❌ Failed to delete county {}: {}", id, e);
            let mut view = CountiesView::new(&counties);
            view.load_error = load_error.as_ref();
            view.feedback = Feedback::failure(format!("Error deleting county: {}", e));
            (StatusCode::BAD_GATEWAY, Html(pages::counties_page(&view)))
        }
    }
}

async fn projects_index() -> Html<String> {
    Html(pages::projects_index())
}

/// GET /dashboard/projects/verified
async fn verified_projects(State(state): State<AppState>) -> (StatusCode, Html<String>) {
    project_list(&state, true).await
}

/// GET /dashboard/projects/unverified
async fn unverified_projects(State(state): State<AppState>) -> (StatusCode, Html<String>) {
    project_list(&state, false).await
}

async fn project_list(state: &AppState, verified: bool) -> (StatusCode, Html<String>) {
    let query = Query::new(Resource::Projects)
        .select("*")
        .eq("verified", verified);
    let projects = state.baas.select::<Project>(&query).await;

    let status = match &projects {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!("⚠️ Failed to load projects (verified={}): {}", verified, e);
            StatusCode::BAD_GATEWAY
        }
    };
    (status, Html(pages::project_list_page(verified, &projects)))
}

/// Load the project with the county and status choices and render its edit form
///
/// `values` overrides the stored project's values when re-rendering a submission.
async fn render_project_form(
    state: &AppState,
    id: &str,
    values: Option<&FormInput>,
    feedback: Feedback<'_>,
    status: StatusCode,
) -> (StatusCode, Html<String>) {
    let listing = counties_query();
    let status_names = Query::new(Resource::ProjectStatus).select("status_name");
    let target = Query::by_id(Resource::Projects, id);
    let (counties, statuses, project) = tokio::join!(
        state.baas.select::<County>(&listing),
        state.baas.select::<ProjectStatus>(&status_names),
        state.baas.select_one::<Project>(&target),
    );

    let project = match project {
        Ok(Some(project)) => project,
        Ok(None) => return (StatusCode::NOT_FOUND, Html(not_found_page("Project not found"))),
        Err(e) => {
            tracing::warn!("⚠️ Failed to load project {}: {}", id, e);
            return (
                StatusCode::BAD_GATEWAY,
                Html(error_page("Edit Project", "Error fetching project details", &e)),
            );
        }
    };

    let counties = counties.unwrap_or_else(|e| {
        tracing::warn!("⚠️ Failed to load counties: {}", e);
        Vec::new()
    });
    let statuses = statuses.unwrap_or_else(|e| {
        tracing::warn!("⚠️ Failed to load project statuses: {}", e);
        Vec::new()
    });

    let stored = pages::project_values(&project);
    let view = ProjectEditView {
        project: &project,
        counties: &counties,
        statuses: &statuses,
        values: values.unwrap_or(&stored),
        feedback,
    };
    (status, Html(pages::project_edit_page(&view)))
}

/// GET /dashboard/projects/{id}
async fn edit_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> (StatusCode, Html<String>) {
    render_project_form(&state, &id, None, Feedback::default(), StatusCode::OK).await
}

/// Build the multipart update; files are only sent when new ones were chosen
fn project_update_body(input: &mut FormInput) -> MultipartBody {
    let mut body = MultipartBody::new()
        .text("title", input.trimmed("title"))
        .text("county", input.text("county"))
        .text("status", input.text("status"))
        .text("description", input.text("description"))
        .text("verified", input.checked("verified").to_string());

    for field in ["docs", "images"] {
        if let Some(file) = input.take_file(field) {
            body = body.file(field, &file.file_name, &file.content_type, file.data);
        }
    }
    body
}

/// Update a project, then return to the verified list
///
/// POST /dashboard/projects/{id} (multipart)
async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Response {
    let mut input = match FormInput::from_multipart(multipart).await {
        Ok(input) => input,
        Err(e) => {
            tracing::warn!("⚠️ Unreadable project form for {}: {}", id, e);
            return render_project_form(
                &state,
                &id,
                None,
                Feedback::failure(PROJECT_UPDATE_FAILED),
                StatusCode::BAD_REQUEST,
            )
            .await
            .into_response();
        }
    };

    if let Err(errors) = project_schema().validate(&input) {
        return render_project_form(
            &state,
            &id,
            Some(&input),
            Feedback::invalid(&errors),
            StatusCode::UNPROCESSABLE_ENTITY,
        )
        .await
        .into_response();
    }

    let body = project_update_body(&mut input);
    let target = Query::by_id(Resource::Projects, &id);
    match state
        .baas
        .update::<serde_json::Value>(&target, Payload::Multipart(body))
        .await
    {
        Ok(_) => {
            tracing::info!("✅ Project {} updated", id);
            Redirect::to(VERIFIED_LIST).into_response()
        }
        Err(e) => {
            tracing::error!("❌ Failed to update project {}: {}", id, e);
            render_project_form(
                &state,
                &id,
                Some(&input),
                Feedback::failure(PROJECT_UPDATE_FAILED),
                StatusCode::BAD_GATEWAY,
            )
            .await
            .into_response()
        }
    }
}

/// Delete a project, then return to the verified list
///
/// POST /dashboard/projects/{id}/delete
async fn delete_project(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state
        .baas
        .delete(&Query::by_id(Resource::Projects, &id))
        .await
    {
        Ok(()) => {
            tracing::info!("🗑️ Project deleted: {}", id);
            Redirect::to(VERIFIED_LIST).into_response()
        }
        Err(e) => {
            tracing::error!("❌ Failed to delete project {}: {}", id, e);
            (
                StatusCode::BAD_GATEWAY,
                Html(error_page("Delete Project", "Error deleting project", &e)),
            )
                .into_response()
        }
    }
}
