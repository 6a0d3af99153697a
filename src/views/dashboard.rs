/// Admin dashboard pages

use crate::baas::{County, FetchError, Project, ProjectStatus};
use crate::forms::FormInput;
use crate::views::widgets::{self, Feedback};
use crate::views::{encode_component, escape, layout};

fn breadcrumb(items: &[(&str, Option<&str>)]) -> String {
    let crumbs: Vec<String> = items
        .iter()
        .map(|(label, url)| match url {
            Some(url) => format!(r#"<a href="{}">{}</a>"#, url, escape(label)),
            None => escape(label),
        })
        .collect();
    format!(r#"<p class="muted">{}</p>"#, crumbs.join(" / "))
}

pub fn dashboard_index() -> String {
    layout(
        "Dashboard",
        r#"<h2>Dashboard</h2>
<ul>
<li><a href="/dashboard/counties">Counties</a></li>
<li><a href="/dashboard/projects">Projects</a></li>
</ul>"#,
    )
}

/// Which form the county dashboard shows
#[derive(Debug)]
pub enum CountyForm<'a> {
    Create,
    Edit(&'a County),
}

/// Everything the county dashboard renders
#[derive(Debug)]
pub struct CountiesView<'a> {
    pub counties: &'a [County],
    pub load_error: Option<&'a FetchError>,
    pub form: CountyForm<'a>,
    pub values: FormInput,
    pub feedback: Feedback<'a>,
    pub confirm_delete: Option<&'a County>,
}

impl<'a> CountiesView<'a> {
    pub fn new(counties: &'a [County]) -> Self {
        Self {
            counties,
            load_error: None,
            form: CountyForm::Create,
            values: FormInput::new(),
            feedback: Feedback::default(),
            confirm_delete: None,
        }
    }
}

/// Pre-fill values for editing a county
pub fn county_values(county: &County) -> FormInput {
    FormInput::new()
        .with_text("name", county.name.clone())
        .with_text("county_number", county.county_number.clone().unwrap_or_default())
        .with_text("description", county.description.clone().unwrap_or_default())
}

pub fn counties_page(view: &CountiesView<'_>) -> String {
    let (action, heading, submit) = match view.form {
        CountyForm::Create => ("/dashboard/counties".to_string(), "Add a county", "Create County"),
        CountyForm::Edit(county) => (
            format!("/dashboard/counties/{}", encode_component(county.id.as_str())),
            "Edit county",
            "Update County",
        ),
    };

    let form = format!(
        r#"<h3>{heading}</h3>
{banners}
<form method="post" action="{action}">
{name}{number}{description}
<button type="submit">{submit}</button>
</form>{switch}"#,
        heading = heading,
        banners = view.feedback.banners(),
        action = action,
        name = widgets::text_input("name", "County Name", &view.values, &view.feedback),
        number = widgets::number_input("county_number", "County Number", &view.values, &view.feedback),
        description = widgets::textarea("description", "Description", &view.values, &view.feedback),
        submit = submit,
        switch = match view.form {
            CountyForm::Edit(_) => r#"<p><a href="/dashboard/counties">Add New County</a></p>"#,
            CountyForm::Create => "",
        },
    );

    let list = match view.load_error {
        Some(e) => format!(
            r#"<p class="error">Error fetching counties: {}</p>"#,
            escape(&e.to_string())
        ),
        None => view
            .counties
            .iter()
            .map(|county| {
                let id = encode_component(county.id.as_str());
                format!(
                    r#"<div class="card"><h3>{name}</h3><p class="muted">{description}</p><a href="/dashboard/counties?edit={id}">Edit</a> <a href="/dashboard/counties?delete={id}">Delete</a></div>"#,
                    name = escape(&county.name),
                    description = escape(county.description.as_deref().unwrap_or("")),
                    id = id,
                )
            })
            .collect(),
    };

    let dialog = view
        .confirm_delete
        .map(|county| {
            format!(
                r#"<div class="dialog" role="dialog"><h3>Are you sure you want to delete <strong>{name}</strong>?</h3>
<form method="post" action="/dashboard/counties/{id}/delete"><a href="/dashboard/counties">Cancel</a> <button type="submit">Delete</button></form></div>"#,
                name = escape(&county.name),
                id = encode_component(county.id.as_str()),
            )
        })
        .unwrap_or_default();

    let body = format!(
        "{crumbs}<h2>Admin Dashboard - Manage Counties</h2>{dialog}{form}<div>{list}</div>",
        crumbs = breadcrumb(&[("Dashboard", Some("/dashboard")), ("Counties", Some("/dashboard/counties"))]),
        dialog = dialog,
        form = form,
        list = list,
    );
    layout("Manage Counties", &body)
}

pub fn projects_index() -> String {
    layout(
        "Projects Dashboard",
        r#"<h1>Projects Dashboard</h1>
<div class="grid">
<div class="card"><h2>Verified Projects</h2><p class="muted">Manage all the projects that have been verified.</p><a href="/dashboard/projects/verified">View Verified Projects</a></div>
<div class="card"><h2>Unverified Projects</h2><p class="muted">Review and manage projects that are yet to be verified.</p><a href="/dashboard/projects/unverified">View Unverified Projects</a></div>
</div>"#,
    )
}

/// Verified or unverified project list
pub fn project_list_page(verified: bool, projects: &Result<Vec<Project>, FetchError>) -> String {
    let (title, url) = if verified {
        ("Verified Projects", "/dashboard/projects/verified")
    } else {
        ("Unverified Projects", "/dashboard/projects/unverified")
    };
    let crumbs = breadcrumb(&[
        ("Dashboard", Some("/dashboard")),
        ("Projects", Some("/dashboard/projects")),
        (title, Some(url)),
    ]);

    let content = match projects {
        Err(e) => format!(
            r#"<p class="error">Error fetching {} projects: {}</p>"#,
            if verified { "verified" } else { "unverified" },
            escape(&e.to_string())
        ),
        Ok(projects) if projects.is_empty() => {
            format!("<p>No {} projects found.</p>", if verified { "verified" } else { "unverified" })
        }
        Ok(projects) => projects
            .iter()
            .map(|project| {
                format!(
                    r#"<div class="card"><h2>{title}</h2><p class="muted">{description}</p><a href="/dashboard/projects/{id}">View Project</a></div>"#,
                    title = escape(&project.title),
                    description = escape(&project.description),
                    id = encode_component(project.id.as_str()),
                )
            })
            .collect(),
    };

    layout(title, &format!("{}<h1>{}</h1>{}", crumbs, title, content))
}

/// Everything the project edit page renders
#[derive(Debug)]
pub struct ProjectEditView<'a> {
    pub project: &'a Project,
    pub counties: &'a [County],
    pub statuses: &'a [ProjectStatus],
    pub values: &'a FormInput,
    pub feedback: Feedback<'a>,
}

/// Pre-fill values for editing a project
pub fn project_values(project: &Project) -> FormInput {
    let input = FormInput::new()
        .with_text("title", project.title.clone())
        .with_text("county", project.county.clone())
        .with_text("status", project.status.clone().unwrap_or_default())
        .with_text("description", project.description.clone());
    if project.verified {
        input.with_text("verified", "on")
    } else {
        input
    }
}

pub fn project_edit_page(view: &ProjectEditView<'_>) -> String {
    let counties: Vec<String> = view.counties.iter().map(|c| c.name.clone()).collect();
    let statuses: Vec<String> = view.statuses.iter().map(|s| s.status_name.clone()).collect();
    let id = encode_component(view.project.id.as_str());
    let values = view.values;
    let feedback = &view.feedback;

    let body = format!(
        r#"{crumbs}<h1>Edit Project</h1>
{banners}
<form method="post" action="/dashboard/projects/{id}" enctype="multipart/form-data">
{title}{county}{status}{description}{verified}{docs}{images}
<button type="submit">Update Project</button>
</form>
<form method="post" action="/dashboard/projects/{id}/delete" onsubmit="return confirm('Are you sure you want to delete this project?');">
<button type="submit">Delete Project</button>
</form>"#,
        crumbs = breadcrumb(&[
            ("Dashboard", Some("/dashboard")),
            ("Projects", Some("/dashboard/projects")),
            ("Edit", None),
        ]),
        banners = feedback.banners(),
        id = id,
        title = widgets::text_input("title", "Project Title", values, feedback),
        county = widgets::select("county", "County", "Select County", &counties, values, feedback),
        status = widgets::select("status", "Project Status", "Select Status", &statuses, values, feedback),
        description = widgets::textarea("description", "Description", values, feedback),
        verified = widgets::checkbox("verified", "Verified", values),
        docs = widgets::file_input("docs", "Upload Documents (Max 15 MB)", feedback),
        images = widgets::file_input("images", "Upload Images (Max 5 MB)", feedback),
    );
    layout("Edit Project", &body)
}
