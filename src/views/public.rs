/// Public pages

use crate::baas::{County, FetchError, Project};
use crate::forms::FormInput;
use crate::views::widgets::{self, Feedback};
use crate::views::{encode_component, escape, format_date, layout, truncate_description};

const WELCOME: &str = "<h1>Welcome to the County Advocacy Platform</h1>\n<p>Select a county to view its projects.</p>";

/// Home page: every county as a link to its public page
pub fn home_page(counties: &Result<Vec<County>, FetchError>) -> String {
    let content = match counties {
        Ok(counties) => {
            let items: String = counties
                .iter()
                .map(|county| {
                    format!(
                        r#"<li class="card"><a href="/counties/{slug}">{name}</a></li>"#,
                        slug = escape(&county.slug),
                        name = escape(&county.name),
                    )
                })
                .collect();
            format!(r#"<ul class="grid">{}</ul>"#, items)
        }
        Err(e) => format!(
            r#"<p class="error">Error fetching counties: {}</p>"#,
            escape(&e.to_string())
        ),
    };
    layout("Counties", &format!("{}\n{}", WELCOME, content))
}

/// County page: verified projects with a 100-character description preview
pub fn county_page(slug: &str, projects: &Result<Vec<Project>, FetchError>) -> String {
    let projects = match projects {
        Ok(projects) => projects,
        Err(e) => {
            return layout(
                slug,
                &format!(
                    r#"<p class="error">Error loading projects: {}</p>"#,
                    escape(&e.to_string())
                ),
            )
        }
    };

    let list = if projects.is_empty() {
        format!("<p>No projects found for {}.</p>", escape(slug))
    } else {
        projects
            .iter()
            .map(|project| {
                format!(
                    r#"<div class="card"><h2><a href="/projects/{id}">{title}</a></h2><p class="muted">{preview}</p></div>"#,
                    id = encode_component(project.id.as_str()),
                    title = escape(&project.title),
                    preview = escape(&truncate_description(&project.description)),
                )
            })
            .collect()
    };

    layout(
        slug,
        &format!("<h1>Projects in {}</h1>\n{}", escape(slug), list),
    )
}

/// Project detail page with media, documents and the share action
pub fn project_page(project: &Project, share_url: &str) -> String {
    let mut body = format!(
        r#"<h1>{title}</h1><p>{description}</p>"#,
        title = escape(&project.title),
        description = escape(&project.description),
    );

    if let Some(status) = project.status.as_deref().filter(|s| !s.is_empty()) {
        body.push_str(&format!("<p><strong>Status: </strong>{}</p>", escape(status)));
    }
    body.push_str(&format!(
        "<p><strong>Verified: </strong>{}</p>",
        if project.verified { "Yes" } else { "No" }
    ));

    if !project.images.is_empty() {
        let images: String = project
            .images
            .iter()
            .enumerate()
            .map(|(index, src)| {
                format!(
                    r#"<img src="{}" alt="Project Image {}" style="max-width:100%">"#,
                    escape(src),
                    index + 1
                )
            })
            .collect();
        body.push_str(&format!(r#"<h3>Images</h3><div class="grid">{}</div>"#, images));
    }

    if !project.docs.is_empty() {
        let docs: String = project
            .docs
            .iter()
            .enumerate()
            .map(|(index, href)| {
                format!(
                    r#"<li><a href="{}" target="_blank" rel="noopener noreferrer">Download Document {}</a></li>"#,
                    escape(href),
                    index + 1
                )
            })
            .collect();
        body.push_str(&format!("<h3>Documents</h3><ul>{}</ul>", docs));
    }

    if let Some(created) = project.created_at.as_deref().and_then(format_date) {
        body.push_str(&format!(r#"<p class="muted">Created at: {}</p>"#, created));
    }

    body.push_str(&widgets::share_button(&project.title, &project.description, share_url));
    layout(&project.title, &body)
}

/// Public report form
pub fn report_form_page(input: &FormInput, feedback: &Feedback<'_>) -> String {
    let body = format!(
        r#"<h1>Submit a Report</h1>
{banners}
<form method="post" action="/submit-report" enctype="multipart/form-data">
{title}{county}{details}{images}{documents}
<button type="submit">Submit Report</button>
</form>"#,
        banners = feedback.banners(),
        title = widgets::text_input("title", "Project Title", input, feedback),
        county = widgets::text_input("county", "County", input, feedback),
        details = widgets::textarea("details", "Details", input, feedback),
        images = widgets::file_input("images", "Upload Images (Max 5 MB)", feedback),
        documents = widgets::file_input("documents", "Upload Documents (Optional, Max 15 MB)", feedback),
    );
    layout("Submit a Report", &body)
}
