/// Form widgets with inline field errors, plus the share action

use crate::forms::{FormInput, ValidationErrors};
use crate::views::escape;

/// Outcome banners and field errors for one rendering of a form
#[derive(Debug, Default)]
pub struct Feedback<'a> {
    pub errors: Option<&'a ValidationErrors>,
    pub success: Option<&'a str>,
    pub failure: Option<String>,
}

impl<'a> Feedback<'a> {
    pub fn invalid(errors: &'a ValidationErrors) -> Self {
        Self {
            errors: Some(errors),
            ..Self::default()
        }
    }

    pub fn success(message: &'a str) -> Self {
        Self {
            success: Some(message),
            ..Self::default()
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// Success / failure banners shown above the form
    pub fn banners(&self) -> String {
        let mut out = String::new();
        if let Some(message) = self.success {
            out.push_str(&format!(r#"<p class="success">{}</p>"#, escape(message)));
        }
        if let Some(message) = &self.failure {
            out.push_str(&format!(r#"<p class="error">{}</p>"#, escape(message)));
        }
        out
    }

    fn field_error(&self, name: &str) -> String {
        self.errors
            .and_then(|errors| errors.get(name))
            .map(|message| format!(r#"<p class="error" id="{name}-error">{}</p>"#, escape(message)))
            .unwrap_or_default()
    }
}

pub fn text_input(name: &str, label: &str, input: &FormInput, feedback: &Feedback<'_>) -> String {
    typed_input("text", name, label, input, feedback)
}

pub fn number_input(name: &str, label: &str, input: &FormInput, feedback: &Feedback<'_>) -> String {
    typed_input("number", name, label, input, feedback)
}

fn typed_input(kind: &str, name: &str, label: &str, input: &FormInput, feedback: &Feedback<'_>) -> String {
    format!(
        r#"<div class="field"><label for="{name}">{label}</label><input id="{name}" name="{name}" type="{kind}" value="{value}">{error}</div>"#,
        name = name,
        kind = kind,
        label = escape(label),
        value = escape(input.text(name)),
        error = feedback.field_error(name),
    )
}

pub fn textarea(name: &str, label: &str, input: &FormInput, feedback: &Feedback<'_>) -> String {
    format!(
        r#"<div class="field"><label for="{name}">{label}</label><textarea id="{name}" name="{name}" rows="4">{value}</textarea>{error}</div>"#,
        name = name,
        label = escape(label),
        value = escape(input.text(name)),
        error = feedback.field_error(name),
    )
}

/// Dropdown whose first entry is an empty placeholder
pub fn select(
    name: &str,
    label: &str,
    placeholder: &str,
    options: &[String],
    input: &FormInput,
    feedback: &Feedback<'_>,
) -> String {
    let current = input.text(name);
    let options: String = options
        .iter()
        .map(|option| {
            let selected = if option == current { " selected" } else { "" };
            format!(r#"<option value="{v}"{selected}>{v}</option>"#, v = escape(option), selected = selected)
        })
        .collect();
    format!(
        r#"<div class="field"><label for="{name}">{label}</label><select id="{name}" name="{name}"><option value="">{placeholder}</option>{options}</select>{error}</div>"#,
        name = name,
        label = escape(label),
        placeholder = escape(placeholder),
        options = options,
        error = feedback.field_error(name),
    )
}

pub fn file_input(name: &str, label: &str, feedback: &Feedback<'_>) -> String {
    format!(
        r#"<div class="field"><label for="{name}">{label}</label><input id="{name}" name="{name}" type="file">{error}</div>"#,
        name = name,
        label = escape(label),
        error = feedback.field_error(name),
    )
}

pub fn checkbox(name: &str, label: &str, input: &FormInput) -> String {
    let checked = if input.checked(name) { " checked" } else { "" };
    format!(
        r#"<div class="field"><input id="{name}" name="{name}" type="checkbox"{checked}> <label for="{name}" style="display:inline">{label}</label></div>"#,
        name = name,
        checked = checked,
        label = escape(label),
    )
}

/// Share action: the platform share sheet when available, else copy the link
///
/// Without scripts the canonical link is still rendered next to the button.
pub fn share_button(title: &str, text: &str, url: &str) -> String {
    format!(
        r#"<div class="share">
<button type="button" id="share-button" data-title="{title}" data-text="{text}" data-url="{url}">Share</button>
<a class="muted" href="{url}">{url}</a>
<script>
document.getElementById("share-button").addEventListener("click", function () {{
  var data = {{ title: this.dataset.title, text: this.dataset.text, url: this.dataset.url }};
  if (navigator.share) {{
    navigator.share(data).catch(function () {{}});
  }} else if (navigator.clipboard) {{
    navigator.clipboard.writeText(data.url).then(function () {{ alert("Link copied to clipboard"); }});
  }} else {{
    window.prompt("Copy this link", data.url);
  }}
}});
</script>
</div>"#,
        title = escape(title),
        text = escape(text),
        url = escape(url),
    )
}
