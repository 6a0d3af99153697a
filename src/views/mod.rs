/// HTML rendering
///
/// Every page is a pure function from fetched data to markup. Handlers fetch,
/// views render; a view never performs I/O. All interpolated text goes through
/// `escape`.

// Shared form widgets and the share action
pub mod widgets;

// Public pages: home, county, project detail, report form
pub mod public;

// Admin dashboard pages
pub mod dashboard;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::borrow::Cow;

/// Public description previews are cut to this many characters
pub const DESCRIPTION_PREVIEW_CHARS: usize = 100;

/// Cut a description to the preview length and append "..."
///
/// A straight character cut with no word-boundary handling; descriptions at or
/// under the limit are returned unchanged.
pub fn truncate_description(description: &str) -> Cow<'_, str> {
    match description.char_indices().nth(DESCRIPTION_PREVIEW_CHARS) {
        Some((cut, _)) => Cow::Owned(format!("{}...", &description[..cut])),
        None => Cow::Borrowed(description),
    }
}

/// Render a backend timestamp as a short date (M/D/YYYY)
pub fn format_date(raw: &str) -> Option<String> {
    const DISPLAY: &str = "%-m/%-d/%Y";
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.format(DISPLAY).to_string());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.format(DISPLAY).to_string());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|d| d.format(DISPLAY).to_string())
}

// Everything except RFC 3986 unreserved characters
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Percent-encode a record id for a path segment or query value
///
/// The output is plain ASCII with no HTML-significant characters, so it can be
/// placed in an attribute without further escaping.
pub fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, COMPONENT).to_string()
}

/// Escape text for HTML element content and quoted attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const STYLE: &str = "body{font-family:system-ui,sans-serif;margin:0;color:#18181b}\
nav{display:flex;gap:1.25rem;padding:1rem 1.5rem;border-bottom:1px solid #e4e4e7;font-weight:600}\
main{max-width:64rem;margin:0 auto;padding:2rem 1.25rem}\
footer{border-top:1px solid #e4e4e7;text-align:center;font-size:.75rem;padding:3rem 0}\
a{color:#2563eb}.grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(12rem,1fr));gap:1rem;padding:0;list-style:none}\
.card{border:1px solid #e4e4e7;border-radius:.5rem;padding:1rem}.error{color:#dc2626}.success{color:#16a34a}\
.field{margin-bottom:1rem}.field label{display:block;font-weight:600}\
.field input[type=text],.field input[type=number],.field select,.field textarea{width:100%;padding:.5rem;box-sizing:border-box}\
.dialog{border:2px solid #dc2626;border-radius:.5rem;padding:1.5rem;margin:1rem 0}\
.muted{color:#71717a}";

/// Wrap page content in the site layout
pub fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | County Advocacy</title>
<style>{style}</style>
</head>
<body>
<nav><a href="/">Home</a><a href="/submit-report">Submit a report</a><a href="/dashboard">Dashboard</a></nav>
<main>
{body}
</main>
<footer><p>Powered by Supabase</p></footer>
</body>
</html>"#,
        title = escape(title),
        style = STYLE,
        body = body,
    )
}

/// Inline "not found" state
pub fn not_found_page(message: &str) -> String {
    layout(message, &format!("<p>{}</p>", escape(message)))
}

/// Inline error state for a failed fetch
pub fn error_page(title: &str, context: &str, error: &impl std::fmt::Display) -> String {
    layout(
        title,
        &format!(r#"<p class="error">{}: {}</p>"#, escape(context), escape(&error.to_string())),
    )
}
