/// Submitted form data
///
/// Urlencoded and multipart bodies are both read into a `FormInput` so that the
/// same schema validation runs regardless of how the browser encoded the form.

use axum::body::Bytes;
use axum::extract::multipart::{Multipart, MultipartError};
use std::collections::HashMap;

/// A file part received from the browser
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl UploadedFile {
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Text fields and file parts of one submission
#[derive(Debug, Clone, Default)]
pub struct FormInput {
    text: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl FormInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fields(fields: HashMap<String, String>) -> Self {
        Self {
            text: fields,
            files: HashMap::new(),
        }
    }

    pub fn with_text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.text.insert(name.to_string(), value.into());
        self
    }

    pub fn with_file(mut self, name: &str, file: UploadedFile) -> Self {
        self.files.insert(name.to_string(), file);
        self
    }

    /// Read every part of a multipart body
    ///
    /// File inputs left empty by the user arrive as a part with an empty file name
    /// and no content; those are treated as absent.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, MultipartError> {
        let mut input = Self::new();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field
                        .content_type()
                        .unwrap_or("application/octet-stream")
                        .to_string();
                    let data = field.bytes().await?;
                    if file_name.is_empty() && data.is_empty() {
                        continue;
                    }
                    tracing::debug!("📎 Received file part '{}' ({} bytes)", name, data.len());
                    input.files.insert(name, UploadedFile { file_name, content_type, data });
                }
                None => {
                    let value = field.text().await?;
                    input.text.insert(name, value);
                }
            }
        }

        Ok(input)
    }

    /// Text value of a field; missing fields read as empty
    pub fn text(&self, name: &str) -> &str {
        self.text.get(name).map(String::as_str).unwrap_or("")
    }

    /// Trimmed text value
    pub fn trimmed(&self, name: &str) -> &str {
        self.text(name).trim()
    }

    pub fn file(&self, name: &str) -> Option<&UploadedFile> {
        self.files.get(name)
    }

    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }

    /// Checkbox state: browsers send "on" when ticked and nothing otherwise
    pub fn checked(&self, name: &str) -> bool {
        matches!(self.trimmed(name), "on" | "true" | "1" | "yes")
    }
}
