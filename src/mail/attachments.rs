/// Turning report attachments into mailable content

use crate::forms::schemas::DOCUMENT_LIMIT;
use crate::mail::{EmailAttachment, MailError, ReportAttachment};
use axum::body::Bytes;

/// Largest attachment fetched from a URL; the same cap as an uploaded document
pub const REMOTE_ATTACHMENT_LIMIT: u64 = DOCUMENT_LIMIT;

/// Resolve one attachment; remote references must be http(s) URLs
pub async fn resolve(
    http: &reqwest::Client,
    attachment: ReportAttachment,
) -> Result<EmailAttachment, MailError> {
    let (name, path) = match attachment {
        ReportAttachment::Inline(inline) => return Ok(inline),
        ReportAttachment::Remote { name, path } => (name, path),
    };

    if !(path.starts_with("http://") || path.starts_with("https://")) {
        return Err(MailError::Attachment {
            name,
            reason: format!("unsupported path '{}', expected an http(s) URL", path),
        });
    }

    tracing::debug!("🌐 Fetching attachment '{}' from {}", name, path);
    let failed = |e: reqwest::Error| MailError::Attachment {
        name: name.clone(),
        reason: e.to_string(),
    };
    let mut response = http
        .get(&path)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(failed)?;

    let too_large = || MailError::Attachment {
        name: name.clone(),
        reason: format!("larger than {} bytes", REMOTE_ATTACHMENT_LIMIT),
    };
    if response
        .content_length()
        .is_some_and(|len| len > REMOTE_ATTACHMENT_LIMIT)
    {
        return Err(too_large());
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_string();

    let mut content = Vec::new();
    while let Some(chunk) = response.chunk().await.map_err(failed)? {
        if (content.len() + chunk.len()) as u64 > REMOTE_ATTACHMENT_LIMIT {
            return Err(too_large());
        }
        content.extend_from_slice(&chunk);
    }

    Ok(EmailAttachment {
        filename: name,
        content_type,
        content: Bytes::from(content),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn local_paths_are_refused() {
        let http = reqwest::Client::new();
        let result = resolve(
            &http,
            ReportAttachment::Remote {
                name: "passwd".to_string(),
                path: "/etc/passwd".to_string(),
            },
        )
        .await;

        match result {
            Err(MailError::Attachment { name, reason }) => {
                assert_eq!(name, "passwd");
                assert!(reason.contains("/etc/passwd"));
            }
            other => panic!("expected attachment error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn inline_attachments_pass_through() {
        let inline = EmailAttachment {
            filename: "a.txt".to_string(),
            content_type: "text/plain".to_string(),
            content: Bytes::from_static(b"hi"),
        };
        let resolved = resolve(&reqwest::Client::new(), ReportAttachment::Inline(inline.clone()))
            .await
            .unwrap();
        assert_eq!(resolved, inline);
    }
}
