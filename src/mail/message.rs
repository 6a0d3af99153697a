/// Report submissions and the email built from them

use crate::config::MailConfig;
use crate::mail::MailError;
use axum::body::Bytes;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::{Address, Message};

/// Display name on every outgoing report
pub const FROM_NAME: &str = "Report Submission";

/// A report as received from the public form or the JSON endpoint
#[derive(Debug, Clone, Default)]
pub struct ReportSubmission {
    pub title: String,
    pub county: String,
    pub details: String,
    pub attachments: Vec<ReportAttachment>,
}

/// Attachment supplied with a report
#[derive(Debug, Clone)]
pub enum ReportAttachment {
    /// Uploaded in the request body
    Inline(EmailAttachment),
    /// Referenced by name and URL, fetched when the email is built
    Remote { name: String, path: String },
}

/// Attachment content ready to be mailed
#[derive(Debug, Clone, PartialEq)]
pub struct EmailAttachment {
    pub filename: String,
    pub content_type: String,
    pub content: Bytes,
}

/// Fully resolved report email
#[derive(Debug, Clone, PartialEq)]
pub struct ReportEmail {
    pub from_name: String,
    pub from_address: String,
    pub to: String,
    pub subject: String,
    pub text: String,
    pub attachments: Vec<EmailAttachment>,
}

impl ReportEmail {
    /// Address a submission using the configured sender and recipient
    pub fn compose(
        mail: &MailConfig,
        submission: &ReportSubmission,
        attachments: Vec<EmailAttachment>,
    ) -> Self {
        Self {
            from_name: FROM_NAME.to_string(),
            from_address: mail.from.clone(),
            to: mail.to.clone(),
            subject: format!("New Report Submission: {}", submission.title),
            text: format!(
                "Project Title: {}\nCounty: {}\nDetails: {}",
                submission.title, submission.county, submission.details
            ),
            attachments,
        }
    }

    /// Convert into a MIME message: plain text alone, or mixed multipart with attachments
    pub fn to_message(&self) -> Result<Message, MailError> {
        let from = Mailbox::new(Some(self.from_name.clone()), self.from_address.parse::<Address>()?);
        let to: Mailbox = self.to.parse()?;
        let builder = Message::builder().from(from).to(to).subject(self.subject.as_str());

        if self.attachments.is_empty() {
            return Ok(builder
                .header(ContentType::TEXT_PLAIN)
                .body(self.text.clone())?);
        }

        let mut body = MultiPart::mixed().singlepart(SinglePart::plain(self.text.clone()));
        for attachment in &self.attachments {
            let content_type = ContentType::parse(&attachment.content_type)
                .or_else(|_| ContentType::parse("application/octet-stream"))
                .map_err(|e| MailError::ContentType(e.to_string()))?;
            body = body.singlepart(
                Attachment::new(attachment.filename.clone())
                    .body(attachment.content.to_vec(), content_type),
            );
        }

        Ok(builder.multipart(body)?)
    }
}
