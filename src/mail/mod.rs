/// Report email delivery
///
/// Builds the report email from a submission and hands it to a `Mailer`.
/// Production uses the SMTP relay; tests substitute a recording mailer.

// Submission, attachment and email types
pub mod message;

// Fetching referenced attachments
pub mod attachments;

// lettre SMTP transport
pub mod smtp;

use async_trait::async_trait;
use thiserror::Error;

pub use message::{EmailAttachment, ReportAttachment, ReportEmail, ReportSubmission};
pub use smtp::SmtpMailer;

/// Everything that can go wrong between a submission and the relay accepting it
#[derive(Debug, Error)]
pub enum MailError {
    #[error("Invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Invalid attachment content type: {0}")]
    ContentType(String),

    #[error("Failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("Failed to attach '{name}': {reason}")]
    Attachment { name: String, reason: String },
}

/// Sends one report email; a single attempt, no queueing
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &ReportEmail) -> Result<(), MailError>;
}
