/// HTTP layer
///
/// This module provides the portal's routes:
/// - Public pages (counties, projects, report form)
/// - Admin dashboard pages for counties and projects
/// - The report-submission endpoint relaying reports by email

// Public read-only pages and the report form
pub mod public;

// Admin dashboard (county CRUD, project review)
pub mod dashboard;

// POST /api/send-report
pub mod report;

use crate::baas::BaasClient;
use crate::config::{MailConfig, SiteConfig};
use crate::mail::Mailer;
use std::sync::Arc;

pub use dashboard::create_dashboard_routes;
pub use public::create_public_routes;
pub use report::create_report_routes;

/// Request body limit on routes that accept uploads
///
/// Above the largest combined upload so oversized files reach validation and get
/// a field error instead of a bare 413.
pub const UPLOAD_BODY_LIMIT: usize = 64 * 1024 * 1024;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// REST client for the hosted backend
    pub baas: Arc<BaasClient>,
    /// Report email delivery
    pub mailer: Arc<dyn Mailer>,
    /// Plain HTTP client for fetching referenced attachments
    pub http: reqwest::Client,
    /// Report email addressing
    pub mail: MailConfig,
    /// Public URL settings
    pub site: SiteConfig,
}
