/// County Advocacy: public directory and admin dashboard for county projects
///
/// Visitors browse counties and their verified projects and submit reports by
/// email; administrators manage counties and review projects. All records live
/// in a hosted REST backend.

// Core configuration and setup
pub mod config;

// Hosted backend adapter - record types, query builder, REST client
pub mod baas;

// Form input, validation rules and per-form schemas
pub mod forms;

// Id-keyed list transitions applied after dashboard mutations
pub mod view_state;

// Report email composition and SMTP delivery
pub mod mail;

// Server-rendered HTML pages
pub mod views;

// HTTP API layer - public pages, dashboard, report endpoint
pub mod api;

// Server setup and initialization
pub mod server;

// Re-export commonly used types for external consumers
pub use api::AppState;
pub use baas::{BaasClient, County, Project};
pub use mail::{Mailer, ReportEmail};
pub use server::{build_router, create_app, start_server};
