/// Backend-as-a-service adapter
///
/// The hosted backend owns all data. This module provides:
/// - Record types (County, Project, ProjectStatus)
/// - A filter query builder for the REST dialect
/// - The authenticated REST client shared by all pages

// Record types and lenient decoding helpers
pub mod types;

// PostgREST-style query builder (resource, equality filters, limit)
pub mod query;

// reqwest-based client with fixed API key / bearer credentials
pub mod client;

pub use client::{BaasClient, FetchError, MultipartBody, Payload};
pub use query::{Query, Resource};
pub use types::{slugify, County, CountyDraft, Project, ProjectStatus, RecordId};
