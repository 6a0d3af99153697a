/// Configuration management for the County Advocacy portal
///
/// Handles server binding, the backend-as-a-service REST credentials, the SMTP
/// relay used for report emails, and the public URL used to build share links.

use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Hosted REST backend configuration
    pub baas: BaasConfig,
    /// SMTP relay configuration
    pub smtp: SmtpConfig,
    /// Report email addressing
    pub mail: MailConfig,
    /// Public site settings
    pub site: SiteConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server bind address (e.g., "0.0.0.0")
    pub host: String,
    /// Server port number
    pub port: u16,
}

/// Backend-as-a-service connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaasConfig {
    /// Base URL of the hosted backend (e.g., "https://xyz.supabase.co")
    /// The REST root is `{url}/rest/v1`
    pub url: String,
    /// Anonymous key, sent both as `apikey` and as the bearer token
    pub anon_key: String,
}

/// SMTP relay settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    /// true: implicit TLS (usually port 465). false: STARTTLS when offered
    pub secure: bool,
    pub user: String,
    pub password: String,
}

/// Addresses used for outgoing report emails
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Sender address; the display name is fixed
    pub from: String,
    /// Recipient of every report
    pub to: String,
}

/// Public site settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Public application URL, used to build shareable project links
    pub app_url: String,
}

impl SiteConfig {
    /// Canonical public URL of a project detail page
    pub fn project_url(&self, id: &str) -> String {
        format!("{}/projects/{}", self.app_url.trim_end_matches('/'), id)
    }
}

impl Default for Config {
    /// Default configuration with ENV_VAR support for container deployment
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: env_or("COUNTY_HOST", "0.0.0.0"),
                port: env_or("COUNTY_PORT", "3000").parse().unwrap_or(3000),
            },
            baas: BaasConfig {
                url: env_or("BAAS_URL", "http://localhost:54321"),
                anon_key: env_or("BAAS_ANON_KEY", ""),
            },
            smtp: SmtpConfig {
                host: env_or("SMTP_HOST", "localhost"),
                port: env_or("SMTP_PORT", "587").parse().unwrap_or(587),
                secure: env_or("SMTP_SECURE", "false") == "true",
                user: env_or("SMTP_USER", ""),
                password: env_or("SMTP_PASS", ""),
            },
            mail: MailConfig {
                from: env_or("EMAIL_FROM", "reports@localhost"),
                to: env_or("EMAIL_TO", "admin@localhost"),
            },
            site: SiteConfig {
                app_url: env_or("APP_URL", "http://localhost:3000"),
            },
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
