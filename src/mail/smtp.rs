/// SMTP relay delivery via lettre

use crate::config::SmtpConfig;
use crate::mail::{MailError, Mailer, ReportEmail};
use async_trait::async_trait;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};

/// Mailer backed by the configured SMTP relay
///
/// `secure = true` wraps the connection in TLS from the start (port 465 style);
/// otherwise the connection is upgraded with STARTTLS when the relay offers it.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, MailError> {
        let tls = TlsParameters::new(config.host.clone())?;
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(config.host.as_str())
            .port(config.port)
            .tls(if config.secure {
                Tls::Wrapper(tls)
            } else {
                Tls::Opportunistic(tls)
            });

        if !config.user.is_empty() {
            builder = builder.credentials(Credentials::new(config.user.clone(), config.password.clone()));
        }

        tracing::info!(
            "📮 SMTP relay configured: {}:{} (secure: {})",
            config.host,
            config.port,
            config.secure
        );

        Ok(Self {
            transport: builder.build(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &ReportEmail) -> Result<(), MailError> {
        let message = email.to_message()?;
        self.transport.send(message).await?;
        tracing::info!("📨 Report email sent: {}", email.subject);
        Ok(())
    }
}
