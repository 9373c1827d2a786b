//! A mail sender backed by the `lettre` async SMTP transport.

use crate::core::{MailEnvelope, MailSender};
use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::{info, instrument};

/// Error type for SMTP delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// No sender address was configured.
    #[error("no from-address configured for SMTP delivery")]
    MissingFrom,

    /// The recipient or sender address could not be parsed.
    #[error("email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("email build error: {0}")]
    Build(#[from] lettre::error::Error),

    /// SMTP transport-level failure (connection, authentication, rejection).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// Failure reported by a `MailSender` other than [`SmtpMailSender`].
    #[error("mail delivery failed: {0}")]
    Other(String),
}

/// Sends plain-text mail over SMTP, opening a connection per message.
#[derive(Debug, Clone, Copy, Default)]
pub struct SmtpMailSender;

impl SmtpMailSender {
    fn build_message(envelope: &MailEnvelope) -> Result<Message, MailError> {
        let from = Mailbox::new(envelope.sender.clone(), envelope.from_addr.parse()?);
        let message = Message::builder()
            .from(from)
            .to(envelope.mailto.parse()?)
            .subject(envelope.topic.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(envelope.content.clone())?;
        Ok(message)
    }

    fn build_transport(
        envelope: &MailEnvelope,
    ) -> Result<AsyncSmtpTransport<Tokio1Executor>, MailError> {
        // The balance notice always sends with `tls: false`; STARTTLS is kept
        // for other callers of the mail sender.
        let mut builder = if envelope.tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&envelope.server)?
        } else {
            // Plain connection for local relays.
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&envelope.server)
        }
        .port(envelope.port);

        if let (Some(user), Some(password)) = (&envelope.user, &envelope.password) {
            builder = builder.credentials(Credentials::new(user.clone(), password.clone()));
        }
        Ok(builder.build())
    }
}

#[async_trait]
impl MailSender for SmtpMailSender {
    #[instrument(skip_all, fields(server = %envelope.server, port = envelope.port, to = %envelope.mailto))]
    async fn send_mail(&self, envelope: &MailEnvelope) -> Result<(), MailError> {
        let message = Self::build_message(envelope)?;
        let transport = Self::build_transport(envelope)?;
        transport.send(message).await?;
        info!("Mail delivered over SMTP.");
        Ok(())
    }
}
