//! Low-balance notifications.
//!
//! [`notifier::BalanceNotifier`] is the entry point. It signs and posts
//! requests to the cloud API through [`cloud::CloudClient`] and hands plain
//! SMTP mail to a [`crate::core::MailSender`], by default
//! [`smtp::SmtpMailSender`].
pub mod cloud;
pub mod notifier;
pub mod smtp;
pub mod token;

pub use notifier::BalanceNotifier;

use smtp::MailError;
use token::TokenError;

/// Errors raised while preparing or delivering a notice.
///
/// The cloud SMS and mail notices log these and carry on; only the SMTP
/// notice returns them to its caller.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("parameter `{0}` is not configured")]
    MissingParam(&'static str),

    #[error("failed to fetch system token: {0}")]
    Token(#[from] TokenError),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("cloud API returned status {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error(transparent)]
    Mail(#[from] MailError),

    #[error("unknown event `{0}`")]
    UnknownEvent(String),
}
