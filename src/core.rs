//! Core domain types and service traits for the balance notifier
//!
//! This module defines the subscriber record handed to every notification
//! operation and the trait contracts for the two external collaborators
//! the notifier depends on: the system token source and the mail sender.

use crate::notification::smtp::MailError;
use crate::notification::token::TokenError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A snapshot of the subscriber whose balance ran low.
///
/// Supplied by the caller and never mutated by the notifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct UserInfo {
    /// Mobile number used for SMS notices
    pub phone: Option<String>,
    /// Mail address used for cloud and SMTP mail notices
    pub email: Option<String>,
    /// Display name of the customer
    pub realname: String,
    /// Account (login) name
    pub account_number: String,
    /// Remaining balance in minor currency units (cents / fen)
    pub balance: i64,
    /// Name of the product the account is subscribed to
    pub product_name: String,
}

impl UserInfo {
    /// Returns the phone number if one is present and non-empty.
    pub fn phone(&self) -> Option<&str> {
        non_empty(self.phone.as_deref())
    }

    /// Returns the mail address if one is present and non-empty.
    pub fn email(&self) -> Option<&str> {
        non_empty(self.email.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Connection settings and content for a single SMTP delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailEnvelope {
    pub server: String,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    /// Display name shown alongside `from_addr`
    pub sender: Option<String>,
    pub from_addr: String,
    pub mailto: String,
    pub topic: String,
    pub content: String,
    pub tls: bool,
}

// =============================================================================
// Service traits
// =============================================================================

/// A source of the system token embedded in every cloud request.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Fetches the current system token.
    async fn system_token(&self) -> Result<String, TokenError>;
}

/// A generic mail-sending utility.
#[async_trait]
pub trait MailSender: Send + Sync {
    /// Delivers one plain-text message.
    async fn send_mail(&self, envelope: &MailEnvelope) -> Result<(), MailError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_contact_fields_are_treated_as_absent() {
        let user = UserInfo {
            phone: Some("   ".to_string()),
            email: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(user.phone(), None);
        assert_eq!(user.email(), None);
    }

    #[test]
    fn test_user_info_deserializes_with_missing_fields() {
        let user: UserInfo =
            serde_json::from_str(r#"{"phone": "13800000000", "balance": 120}"#).unwrap();
        assert_eq!(user.phone(), Some("13800000000"));
        assert_eq!(user.email(), None);
        assert_eq!(user.balance, 120);
        assert!(user.realname.is_empty());
    }
}
