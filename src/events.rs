//! Names of the balance events an external dispatcher can fire.

use crate::notification::NotifyError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceEvent {
    CloudSms,
    CloudMail,
    Smtp,
}

impl BalanceEvent {
    pub const ALL: [BalanceEvent; 3] = [Self::CloudSms, Self::CloudMail, Self::Smtp];

    pub fn name(&self) -> &'static str {
        match self {
            Self::CloudSms => "toughcloud_sms_account_insufficient_balance",
            Self::CloudMail => "toughcloud_mail_account_insufficient_balance",
            Self::Smtp => "smtp_account_insufficient_balance",
        }
    }
}

impl fmt::Display for BalanceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BalanceEvent {
    type Err = NotifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Dispatchers sometimes pass the handler name, prefixed with `event_`.
        let name = s.trim().trim_start_matches("event_");
        Self::ALL
            .into_iter()
            .find(|event| event.name() == name)
            .ok_or_else(|| NotifyError::UnknownEvent(s.to_string()))
    }
}
