//! A mock mail sender for testing the SMTP notice.

use async_trait::async_trait;
use balance_notifier::notification::smtp::MailError;
use balance_notifier::{MailEnvelope, MailSender};
use std::sync::{Arc, Mutex};

#[derive(Clone, Debug, Default)]
pub struct MockMailSender {
    pub sent: Arc<Mutex<Vec<MailEnvelope>>>,
    pub fail: bool,
}

impl MockMailSender {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<MailEnvelope> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailSender for MockMailSender {
    async fn send_mail(&self, envelope: &MailEnvelope) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(envelope.clone());
        if self.fail {
            return Err(MailError::Other("relay refused the message".to_string()));
        }
        Ok(())
    }
}
