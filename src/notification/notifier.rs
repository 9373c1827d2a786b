//! The balance notifier: one entry point per delivery channel.

use crate::config::{Config, ParamConfig};
use crate::core::{MailEnvelope, MailSender, TokenProvider, UserInfo};
use crate::events::BalanceEvent;
use crate::formatting::{fen_to_yuan, format_smtp_notice};
use crate::notification::cloud::{CloudClient, MAIL_PATH, SMS_PATH};
use crate::notification::smtp::{MailError, SmtpMailSender};
use crate::notification::{token, NotifyError};
use crate::signing::NotificationRequest;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, instrument};

/// Cloud template used for both SMS and mail notices.
pub const BALANCE_TEMPLATE: &str = "tr_balance_notify";

/// Sends low-balance notices by cloud SMS, cloud mail or plain SMTP.
///
/// Holds no mutable state; calls may run concurrently.
pub struct BalanceNotifier {
    params: ParamConfig,
    cloud: CloudClient,
    tokens: Arc<dyn TokenProvider>,
    mailer: Arc<dyn MailSender>,
}

impl BalanceNotifier {
    pub fn new(
        params: ParamConfig,
        cloud: CloudClient,
        tokens: Arc<dyn TokenProvider>,
        mailer: Arc<dyn MailSender>,
    ) -> Self {
        Self {
            params,
            cloud,
            tokens,
            mailer,
        }
    }

    /// Wires the notifier with the HTTP token source and the lettre mail sender.
    pub fn from_config(config: &Config) -> Result<Self, NotifyError> {
        let timeout = Duration::from_secs(config.cloud.timeout_seconds);
        let cloud = CloudClient::new(&config.cloud.api_url, timeout)?;
        let tokens = token::from_config(&config.cloud)?;
        Ok(Self::new(
            config.params.clone(),
            cloud,
            tokens,
            Arc::new(SmtpMailSender),
        ))
    }

    /// Routes an event to its channel.
    ///
    /// Only the SMTP event can fail; cloud events always return `Ok(())`.
    pub async fn dispatch(&self, event: BalanceEvent, userinfo: &UserInfo) -> Result<(), NotifyError> {
        match event {
            BalanceEvent::CloudSms => {
                self.send_sms_notice(Some(userinfo)).await;
                Ok(())
            }
            BalanceEvent::CloudMail => {
                self.send_mail_notice(Some(userinfo)).await;
                Ok(())
            }
            BalanceEvent::Smtp => self.send_smtp_notice(userinfo).await,
        }
    }

    /// Sends the notice as an SMS through the cloud API.
    ///
    /// Never fails: a missing phone number or any delivery error is logged.
    #[instrument(skip_all, fields(account = userinfo.map(|u| u.account_number.as_str())))]
    pub async fn send_sms_notice(&self, userinfo: Option<&UserInfo>) {
        let Some(user) = userinfo else {
            return;
        };
        let Some(phone) = user.phone() else {
            error!("User phone is empty, skipping SMS notice.");
            return;
        };

        match self.try_send_sms(user, phone).await {
            Ok(body) => {
                info!(response = %body, "Cloud SMS API responded.");
                info!("Balance SMS notice sent.");
            }
            Err(e) => error!(error = %e, details = ?e, "Failed to send balance SMS notice."),
        }
    }

    async fn try_send_sms(&self, user: &UserInfo, phone: &str) -> Result<String, NotifyError> {
        let secret = self
            .params
            .license()
            .ok_or(NotifyError::MissingParam("toughcloud_license"))?;
        let token = self.tokens.system_token().await?;
        let request = build_sms_request(user, phone, token.trim(), &current_nonce()).sign(secret);
        self.cloud.post(SMS_PATH, &request).await
    }

    /// Sends the notice as a mail through the cloud API.
    ///
    /// Does nothing when no service mailbox is configured. Never fails.
    #[instrument(skip_all, fields(account = userinfo.map(|u| u.account_number.as_str())))]
    pub async fn send_mail_notice(&self, userinfo: Option<&UserInfo>) {
        let Some(user) = userinfo else {
            return;
        };
        let Some(email) = user.email() else {
            error!("User email is empty, skipping mail notice.");
            return;
        };
        let Some(service_mail) = self.params.service_mail() else {
            return;
        };

        match self.try_send_mail(user, email, service_mail).await {
            Ok(body) => {
                info!(response = %body, "Cloud mail API responded.");
                info!("Balance mail notice sent.");
            }
            Err(e) => error!(error = %e, details = ?e, "Failed to send balance mail notice."),
        }
    }

    async fn try_send_mail(
        &self,
        user: &UserInfo,
        email: &str,
        service_mail: &str,
    ) -> Result<String, NotifyError> {
        let secret = self
            .params
            .license()
            .ok_or(NotifyError::MissingParam("toughcloud_license"))?;
        let token = self.tokens.system_token().await?;
        let request = build_mail_request(
            user,
            email,
            &self.params.toughcloud_service_call,
            service_mail,
            token.trim(),
            &current_nonce(),
        )
        .sign(secret);
        self.cloud.post(MAIL_PATH, &request).await
    }

    /// Sends the notice as a plain-text mail over SMTP.
    ///
    /// Unlike the cloud notices, delivery errors are returned to the caller.
    #[instrument(skip_all, fields(account = %userinfo.account_number))]
    pub async fn send_smtp_notice(&self, userinfo: &UserInfo) -> Result<(), NotifyError> {
        let (topic, content) = format_smtp_notice(userinfo);
        let envelope = MailEnvelope {
            server: self.params.smtp_server.clone(),
            port: self.params.smtp_port,
            user: self.params.smtp_user.clone(),
            password: self.params.smtp_pwd.clone(),
            sender: self.params.smtp_sender.clone(),
            from_addr: self.params.smtp_from.clone().ok_or(MailError::MissingFrom)?,
            mailto: userinfo.email.clone().unwrap_or_default(),
            topic,
            content,
            tls: false,
        };
        self.mailer.send_mail(&envelope).await?;
        Ok(())
    }
}

/// Builds the unsigned SMS request. Field order is part of the wire format.
pub fn build_sms_request(user: &UserInfo, phone: &str, token: &str, nonce: &str) -> NotificationRequest {
    NotificationRequest::new()
        .with("token", token)
        .with("action", "sms")
        .with("tplname", BALANCE_TEMPLATE)
        .with("phone", phone)
        .with("customer", user.realname.as_str())
        .with("username", user.account_number.as_str())
        .with("balance", fen_to_yuan(user.balance))
        .with("product", user.product_name.as_str())
        .with("nonce", nonce)
}

/// Builds the unsigned mail request. Field order is part of the wire format.
pub fn build_mail_request(
    user: &UserInfo,
    email: &str,
    service_call: &str,
    service_mail: &str,
    token: &str,
    nonce: &str,
) -> NotificationRequest {
    NotificationRequest::new()
        .with("token", token)
        .with("action", "email")
        .with("mailto", email)
        .with("tplname", BALANCE_TEMPLATE)
        .with("customer", user.realname.as_str())
        .with("username", user.account_number.as_str())
        .with("balance", fen_to_yuan(user.balance))
        .with("product", user.product_name.as_str())
        .with("service_call", service_call)
        .with("service_mail", service_mail)
        .with("nonce", nonce)
}

/// Current Unix time in seconds.
fn current_nonce() -> String {
    chrono::Utc::now().timestamp().to_string()
}
