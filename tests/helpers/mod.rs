#![allow(dead_code)]

pub mod log_capture;
pub mod mock_mail;

use balance_notifier::config::ParamConfig;
use balance_notifier::notification::cloud::CloudClient;
use balance_notifier::notification::token::StaticToken;
use balance_notifier::{BalanceNotifier, MailSender, TokenProvider, UserInfo};
use std::sync::Arc;
use std::time::Duration;

pub const TEST_TOKEN: &str = "sys-token";
pub const TEST_LICENSE: &str = "license-secret";

/// Parameters with a license and a service mailbox configured.
pub fn cloud_params() -> ParamConfig {
    ParamConfig {
        toughcloud_license: Some(TEST_LICENSE.to_string()),
        toughcloud_service_mail: Some("service@isp.example".to_string()),
        toughcloud_service_call: "400-800-0000".to_string(),
        smtp_from: Some("billing@isp.example".to_string()),
        ..Default::default()
    }
}

/// Builds a notifier that talks to `api_url` with a fixed system token.
pub fn create_notifier(
    api_url: &str,
    params: ParamConfig,
    mailer: Arc<dyn MailSender>,
) -> BalanceNotifier {
    let cloud = CloudClient::new(api_url, Duration::from_secs(2)).unwrap();
    BalanceNotifier::new(
        params,
        cloud,
        Arc::new(StaticToken(format!("  {}\n", TEST_TOKEN))),
        mailer,
    )
}

/// Builds a notifier with an explicit system token source.
pub fn create_notifier_with_tokens(
    api_url: &str,
    params: ParamConfig,
    tokens: Arc<dyn TokenProvider>,
) -> BalanceNotifier {
    let cloud = CloudClient::new(api_url, Duration::from_secs(2)).unwrap();
    BalanceNotifier::new(params, cloud, tokens, Arc::new(mock_mail::MockMailSender::default()))
}

pub fn create_test_user() -> UserInfo {
    UserInfo {
        phone: Some("13800138000".to_string()),
        email: Some("alice@example.com".to_string()),
        realname: "Alice Zhang".to_string(),
        account_number: "alice01".to_string(),
        balance: 12345,
        product_name: "Fiber 100M".to_string(),
    }
}
