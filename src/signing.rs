//! Request payloads for the cloud API and the signature that guards them.
//!
//! The cloud verifies each request by recomputing `sign` from the shared
//! license secret and the other submitted values, so the field set must not
//! change after [`NotificationRequest::sign`] has run.

use md5::{Digest, Md5};
use serde::Serialize;

/// Computes the cloud API signature for a set of values.
///
/// Values are sorted, the secret is prepended, and the concatenation is
/// hashed with MD5. The digest is returned as uppercase hex.
pub fn make_sign<I, S>(secret: &str, values: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut values: Vec<String> = values.into_iter().map(|v| v.as_ref().to_string()).collect();
    values.sort();

    let mut hasher = Md5::new();
    hasher.update(secret.as_bytes());
    for value in &values {
        hasher.update(value.as_bytes());
    }
    format!("{:X}", hasher.finalize())
}

/// An ordered, form-encodable set of request fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NotificationRequest {
    fields: Vec<(&'static str, String)>,
}

impl NotificationRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field, keeping construction order.
    pub fn with(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.fields.push((key, value.into()));
        self
    }

    /// Looks up a field by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates over the field values in construction order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(k, _)| *k)
    }

    /// Signs every field added so far and appends the result as `sign`.
    pub fn sign(self, secret: &str) -> Self {
        let sign = make_sign(secret, self.values());
        self.with("sign", sign)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_sign_known_digest() {
        // md5("secret" + "a" + "b")
        assert_eq!(make_sign("secret", ["b", "a"]), "152D2AE693F6469C57291E432120E586");
    }

    #[test]
    fn test_make_sign_is_order_independent_and_uppercase() {
        let a = make_sign("k", ["x", "y", "z"]);
        let b = make_sign("k", ["z", "x", "y"]);
        assert_eq!(a, b);
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn test_make_sign_depends_on_secret() {
        assert_ne!(make_sign("k1", ["x"]), make_sign("k2", ["x"]));
    }

    #[test]
    fn test_sign_is_appended_last() {
        let request = NotificationRequest::new()
            .with("action", "sms")
            .with("nonce", "1700000000")
            .sign("secret");

        let keys: Vec<_> = request.keys().collect();
        assert_eq!(keys, vec!["action", "nonce", "sign"]);
        assert_eq!(
            request.get("sign"),
            Some(make_sign("secret", ["sms", "1700000000"]).as_str())
        );
    }

    #[test]
    fn test_request_serializes_as_ordered_pairs() {
        let request = NotificationRequest::new()
            .with("token", "t 1")
            .with("action", "sms");
        let encoded = serde_json::to_string(&request).unwrap();
        assert_eq!(encoded, r#"[["token","t 1"],["action","sms"]]"#);
    }
}
