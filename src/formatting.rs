// src/formatting.rs

use crate::core::UserInfo;

/// The plain-text body of the SMTP balance notice.
///
/// The first line doubles as the mail subject.
pub const BALANCE_NOTICE_TEMPLATE: &str = "尊敬的 %customer% 您好:
                        您的账号 %username% 余额只有 %balance%，为保证您的服务，请您及时充值。";

/// Replaces every `%name%` marker with its value.
///
/// Substitution is literal and applied in the order given. Markers without a
/// value are left untouched.
pub fn render_template(template: &str, values: &[(&str, &str)]) -> String {
    values.iter().fold(template.to_string(), |text, (name, value)| {
        text.replace(&format!("%{}%", name), value)
    })
}

/// Returns the text up to (not including) the first newline.
pub fn first_line(text: &str) -> &str {
    text.split('\n').next().unwrap_or_default()
}

/// Renders the SMTP notice for a subscriber, returning `(subject, body)`.
///
/// The balance is substituted as given, in minor units.
pub fn format_smtp_notice(user: &UserInfo) -> (String, String) {
    let balance = user.balance.to_string();
    let body = render_template(
        BALANCE_NOTICE_TEMPLATE,
        &[
            ("customer", &user.realname),
            ("username", &user.account_number),
            ("balance", &balance),
        ],
    );
    let subject = first_line(&body).to_string();
    (subject, body)
}

/// Converts a minor-unit amount (fen / cents) into a major-unit decimal string.
///
/// Integer arithmetic only, so the result is exact: `12345` becomes `"123.45"`.
pub fn fen_to_yuan(fen: i64) -> String {
    let sign = if fen < 0 { "-" } else { "" };
    let abs = fen.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fen_to_yuan() {
        assert_eq!(fen_to_yuan(12345), "123.45");
        assert_eq!(fen_to_yuan(0), "0.00");
        assert_eq!(fen_to_yuan(5), "0.05");
        assert_eq!(fen_to_yuan(100), "1.00");
        assert_eq!(fen_to_yuan(-5), "-0.05");
        assert_eq!(fen_to_yuan(-12345), "-123.45");
        assert_eq!(fen_to_yuan(i64::MIN), "-92233720368547758.08");
    }

    #[test]
    fn test_render_template_replaces_every_occurrence() {
        let text = render_template("%a% and %a% but not %b%", &[("a", "x")]);
        assert_eq!(text, "x and x but not %b%");
    }

    #[test]
    fn test_first_line() {
        assert_eq!(first_line("subject\nbody"), "subject");
        assert_eq!(first_line("no newline"), "no newline");
        assert_eq!(first_line(""), "");
    }

    #[test]
    fn test_format_smtp_notice() {
        let user = UserInfo {
            realname: "Alice".to_string(),
            account_number: "alice01".to_string(),
            balance: 250,
            ..Default::default()
        };
        let (subject, body) = format_smtp_notice(&user);

        assert_eq!(subject, "尊敬的 Alice 您好:");
        assert!(body.starts_with(&subject));
        assert!(body.contains("您的账号 alice01 余额只有 250，"));
        assert!(!body.contains('%'));
    }
}
