pub const VERIFICATION_SUBJECT: &str = "Email verification";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    to: String,
    subject: String,
    html: String,
}

impl EmailMessage {
    pub fn new(to: String, subject: String, html: String) -> Self {
        Self { to, subject, html }
    }

    /// Message carrying the sign-up verification code
    pub fn verification(to: &str, code: &str, full_name: &str) -> Self {
        let html = format!(
            r#"<!DOCTYPE html>
<html>
  <body style="font-family: Arial, sans-serif; color: #222;">
    <h2>Hi {name},</h2>
    <p>Thanks for signing up. Use the code below to verify your email address.</p>
    <p style="font-size: 28px; font-weight: bold; letter-spacing: 6px;">{code}</p>
    <p>If you did not create an account, you can ignore this email.</p>
  </body>
</html>
"#,
            name = escape_html(full_name),
            code = escape_html(code),
        );
        Self::new(to.to_string(), VERIFICATION_SUBJECT.to_string(), html)
    }

    pub fn to(&self) -> &str {
        &self.to
    }
    pub fn subject(&self) -> &str {
        &self.subject
    }
    pub fn html(&self) -> &str {
        &self.html
    }
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
