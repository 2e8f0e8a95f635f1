//! HTML pages.
//!
//! Pages are small enough to build with `format!`; every user-controlled
//! value goes through [`escape`].

use common::Flash;
use domain::{UserProfile, LOGIN_PATH, PROFILE_PATH};

use crate::session::SessionData;

/// Escape text for HTML element and attribute content
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, flash: Option<Flash>, body: &str) -> String {
    let flash = flash
        .map(|f| {
            format!(
                r#"<p class="flash flash-{}">{}</p>"#,
                f.kind().as_str(),
                escape(&f.message())
            )
        })
        .unwrap_or_default();

    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n<body>\n{flash}\n{body}\n</body>\n</html>\n",
        title = escape(title),
    )
}

pub fn login_page(flash: Option<Flash>) -> String {
    let body = format!(
        r#"<h1>Sign in</h1>
<form method="post" action="{LOGIN_PATH}">
  <label>Account <input name="account" required></label>
  <label>Password <input name="password" type="password" required></label>
  <button type="submit">Sign in</button>
</form>"#
    );
    layout("Sign in", flash, &body)
}

pub fn profile_page(profile: &UserProfile, flash: Option<Flash>) -> String {
    let body = format!(
        r#"<h1>Profile</h1>
<dl>
  <dt>Account</dt><dd>{account}</dd>
  <dt>Name</dt><dd>{name}</dd>
  <dt>Type</dt><dd>{user_type}</dd>
  <dt>Member since</dt><dd>{created_at}</dd>
</dl>
<h2>Change password</h2>
<form method="post" action="{PROFILE_PATH}/update-password">
  <label>Current password <input name="current_password" type="password" required></label>
  <label>New password <input name="new_password" type="password" required></label>
  <label>Confirm new password <input name="confirm_password" type="password" required></label>
  <button type="submit">Update password</button>
</form>
<p><a href="/auth/logout">Sign out</a></p>"#,
        account = escape(&profile.account),
        name = escape(&profile.name),
        user_type = profile.user_type,
        created_at = profile.created_at.format("%Y-%m-%d"),
    );
    layout("Profile", flash, &body)
}

pub fn home_page(session: &SessionData, flash: Option<Flash>) -> String {
    let body = format!(
        r#"<h1>Welcome, {name}</h1>
<p><a href="{PROFILE_PATH}">Profile</a> | <a href="/auth/logout">Sign out</a></p>"#,
        name = escape(&session.name),
    );
    layout(&format!("{} home", session.user_type), flash, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domain::UserType;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#39;y&#39;&lt;/script&gt;"
        );
    }

    #[test]
    fn test_home_page_escapes_name_and_shows_flash() {
        let session = SessionData {
            user_id: 1,
            user_type: UserType::Panel,
            status: true,
            name: "<b>Eve</b>".to_string(),
            created_at: Utc::now(),
        };
        let html = home_page(&session, Some(Flash::LoggedIn));

        assert!(html.contains("Welcome, &lt;b&gt;Eve&lt;/b&gt;"));
        assert!(html.contains(r#"class="flash flash-success""#));
        assert!(html.contains("<title>panel home</title>"));
    }

    #[test]
    fn test_login_page_without_flash() {
        let html = login_page(None);
        assert!(html.contains(r#"action="/auth/login""#));
        assert!(!html.contains("class=\"flash"));
    }
}
