use reqwest::{Client, Url};
use tracing::debug;

use crate::{parse, Account, ClientError, Result};

const USER_AGENT: &str = concat!("gradescope-client/", env!("CARGO_PKG_VERSION"));

/// An unauthenticated connection to a Gradescope instance.
///
/// Holds the cookie jar that the login flow fills in; [`Connection::login`]
/// turns it into an [`Account`].
pub struct Connection {
    http: Client,
    base_url: String,
}

impl Connection {
    /// `base_url` is the portal root, e.g. `https://www.gradescope.com`.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .cookie_store(true)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Logs in through the web form.
    ///
    /// Gradescope redirects to `/account` on success and re-renders the login
    /// page otherwise, so the final URL decides the outcome.
    pub async fn login(self, email: &str, password: &str) -> Result<Account> {
        let login_url = format!("{}/login", self.base_url);

        let page = self
            .http
            .get(&login_url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let token = parse::authenticity_token(&page).ok_or_else(|| {
            ClientError::Parse("login page has no authenticity_token".to_string())
        })?;

        let resp = self
            .http
            .post(&login_url)
            .form(&[
                ("utf8", "✓"),
                ("session[email]", email),
                ("session[password]", password),
                ("session[remember_me]", "0"),
                ("commit", "Log In"),
                ("session[remember_me_sso]", "0"),
                ("authenticity_token", token.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        if !landed_on_account(resp.url()) {
            return Err(ClientError::Auth("Invalid credentials.".to_string()));
        }

        debug!(email, "logged in to gradescope");
        Ok(Account::new(self.http, self.base_url))
    }
}

fn landed_on_account(url: &Url) -> bool {
    url.path().trim_end_matches('/') == "/account"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landed_on_account() {
        let ok = Url::parse("https://www.gradescope.com/account").unwrap();
        let ok_slash = Url::parse("https://www.gradescope.com/account/").unwrap();
        let failed = Url::parse("https://www.gradescope.com/login").unwrap();
        assert!(landed_on_account(&ok));
        assert!(landed_on_account(&ok_slash));
        assert!(!landed_on_account(&failed));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let conn = Connection::new("http://127.0.0.1:9000/").unwrap();
        assert_eq!(conn.base_url, "http://127.0.0.1:9000");
    }
}
