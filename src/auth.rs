use reqwest::header::{HeaderMap, HeaderValue, REFERER};
use std::fmt;
use std::time::Duration;

use crate::api::{check_response, ApiError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const SIGNIN_ENDPOINT: &str = "/sso/signin";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Garmin Connect web root; API paths hang off `/proxy` below it.
    pub web_base: String,
    pub sso_signin: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            web_base: "https://connect.garmin.com/modern".to_string(),
            sso_signin: "https://sso.garmin.com/sso/signin".to_string(),
        }
    }
}

impl Endpoints {
    pub fn login_uri(&self) -> String {
        format!("{}?service={}", self.sso_signin, urlencoding::encode(&self.web_base))
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A signed-in Garmin Connect session. Authentication lives in the cookie
/// jar of the wrapped client, so every request made through it is
/// authenticated.
#[derive(Debug, Clone)]
pub struct Session {
    client: reqwest::Client,
}

impl Session {
    pub async fn login(credentials: &Credentials, endpoints: &Endpoints) -> Result<Self, ApiError> {
        let login_uri = endpoints.login_uri();

        let mut headers = HeaderMap::new();
        let referer = HeaderValue::from_str(&login_uri).map_err(|_| ApiError::InvalidUri {
            uri: login_uri.clone(),
        })?;
        headers.insert(REFERER, referer);

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ApiError::Client)?;

        tracing::debug!(username = %credentials.username, "signing in");
        let response = client
            .post(&login_uri)
            .form(&[
                ("username", credentials.username.as_str()),
                ("password", credentials.password.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ApiError::transport(SIGNIN_ENDPOINT, e))?;
        check_response(response, SIGNIN_ENDPOINT).await?;

        // the web root hands out the session cookies for the proxy API
        let response = client
            .get(&endpoints.web_base)
            .send()
            .await
            .map_err(|e| ApiError::transport("/", e))?;
        check_response(response, "/").await?;

        tracing::info!(username = %credentials.username, "signed in to Garmin Connect");
        Ok(Self { client })
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }
}
