use crate::auth::{Credentials, Endpoints};

pub const USERNAME_VAR: &str = "GARMIN_USERNAME";
pub const PASSWORD_VAR: &str = "GARMIN_PASSWORD";
pub const WEB_BASE_VAR: &str = "GARMIN_WEB_BASE_URI";
pub const SSO_SIGNIN_VAR: &str = "GARMIN_SSO_SIGNIN_URI";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing {what}: pass it on the command line or set {var}")]
    Missing { what: &'static str, var: &'static str },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub endpoints: Endpoints,
}

impl Config {
    /// Command-line values win over the environment; a `.env` file in the
    /// working directory is read first if present.
    pub fn load(username: Option<String>, password: Option<String>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::resolve(username, password, |key| std::env::var(key).ok())
    }

    fn resolve(
        username: Option<String>,
        password: Option<String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let username = username.or_else(|| env(USERNAME_VAR)).ok_or(ConfigError::Missing {
            what: "login e-mail",
            var: USERNAME_VAR,
        })?;
        let password = password.or_else(|| env(PASSWORD_VAR)).ok_or(ConfigError::Missing {
            what: "password",
            var: PASSWORD_VAR,
        })?;

        let defaults = Endpoints::default();
        let endpoints = Endpoints {
            web_base: env(WEB_BASE_VAR).unwrap_or(defaults.web_base),
            sso_signin: env(SSO_SIGNIN_VAR).unwrap_or(defaults.sso_signin),
        };

        Ok(Config {
            credentials: Credentials { username, password },
            endpoints,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn cli_values_win_over_environment() {
        let config = Config::resolve(
            Some("cli@example.com".to_string()),
            Some("cli-pass".to_string()),
            env(&[(USERNAME_VAR, "env@example.com"), (PASSWORD_VAR, "env-pass")]),
        )
        .unwrap();
        assert_eq!(config.credentials.username, "cli@example.com");
        assert_eq!(config.credentials.password, "cli-pass");
        assert_eq!(config.endpoints, Endpoints::default());
    }

    #[test]
    fn environment_fills_missing_values() {
        let config = Config::resolve(
            None,
            None,
            env(&[
                (USERNAME_VAR, "env@example.com"),
                (PASSWORD_VAR, "env-pass"),
                (WEB_BASE_VAR, "http://127.0.0.1:9000/modern"),
            ]),
        )
        .unwrap();
        assert_eq!(config.credentials.username, "env@example.com");
        assert_eq!(config.endpoints.web_base, "http://127.0.0.1:9000/modern");
        assert_eq!(config.endpoints.sso_signin, Endpoints::default().sso_signin);
    }

    #[test]
    fn missing_password_is_reported() {
        let err = Config::resolve(Some("a@b.c".to_string()), None, env(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing { var: PASSWORD_VAR, .. }));
    }
}
