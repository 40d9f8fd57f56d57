//! Platform credentials, read once from the environment.

use crate::oauth::OAuthSigner;
use autopx_error::{PublishError, PublishErrorKind, PublishResult};

fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Facebook Page credentials.
///
/// Either value may be absent; the adapter checks them on every call.
#[derive(Clone, Default)]
pub struct FacebookCredentials {
    page_id: Option<String>,
    access_token: Option<String>,
}

impl std::fmt::Debug for FacebookCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FacebookCredentials")
            .field("page_id", &self.page_id)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl FacebookCredentials {
    /// Credentials from explicit values.
    pub fn new(page_id: Option<String>, access_token: Option<String>) -> Self {
        Self {
            page_id: page_id.filter(|v| !v.trim().is_empty()),
            access_token: access_token.filter(|v| !v.trim().is_empty()),
        }
    }

    /// Read `FACEBOOK_PAGE_ID` and `FACEBOOK_PAGE_ACCESS_TOKEN`.
    pub fn from_env() -> Self {
        Self::new(
            env_var("FACEBOOK_PAGE_ID"),
            env_var("FACEBOOK_PAGE_ACCESS_TOKEN"),
        )
    }

    /// Whether both values are present.
    pub fn is_complete(&self) -> bool {
        self.page_id.is_some() && self.access_token.is_some()
    }

    /// `(page_id, access_token)`, or `ConfigurationMissing`.
    pub(crate) fn require(&self) -> PublishResult<(&str, &str)> {
        match (&self.page_id, &self.access_token) {
            (Some(page_id), Some(token)) => Ok((page_id.as_str(), token.as_str())),
            _ => Err(PublishError::new(PublishErrorKind::ConfigurationMissing(
                "Facebook credentials are not configured in environment variables.".to_string(),
            ))),
        }
    }
}

/// OAuth 1.0a user-context credentials for X.
#[derive(Clone, Default)]
pub struct XCredentials {
    api_key: Option<String>,
    api_key_secret: Option<String>,
    access_token: Option<String>,
    access_token_secret: Option<String>,
}

impl std::fmt::Debug for XCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XCredentials")
            .field("missing", &self.missing())
            .finish_non_exhaustive()
    }
}

impl XCredentials {
    /// Credentials from explicit values.
    pub fn new(
        api_key: Option<String>,
        api_key_secret: Option<String>,
        access_token: Option<String>,
        access_token_secret: Option<String>,
    ) -> Self {
        let keep = |v: Option<String>| v.filter(|v| !v.trim().is_empty());
        Self {
            api_key: keep(api_key),
            api_key_secret: keep(api_key_secret),
            access_token: keep(access_token),
            access_token_secret: keep(access_token_secret),
        }
    }

    /// Read `X_API_KEY`, `X_API_KEY_SECRET`, `X_ACCESS_TOKEN` and `X_ACCESS_TOKEN_SECRET`.
    pub fn from_env() -> Self {
        Self::new(
            env_var("X_API_KEY"),
            env_var("X_API_KEY_SECRET"),
            env_var("X_ACCESS_TOKEN"),
            env_var("X_ACCESS_TOKEN_SECRET"),
        )
    }

    /// Names of the environment variables that are not set.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("X_API_KEY", &self.api_key),
            ("X_API_KEY_SECRET", &self.api_key_secret),
            ("X_ACCESS_TOKEN", &self.access_token),
            ("X_ACCESS_TOKEN_SECRET", &self.access_token_secret),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| name)
        .collect()
    }

    /// A request signer, or `ConfigurationMissing` naming the absent variables.
    pub(crate) fn signer(&self) -> PublishResult<OAuthSigner<'_>> {
        match (
            &self.api_key,
            &self.api_key_secret,
            &self.access_token,
            &self.access_token_secret,
        ) {
            (Some(consumer_key), Some(consumer_secret), Some(token), Some(token_secret)) => {
                Ok(OAuthSigner::new(consumer_key, consumer_secret, token, token_secret))
            }
            _ => Err(PublishError::new(PublishErrorKind::ConfigurationMissing(
                format!(
                    "X API credentials are not configured (missing {}).",
                    self.missing().join(", ")
                ),
            ))),
        }
    }
}
