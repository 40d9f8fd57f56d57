//! OAuth 1.0a request signing (RFC 5849, HMAC-SHA1).
//!
//! Only parameters from the query string and `application/x-www-form-urlencoded` bodies take part
//! in the signature; JSON bodies do not.

use autopx_error::{PublishError, PublishErrorKind, PublishResult};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// RFC 3986 unreserved characters stay as-is; everything else is encoded.
const RFC3986: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode a value the way OAuth 1.0a requires.
///
/// # Examples
///
/// ```
/// use autopx_social::oauth::encode;
///
/// assert_eq!(encode("Ladies + Gentlemen"), "Ladies%20%2B%20Gentlemen");
/// assert_eq!(encode("a-b.c_d~e"), "a-b.c_d~e");
/// ```
pub fn encode(value: &str) -> String {
    utf8_percent_encode(value, RFC3986).to_string()
}

/// A fresh single-use nonce.
pub fn nonce() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Seconds since the Unix epoch.
pub fn timestamp() -> String {
    chrono::Utc::now().timestamp().to_string()
}

/// Signs requests with a consumer key pair and an access token pair.
#[derive(Clone, Copy)]
pub struct OAuthSigner<'a> {
    consumer_key: &'a str,
    consumer_secret: &'a str,
    token: &'a str,
    token_secret: &'a str,
}

impl std::fmt::Debug for OAuthSigner<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthSigner")
            .field("consumer_key", &self.consumer_key)
            .field("token", &self.token)
            .finish_non_exhaustive()
    }
}

impl<'a> OAuthSigner<'a> {
    /// Create a signer.
    pub fn new(
        consumer_key: &'a str,
        consumer_secret: &'a str,
        token: &'a str,
        token_secret: &'a str,
    ) -> Self {
        Self {
            consumer_key,
            consumer_secret,
            token,
            token_secret,
        }
    }

    fn protocol_params<'b>(
        &'b self,
        nonce: &'b str,
        timestamp: &'b str,
    ) -> [(&'b str, &'b str); 6] {
        [
            ("oauth_consumer_key", self.consumer_key),
            ("oauth_nonce", nonce),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", timestamp),
            ("oauth_token", self.token),
            ("oauth_version", "1.0"),
        ]
    }

    /// Compute `oauth_signature` for a request.
    ///
    /// `url` must not carry a query string; pass query and form parameters in `params`.
    ///
    /// # Errors
    ///
    /// Returns an error if the signing key is rejected by the MAC implementation.
    pub fn signature(
        &self,
        method: &str,
        url: &str,
        params: &[(&str, &str)],
        nonce: &str,
        timestamp: &str,
    ) -> PublishResult<String> {
        let mut encoded: Vec<(String, String)> = params
            .iter()
            .copied()
            .chain(self.protocol_params(nonce, timestamp))
            .map(|(k, v)| (encode(k), encode(v)))
            .collect();
        encoded.sort();
        let parameter_string = encoded
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");

        let base_string = format!(
            "{}&{}&{}",
            method.to_ascii_uppercase(),
            encode(url),
            encode(&parameter_string)
        );
        let signing_key = format!("{}&{}", encode(self.consumer_secret), encode(self.token_secret));

        let mut mac = HmacSha1::new_from_slice(signing_key.as_bytes()).map_err(|e| {
            PublishError::new(PublishErrorKind::Unavailable(format!(
                "Failed to initialise request signer: {}",
                e
            )))
        })?;
        mac.update(base_string.as_bytes());
        Ok(BASE64.encode(mac.finalize().into_bytes()))
    }

    /// Build the `Authorization` header value for a request.
    ///
    /// # Errors
    ///
    /// Returns an error if the signature cannot be computed.
    pub fn authorization_header(
        &self,
        method: &str,
        url: &str,
        params: &[(&str, &str)],
        nonce: &str,
        timestamp: &str,
    ) -> PublishResult<String> {
        let signature = self.signature(method, url, params, nonce, timestamp)?;
        let fields = self
            .protocol_params(nonce, timestamp)
            .into_iter()
            .chain(std::iter::once(("oauth_signature", signature.as_str())))
            .map(|(k, v)| format!("{}=\"{}\"", encode(k), encode(v)))
            .collect::<Vec<_>>();
        Ok(format!("OAuth {}", fields.join(", ")))
    }
}
