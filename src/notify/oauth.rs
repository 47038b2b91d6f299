//! Minimal OAuth 1.0a request signing (RFC 5849, HMAC-SHA1).
//!
//! Just enough of the protocol to authorize a single status-update
//! POST with a pre-issued access token; there is no token acquisition
//! flow here.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, Mac};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use sha1::Sha1;

/// OAuth 1.0a credential set for one user and one application.
#[derive(Debug, Clone)]
pub struct OauthCredentials {
    /// User access token
    pub token: String,

    /// Secret paired with the access token
    pub token_secret: String,

    /// Application consumer key
    pub consumer_key: String,

    /// Secret paired with the consumer key
    pub consumer_secret: String,
}

/// RFC 3986 unreserved characters stay literal; everything else is
/// percent-encoded (RFC 5849 §3.6).
const ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode a string the way the signature algorithm requires.
pub fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, ENCODE_SET).to_string()
}

/// Build the signature base string for a request (RFC 5849 §3.4.1):
/// uppercased method, encoded URL, and the sorted, encoded parameter
/// list, joined with `&`.
fn signature_base(method: &str, url: &str, params: &[(String, String)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(key, value)| (percent_encode(key), percent_encode(value)))
        .collect();
    encoded.sort();

    let joined = encoded
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent_encode(url),
        percent_encode(&joined)
    )
}

/// Sign a base string with HMAC-SHA1 and base64-encode the digest.
fn sign(base: &str, consumer_secret: &str, token_secret: &str) -> String {
    let key = format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret)
    );
    let mut mac =
        Hmac::<Sha1>::new_from_slice(key.as_bytes()).expect("HMAC accepts any key length");
    mac.update(base.as_bytes());
    BASE64.encode(mac.finalize().into_bytes())
}

/// Produce the `Authorization: OAuth ...` header value for a request.
///
/// `form` carries the request's form-encoded body parameters; they
/// participate in the signature alongside the `oauth_*` protocol
/// parameters but stay out of the header itself.
pub fn authorization_header(
    credentials: &OauthCredentials,
    method: &str,
    url: &str,
    form: &[(String, String)],
    timestamp: i64,
    nonce: &str,
) -> String {
    let mut params: Vec<(String, String)> = vec![
        (
            "oauth_consumer_key".to_string(),
            credentials.consumer_key.clone(),
        ),
        ("oauth_nonce".to_string(), nonce.to_string()),
        ("oauth_signature_method".to_string(), "HMAC-SHA1".to_string()),
        ("oauth_timestamp".to_string(), timestamp.to_string()),
        ("oauth_token".to_string(), credentials.token.clone()),
        ("oauth_version".to_string(), "1.0".to_string()),
    ];
    params.extend_from_slice(form);

    let base = signature_base(method, url, &params);
    let signature = sign(&base, &credentials.consumer_secret, &credentials.token_secret);

    let mut header_params: Vec<(String, String)> = params
        .into_iter()
        .filter(|(key, _)| key.starts_with("oauth_"))
        .collect();
    header_params.push(("oauth_signature".to_string(), signature));
    header_params.sort();

    let fields = header_params
        .iter()
        .map(|(key, value)| format!(r#"{}="{}""#, percent_encode(key), percent_encode(value)))
        .collect::<Vec<_>>()
        .join(", ");

    format!("OAuth {fields}")
}
