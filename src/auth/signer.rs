use base64::{Engine as _, engine::general_purpose};
use hmac::{Hmac, Mac};
use md5::Md5;
use serde::Serialize;
use tracing::debug;

use super::{canonical::canonical_string, token::client_token};
use crate::common::{
    errors::{MovieBoxError, Result},
    types::now_millis,
};

type HmacMd5 = Hmac<Md5>;

/// Protocol version tag placed between timestamp and signature.
const SIGNATURE_VERSION: &str = "2";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl std::str::FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            other => Err(format!("unsupported method `{}`", other)),
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Header values authenticating exactly one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthHeaders {
    /// `x-client-token`
    pub client_token: String,
    /// `x-tr-signature`
    pub signature: String,
}

impl AuthHeaders {
    pub const CLIENT_TOKEN_HEADER: &'static str = "x-client-token";
    pub const SIGNATURE_HEADER: &'static str = "x-tr-signature";

    pub fn apply(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header(Self::CLIENT_TOKEN_HEADER, &self.client_token)
            .header(Self::SIGNATURE_HEADER, &self.signature)
    }
}

/// Signs API requests with the shared app secret (HMAC-MD5).
///
/// The key is decoded and loaded once; every call clones the keyed state.
#[derive(Clone)]
pub struct RequestSigner {
    mac: HmacMd5,
}

impl RequestSigner {
    /// `secret_key` is the base64 form of the HMAC key.
    pub fn new(secret_key: &str) -> Result<Self> {
        let key = general_purpose::STANDARD
            .decode(secret_key.trim())
            .map_err(|e| MovieBoxError::InvalidSecret(e.to_string()))?;
        let mac = HmacMd5::new_from_slice(&key)
            .map_err(|e| MovieBoxError::InvalidSecret(e.to_string()))?;
        Ok(Self { mac })
    }

    /// Signs with the current wall-clock time.
    pub fn sign(&self, method: HttpMethod, url: &str, body: Option<&str>) -> Result<AuthHeaders> {
        self.sign_at(now_millis(), method, url, body)
    }

    pub fn sign_at(
        &self,
        timestamp_millis: u64,
        method: HttpMethod,
        url: &str,
        body: Option<&str>,
    ) -> Result<AuthHeaders> {
        let canonical = canonical_string(method, url, timestamp_millis, body)?;

        let mut mac = self.mac.clone();
        mac.update(canonical.as_bytes());
        let digest = general_purpose::STANDARD.encode(mac.finalize().into_bytes());

        debug!("Signed {} {} at {}", method, url, timestamp_millis);

        Ok(AuthHeaders {
            client_token: client_token(timestamp_millis),
            signature: format!("{}|{}|{}", timestamp_millis, SIGNATURE_VERSION, digest),
        })
    }

    /// Recomputes the signature for an incoming request and compares it.
    pub fn verify(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&str>,
        signature: &str,
    ) -> bool {
        let Some(timestamp_millis) = signature
            .split('|')
            .next()
            .and_then(|ts| ts.parse::<u64>().ok())
        else {
            return false;
        };

        self.sign_at(timestamp_millis, method, url, body)
            .map(|headers| headers.signature == signature)
            .unwrap_or(false)
    }
}

impl std::fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSigner").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configs::ApiConfig;

    const TS: u64 = 1_700_000_000_000;
    const PLAY_INFO_URL: &str = "https://api.inmoviebox.com/wefeed-mobile-bff/subject-api/play-info?subjectId=123&se=1&ep=2";
    const SEARCH_URL: &str = "https://api.inmoviebox.com/wefeed-mobile-bff/subject-api/search/v2";
    const SEARCH_BODY: &str = r#"{"page":1,"perPage":10,"keyword":"dune"}"#;

    fn signer() -> RequestSigner {
        RequestSigner::new(&ApiConfig::default().secret_key).unwrap()
    }

    #[test]
    fn test_sign_get_known_answer() {
        let headers = signer()
            .sign_at(TS, HttpMethod::Get, PLAY_INFO_URL, None)
            .unwrap();
        assert_eq!(
            headers.client_token,
            "1700000000000,e41bb805cc23fdc5541917da93d608d5"
        );
        assert_eq!(headers.signature, "1700000000000|2|IDrE4rMszIF0fNcBnQSeDA==");
    }

    #[test]
    fn test_sign_post_known_answer() {
        let headers = signer()
            .sign_at(TS, HttpMethod::Post, SEARCH_URL, Some(SEARCH_BODY))
            .unwrap();
        assert_eq!(headers.signature, "1700000000000|2|X87dmRBFty6fJf1ifTALyw==");
    }

    #[test]
    fn test_sign_tab_url_with_blank_value() {
        let headers = signer()
            .sign_at(
                TS,
                HttpMethod::Get,
                "https://api.inmoviebox.com/wefeed-mobile-bff/tab-operating?page=1&tabId=0&version=",
                None,
            )
            .unwrap();
        assert_eq!(headers.signature, "1700000000000|2|1SzEaXlskQP9SU7lQDxdWw==");
    }

    #[test]
    fn test_same_timestamp_is_deterministic() {
        let signer = signer();
        let a = signer
            .sign_at(TS, HttpMethod::Post, SEARCH_URL, Some(SEARCH_BODY))
            .unwrap();
        let b = signer
            .sign_at(TS, HttpMethod::Post, SEARCH_URL, Some(SEARCH_BODY))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_timestamps_differ() {
        let signer = signer();
        let a = signer.sign_at(TS, HttpMethod::Get, PLAY_INFO_URL, None).unwrap();
        let b = signer
            .sign_at(TS + 1, HttpMethod::Get, PLAY_INFO_URL, None)
            .unwrap();
        assert_ne!(a.client_token, b.client_token);
        assert_ne!(a.signature, b.signature);
        assert_eq!(b.signature, "1700000000001|2|koO01/z1C4GFf3ENFGOEZg==");
    }

    #[test]
    fn test_query_order_does_not_change_signature() {
        let signer = signer();
        let shuffled = "https://api.inmoviebox.com/wefeed-mobile-bff/subject-api/play-info?ep=2&subjectId=123&se=1";
        assert_eq!(
            signer.sign_at(TS, HttpMethod::Get, PLAY_INFO_URL, None).unwrap(),
            signer.sign_at(TS, HttpMethod::Get, shuffled, None).unwrap()
        );
    }

    #[test]
    fn test_empty_body_signs_like_no_body() {
        let signer = signer();
        assert_eq!(
            signer.sign_at(TS, HttpMethod::Post, SEARCH_URL, Some("")).unwrap(),
            signer.sign_at(TS, HttpMethod::Post, SEARCH_URL, None).unwrap()
        );
    }

    #[test]
    fn test_fixture_secret_changes_signature() {
        let fixture = RequestSigner::new("c2VjcmV0").unwrap();
        let real = signer();
        assert_ne!(
            fixture.sign_at(TS, HttpMethod::Get, PLAY_INFO_URL, None).unwrap().signature,
            real.sign_at(TS, HttpMethod::Get, PLAY_INFO_URL, None).unwrap().signature
        );
    }

    #[test]
    fn test_invalid_secret_is_rejected() {
        let err = RequestSigner::new("not base64!").unwrap_err();
        assert!(matches!(err, MovieBoxError::InvalidSecret(_)));
    }

    #[test]
    fn test_malformed_url_is_rejected() {
        let err = signer()
            .sign_at(TS, HttpMethod::Get, "wefeed-mobile-bff/tab-operating", None)
            .unwrap_err();
        assert!(matches!(err, MovieBoxError::MalformedUrl { .. }));
    }

    #[test]
    fn test_verify_round_trip_and_tamper() {
        let signer = signer();
        let headers = signer
            .sign_at(TS, HttpMethod::Post, SEARCH_URL, Some(SEARCH_BODY))
            .unwrap();
        assert!(signer.verify(HttpMethod::Post, SEARCH_URL, Some(SEARCH_BODY), &headers.signature));
        assert!(!signer.verify(HttpMethod::Post, SEARCH_URL, Some("{}"), &headers.signature));
        assert!(!signer.verify(HttpMethod::Get, SEARCH_URL, Some(SEARCH_BODY), &headers.signature));
        assert!(!signer.verify(HttpMethod::Post, SEARCH_URL, None, "garbage"));
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!("get".parse::<HttpMethod>(), Ok(HttpMethod::Get));
        assert_eq!("POST".parse::<HttpMethod>(), Ok(HttpMethod::Post));
        assert!("PUT".parse::<HttpMethod>().is_err());
    }
}
