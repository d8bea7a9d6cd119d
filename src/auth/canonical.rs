use std::collections::BTreeMap;

use reqwest::Url;

use super::{signer::HttpMethod, token::md5_hex};
use crate::common::errors::{MovieBoxError, Result};

pub const ACCEPT: &str = "application/json";
pub const CONTENT_TYPE: &str = "application/json";

/// Only this prefix of the body goes into the body hash; the length field
/// still counts every byte.
pub const MAX_HASHED_BODY_BYTES: usize = 102_400;

/// Splits an absolute URL into its path and the key-sorted query string.
pub fn path_and_query(url: &str) -> Result<(String, String)> {
    let parsed = Url::parse(url).map_err(|e| MovieBoxError::malformed_url(url, e))?;
    if parsed.cannot_be_a_base() {
        return Err(MovieBoxError::malformed_url(url, "URL has no hierarchical path"));
    }
    Ok((parsed.path().to_string(), sorted_query(&parsed)))
}

/// Form-decodes the query and re-joins it as `key=value` pairs ordered by key.
///
/// Blank values are kept. Repeated keys are grouped under the first
/// occurrence's sort position and keep their relative order.
pub fn sorted_query(url: &Url) -> String {
    let mut params: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (key, value) in url.query_pairs() {
        params
            .entry(key.into_owned())
            .or_default()
            .push(value.into_owned());
    }

    params
        .iter()
        .flat_map(|(key, values)| values.iter().map(move |v| format!("{}={}", key, v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// `(bodyLength, bodyHash)`; both empty when there is no body or it is empty.
pub fn body_fields(body: Option<&str>) -> (String, String) {
    match body {
        Some(body) if !body.is_empty() => {
            let bytes = body.as_bytes();
            let hashed = &bytes[..bytes.len().min(MAX_HASHED_BODY_BYTES)];
            (bytes.len().to_string(), md5_hex(hashed))
        }
        _ => (String::new(), String::new()),
    }
}

/// The exact text the request signature is computed over: seven fields
/// separated by `\n`.
pub fn canonical_string(
    method: HttpMethod,
    url: &str,
    timestamp_millis: u64,
    body: Option<&str>,
) -> Result<String> {
    let (path, query) = path_and_query(url)?;
    let (body_len, body_hash) = body_fields(body);

    Ok([
        method.as_str().to_string(),
        ACCEPT.to_string(),
        CONTENT_TYPE.to_string(),
        body_len,
        timestamp_millis.to_string(),
        body_hash,
        format!("{}?{}", path, query),
    ]
    .join("\n"))
}
