//! URL assembly and signing
//!
//! Turns a selected domain, a canonical path and the final parameter set
//! into the delivery URL:
//!
//! ```text
//! {scheme}://{domain}/{path}?{sorted query}[&s={signature}]
//! ```
//!
//! # Path Canonicalization
//!
//! - Plain sources use the path as-is (a single leading `/` is dropped so the
//!   URL never carries `//` after the domain).
//! - Proxy sources treat the path as an opaque external URL and
//!   percent-encode it as one path segment (`:`, `/`, `?`, `&` included).
//!
//! # Query Serialization
//!
//! Keys are sorted by byte order and joined with `&`. Keys and values are
//! percent-encoded (RFC 3986 unreserved characters pass through). No `?` is
//! emitted for an empty parameter set.

pub mod signing;

pub use signing::compute_signature;

use std::borrow::Cow;

use crate::constants::SIGNATURE_PARAM;
use crate::params::ParameterSet;

/// Canonical path as it appears after the domain
pub fn canonical_path(path: &str, web_proxy: bool) -> Cow<'_, str> {
    if web_proxy {
        urlencoding::encode(path)
    } else {
        Cow::Borrowed(path.strip_prefix('/').unwrap_or(path))
    }
}

/// Serialize parameters into a sorted query string (no leading `?`)
pub fn serialize_query(params: &ParameterSet) -> String {
    params
        .sorted()
        .into_iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(&value.to_string())
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Inputs for [`assemble`]
#[derive(Debug, Clone, Copy)]
pub struct UrlParts<'a> {
    pub scheme: &'a str,
    pub domain: &'a str,
    pub path: &'a str,
    pub sign_key: Option<&'a str>,
    pub web_proxy: bool,
}

/// Build the final URL, signing it when a sign key is set
///
/// The signature is always computed last over the query without `s`, so a
/// caller-supplied `s` is discarded on signed sources.
pub fn assemble(parts: UrlParts<'_>, mut params: ParameterSet) -> String {
    let path = canonical_path(parts.path, parts.web_proxy);

    if let Some(sign_key) = parts.sign_key {
        params.remove(SIGNATURE_PARAM);
        let unsigned_query = serialize_query(&params);
        let signature = compute_signature(sign_key, &path, &unsigned_query);
        params.insert(SIGNATURE_PARAM, signature);
    }

    let query = serialize_query(&params);
    let mut url = format!("{}://{}/{}", parts.scheme, parts.domain, path);
    if !query.is_empty() {
        url.push('?');
        url.push_str(&query);
    }
    url
}
