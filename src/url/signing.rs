//! URL signing
//!
//! The signature is computed as:
//! ```text
//! s = hex(MD5(sign_key + "/" + path))                  (no query)
//! s = hex(MD5(sign_key + "/" + path + "?" + query))    (non-empty query)
//! ```
//!
//! `path` is the canonical path exactly as it appears in the URL (already
//! percent-encoded for proxy sources) and `query` is the sorted query string
//! without the signature parameter.

use md5::{Digest, Md5};

/// Compute the hex-encoded signature for a canonical path and query
///
/// # Arguments
/// * `sign_key` - Shared secret configured for the source
/// * `path` - Canonical path, without the leading slash
/// * `query` - Sorted query string without `s`; empty when there are no params
pub fn compute_signature(sign_key: &str, path: &str, query: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(sign_key.as_bytes());
    hasher.update(b"/");
    hasher.update(path.as_bytes());
    if !query.is_empty() {
        hasher.update(b"?");
        hasher.update(query.as_bytes());
    }
    hex::encode(hasher.finalize())
}
