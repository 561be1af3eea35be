//! Reversible identifier codec: percent-encode, then URL-safe Base64.
//! AAS identifiers are URIs (`:`, `/`, `#`...) and must survive being passed
//! as a single URL path/query token; this transform makes them opaque and
//! reversible.

use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use thiserror::Error;

/// Escape everything except ASCII alphanumerics and `- . _ ~ /`.
const ID_QUOTE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("invalid utf-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

/// Encode an identifier for use as a URL token: percent-encode, then
/// URL-safe Base64 (padding retained). Deterministic, infallible.
pub fn encode_id(plain: &str) -> String {
    let quoted = utf8_percent_encode(plain, ID_QUOTE_SET).to_string();
    URL_SAFE.encode(quoted.as_bytes())
}

/// Decode an identifier produced by [`encode_id`]: Base64-decode, interpret
/// as UTF-8, percent-decode. Every malformed input maps to a [`DecodeError`];
/// lookup callers treat that as "identifier not resolvable", never as a
/// server fault.
pub fn decode_id(encoded: &str) -> Result<String, DecodeError> {
    let bytes = URL_SAFE.decode(encoded)?;
    let quoted = std::str::from_utf8(&bytes)?;
    let plain = percent_decode_str(quoted).decode_utf8()?;
    Ok(plain.into_owned())
}
