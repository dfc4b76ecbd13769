//! Unverified JWT payload decoding, used only to display who is signed in.
//! Signature checks belong to the backend.

use base64ct::{Base64Unpadded, Base64UrlUnpadded, Encoding};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DecodedToken {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub team_id: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Decodes the payload segment of `token`. Returns `None` for anything that
/// is not a three-part token with a JSON payload.
#[must_use]
pub fn decode(token: &str) -> Option<DecodedToken> {
    let payload = token.split('.').nth(1)?.trim_end_matches('=');
    if payload.is_empty() {
        return None;
    }

    let bytes = Base64UrlUnpadded::decode_vec(payload)
        .or_else(|_| Base64Unpadded::decode_vec(payload))
        .ok()?;

    serde_json::from_slice(&bytes).ok()
}
