//! Decoding of the identity provider's ID token into an [`Identity`].
//!
//! The signature is never checked here; the backend and the provider own
//! that. What this module does guarantee is that only a token whose payload
//! matches the claim schema yields an identity.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;
use thiserror::Error;

/// Display identity of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    /// Key used for every backend lookup.
    pub email: String,
    pub picture: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClaimsError {
    #[error("Token must have 3 segments, found {0}")]
    Structure(usize),

    #[error("Token payload is not base64url: {0}")]
    Encoding(String),

    #[error("Token payload is not valid claims JSON: {0}")]
    Payload(String),

    #[error("Token claim `{0}` is missing or invalid")]
    Claim(&'static str),
}

/// Claim schema. Fields with the wrong JSON type fail deserialization.
#[derive(Debug, Deserialize)]
struct IdTokenClaims {
    email: Option<String>,
    name: Option<String>,
    #[serde(default)]
    picture: Option<String>,
}

/// Decodes `token` into an [`Identity`].
///
/// Pure: performs no I/O and always yields the same result for the same token.
pub fn decode_identity(token: &str) -> Result<Identity, ClaimsError> {
    let segments: Vec<&str> = token.trim().split('.').collect();
    if segments.len() != 3 {
        return Err(ClaimsError::Structure(segments.len()));
    }

    // Some issuers pad the payload even though JWTs should not be padded.
    let payload = segments[1].trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| ClaimsError::Encoding(e.to_string()))?;
    let claims: IdTokenClaims =
        serde_json::from_slice(&bytes).map_err(|e| ClaimsError::Payload(e.to_string()))?;

    let email = claims
        .email
        .map(|e| e.trim().to_string())
        .filter(|e| is_plausible_email(e))
        .ok_or(ClaimsError::Claim("email"))?;
    let name = claims
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .ok_or(ClaimsError::Claim("name"))?;

    Ok(Identity {
        name,
        email,
        picture: claims.picture.unwrap_or_default(),
    })
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !email.contains(char::is_whitespace)
        }
        None => false,
    }
}

/// Builds an unsigned token around `payload`. Test helper.
#[cfg(test)]
pub(crate) fn token_with_payload(payload: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{}.{}.c2lnbmF0dXJl", header, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_google_style_claims() {
        let token = token_with_payload(&json!({
            "iss": "https://accounts.google.com",
            "email": "a@x.com",
            "name": "Ada",
            "picture": "https://example.com/ada.png",
            "exp": 1700000000
        }));

        let identity = decode_identity(&token).unwrap();
        assert_eq!(
            identity,
            Identity {
                name: "Ada".to_string(),
                email: "a@x.com".to_string(),
                picture: "https://example.com/ada.png".to_string(),
            }
        );
    }

    #[test]
    fn picture_is_optional() {
        let token = token_with_payload(&json!({"email": "a@x.com", "name": "Ada"}));
        assert_eq!(decode_identity(&token).unwrap().picture, "");
    }

    #[test]
    /// Decoding twice yields the same identity.
    fn decoding_is_deterministic() {
        let token = token_with_payload(&json!({"email": "a@x.com", "name": "Ada"}));
        assert_eq!(decode_identity(&token), decode_identity(&token));
    }

    #[test]
    fn rejects_wrong_segment_count() {
        assert_eq!(decode_identity("not-a-token"), Err(ClaimsError::Structure(1)));
        assert_eq!(decode_identity("a.b"), Err(ClaimsError::Structure(2)));
    }

    #[test]
    fn rejects_non_base64_payload() {
        assert!(matches!(
            decode_identity("aaa.!!!.ccc"),
            Err(ClaimsError::Encoding(_))
        ));
    }

    #[test]
    fn rejects_non_json_payload() {
        let payload = URL_SAFE_NO_PAD.encode("plain text");
        let token = format!("aaa.{}.ccc", payload);
        assert!(matches!(decode_identity(&token), Err(ClaimsError::Payload(_))));
    }

    #[test]
    /// A claim of the wrong type is a decode failure, not a coercion.
    fn rejects_mistyped_claims() {
        let token = token_with_payload(&json!({"email": 42, "name": "Ada"}));
        assert!(matches!(decode_identity(&token), Err(ClaimsError::Payload(_))));
    }

    #[test]
    fn rejects_missing_or_bad_email() {
        let missing = token_with_payload(&json!({"name": "Ada"}));
        assert_eq!(decode_identity(&missing), Err(ClaimsError::Claim("email")));

        let bad = token_with_payload(&json!({"email": "not-an-email", "name": "Ada"}));
        assert_eq!(decode_identity(&bad), Err(ClaimsError::Claim("email")));
    }

    #[test]
    fn rejects_blank_name() {
        let token = token_with_payload(&json!({"email": "a@x.com", "name": "  "}));
        assert_eq!(decode_identity(&token), Err(ClaimsError::Claim("name")));
    }
}
