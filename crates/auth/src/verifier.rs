//! HMAC-based launch payload verification.
//!
//! The host signs the payload with a key derived from the bot secret:
//! `secret_key = HMAC-SHA256("WebAppData", secret)`, then
//! `hash = HMAC-SHA256(secret_key, data_check_string)`. We recompute both
//! and compare in constant time. A string-equality check against a
//! client-exposed "current" payload is not a security boundary and is
//! deliberately not offered here.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use tracing::{debug, warn};

use crate::payload::LaunchPayload;

type HmacSha256 = Hmac<Sha256>;

/// Domain-separation key the host uses when deriving the signing key.
const SIGNING_KEY_CONTEXT: &[u8] = b"WebAppData";

#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    #[error("malformed launch payload: {0}")]
    MalformedPayload(String),

    #[error("no trusted secret configured")]
    MissingSecret,

    #[error("launch payload signature mismatch")]
    SignatureMismatch,

    #[error("payload is signed for `{actual}`, not `{asserted}`")]
    IdentityMismatch { asserted: String, actual: String },
}

/// Identity extracted from a payload whose signature checked out.
///
/// This is the only identity the rest of the system may trust when
/// writing persisted state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedIdentity {
    pub user_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub validated_at: DateTime<Utc>,
}

/// Checks launch payloads against the bot secret.
pub struct Verifier {
    secret: Option<Vec<u8>>,
}

impl Verifier {
    /// A verifier trusting payloads signed with `secret` (the bot token,
    /// known only to the verifying party).
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Verifier {
            secret: Some(secret.into()),
        }
    }

    /// A verifier with no secret configured. Every call fails with
    /// [`VerificationError::MissingSecret`]; lets configuration be
    /// resolved at runtime without making the field optional everywhere.
    pub fn unconfigured() -> Self {
        Verifier { secret: None }
    }

    /// Verify `raw` and stamp the result with the current time.
    pub fn verify(&self, raw: &str) -> Result<VerifiedIdentity, VerificationError> {
        self.verify_at(raw, Utc::now())
    }

    /// Verify `raw`, stamping the result with a caller-supplied time.
    ///
    /// Pure function of its inputs: the same payload, secret, and
    /// timestamp always produce the same result.
    pub fn verify_at(
        &self,
        raw: &str,
        validated_at: DateTime<Utc>,
    ) -> Result<VerifiedIdentity, VerificationError> {
        let secret = self
            .secret
            .as_deref()
            .ok_or(VerificationError::MissingSecret)?;
        let payload = LaunchPayload::parse(raw)?;

        let claimed = hex::decode(payload.hash()).map_err(|_| {
            VerificationError::MalformedPayload("`hash` field is not hex".into())
        })?;

        let mut mac = HmacSha256::new_from_slice(SIGNING_KEY_CONTEXT)
            .expect("HMAC accepts keys of any length");
        mac.update(secret);
        let secret_key = mac.finalize().into_bytes();

        let mut mac = HmacSha256::new_from_slice(secret_key.as_slice())
            .expect("HMAC accepts keys of any length");
        mac.update(payload.data_check_string().as_bytes());

        // Constant-time comparison.
        if mac.verify_slice(&claimed).is_err() {
            warn!("launch payload rejected: signature mismatch");
            return Err(VerificationError::SignatureMismatch);
        }

        let user = payload.user()?;
        debug!(user_id = user.id, "launch payload verified");

        Ok(VerifiedIdentity {
            user_id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            validated_at,
        })
    }

    /// Verify `raw` and additionally require the embedded username to be
    /// `asserted_username`. Stops a player from submitting state under
    /// someone else's name with their own, validly signed, payload.
    pub fn verify_claimed(
        &self,
        raw: &str,
        asserted_username: &str,
    ) -> Result<VerifiedIdentity, VerificationError> {
        let identity = self.verify(raw)?;

        match identity.username.as_deref() {
            Some(actual) if actual == asserted_username => Ok(identity),
            other => {
                warn!(
                    asserted = asserted_username,
                    actual = other.unwrap_or(""),
                    "launch payload rejected: identity mismatch"
                );
                Err(VerificationError::IdentityMismatch {
                    asserted: asserted_username.to_owned(),
                    actual: other.unwrap_or("").to_owned(),
                })
            }
        }
    }
}
