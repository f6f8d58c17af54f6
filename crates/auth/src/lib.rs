//! # treasure-hunt-auth
//!
//! Validates that a treasure-hunt launch payload was really issued by the
//! trusted chat-platform host, and extracts the identity claims embedded
//! in it. The payload is a URL-encoded parameter set carrying a detached
//! HMAC-SHA256 signature; the verifying side holds the bot secret, which
//! must never ship to the client.
//!
//! Verification is a pure function of the payload and the secret: no
//! network, no ambient state, safe to call concurrently and repeatedly.
//!
//! ## Example
//!
//! ```
//! use treasure_hunt_auth::{VerificationError, Verifier};
//!
//! // No secret configured: every payload is rejected, distinguishably.
//! let verifier = Verifier::unconfigured();
//! let err = verifier.verify("auth_date=0&hash=00").unwrap_err();
//! assert!(matches!(err, VerificationError::MissingSecret));
//! ```

pub mod payload;
pub mod verifier;

pub use payload::{LaunchPayload, UserClaim};
pub use verifier::{VerificationError, VerifiedIdentity, Verifier};
