//! Launch payload parsing.
//!
//! The host hands the mini-app an opaque parameter set: `key=value` pairs
//! joined by `&`, values percent-encoded. The `user` value is a JSON
//! identity record; the `hash` value is the detached signature over
//! everything else.

use serde::{Deserialize, Serialize};

use crate::verifier::VerificationError;

/// Identity record embedded in the payload's `user` field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserClaim {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// A parsed, not yet verified, launch payload.
#[derive(Clone, Debug)]
pub struct LaunchPayload {
    /// Signed fields in payload order, percent-decoded, `hash` removed.
    fields: Vec<(String, String)>,
    /// The detached signature, hex.
    hash: String,
}

impl LaunchPayload {
    pub fn parse(raw: &str) -> Result<Self, VerificationError> {
        let mut fields = Vec::new();
        let mut hash = None;

        for pair in raw.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| malformed(format!("field `{pair}` has no value")))?;
            let key = percent_decode(key)?;
            let value = percent_decode(value)?;

            if key == "hash" {
                hash = Some(value);
            } else {
                fields.push((key, value));
            }
        }

        let hash = hash.ok_or_else(|| malformed("missing `hash` field"))?;
        if fields.is_empty() {
            return Err(malformed("no signed fields besides `hash`"));
        }

        Ok(LaunchPayload { fields, hash })
    }

    /// The canonical string the host signed: fields sorted
    /// lexicographically by key, joined as `key=value` lines.
    pub fn data_check_string(&self) -> String {
        let mut fields: Vec<&(String, String)> = self.fields.iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        fields
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Decode the embedded identity record.
    pub fn user(&self) -> Result<UserClaim, VerificationError> {
        let raw = self
            .fields
            .iter()
            .find(|(k, _)| k == "user")
            .map(|(_, v)| v.as_str())
            .ok_or_else(|| malformed("missing `user` field"))?;

        serde_json::from_str(raw)
            .map_err(|e| malformed(format!("`user` field is not a valid identity record: {e}")))
    }
}

fn malformed(msg: impl Into<String>) -> VerificationError {
    VerificationError::MalformedPayload(msg.into())
}

/// `%XX` decoding with `decodeURIComponent` semantics: `+` stays literal.
fn percent_decode(s: &str) -> Result<String, VerificationError> {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escape = bytes
                .get(i + 1..i + 3)
                .and_then(|hex| std::str::from_utf8(hex).ok())
                .and_then(|hex| u8::from_str_radix(hex, 16).ok())
                .ok_or_else(|| malformed(format!("invalid percent escape in `{s}`")))?;
            out.push(escape);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }

    String::from_utf8(out).map_err(|_| malformed("field is not valid UTF-8"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_splits_hash_from_signed_fields() {
        let payload =
            LaunchPayload::parse("query_id=abc&auth_date=1700000000&hash=deadbeef").unwrap();

        assert_eq!(payload.hash(), "deadbeef");
        assert_eq!(
            payload.data_check_string(),
            "auth_date=1700000000\nquery_id=abc"
        );
    }

    #[test]
    fn test_parse_decodes_percent_escapes() {
        let payload =
            LaunchPayload::parse("user=%7B%22id%22%3A42%7D&auth_date=1&hash=00").unwrap();

        let user = payload.user().unwrap();
        assert_eq!(user.id, 42);
        assert_eq!(user.username, None);
    }

    #[test]
    fn test_parse_keeps_plus_literal() {
        let payload = LaunchPayload::parse("note=a+b&hash=00").unwrap();
        assert_eq!(payload.data_check_string(), "note=a+b");
    }

    #[test]
    fn test_parse_rejects_missing_hash() {
        let err = LaunchPayload::parse("auth_date=1&query_id=abc").unwrap_err();
        assert!(matches!(err, VerificationError::MalformedPayload(_)));
    }

    #[test]
    fn test_parse_rejects_hash_only() {
        let err = LaunchPayload::parse("hash=00").unwrap_err();
        assert!(matches!(err, VerificationError::MalformedPayload(_)));
    }

    #[test]
    fn test_parse_rejects_truncated_escape() {
        let err = LaunchPayload::parse("user=%7&hash=00").unwrap_err();
        assert!(matches!(err, VerificationError::MalformedPayload(_)));
    }

    #[test]
    fn test_user_record_with_full_name() {
        let payload = LaunchPayload::parse(concat!(
            "user=%7B%22id%22%3A7%2C%22username%22%3A%22indy%22%2C",
            "%22first_name%22%3A%22Indiana%22%2C%22last_name%22%3A%22Jones%22%7D",
            "&hash=00"
        ))
        .unwrap();

        let user = payload.user().unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.username.as_deref(), Some("indy"));
        assert_eq!(user.first_name.as_deref(), Some("Indiana"));
        assert_eq!(user.last_name.as_deref(), Some("Jones"));
    }

    #[test]
    fn test_missing_user_field_is_malformed() {
        let payload = LaunchPayload::parse("auth_date=1&hash=00").unwrap();
        assert!(matches!(
            payload.user().unwrap_err(),
            VerificationError::MalformedPayload(_)
        ));
    }
}
