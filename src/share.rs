//! Textual share format: `[TOKEN-]JJ-HH...HH` (spec.md §6).
//!
//! The split is performed from the *end* of the line, mirroring the
//! reference implementation: the payload is everything after the last
//! `-`, the index is everything after the next-to-last `-`, and
//! anything left over (which may itself contain `-`) is the token.

use crate::error::{Error, Result};

/// A share line split into its three logical parts.
pub struct Share {
    pub token: Option<String>,
    pub index: String,
    pub payload_hex: String,
}

impl Share {
    /// Parses one line of share text. Fails if fewer than two `-`
    /// separated fields remain (a bare payload with no index at all).
    pub fn parse(line: &str) -> Result<Self> {
        let (rest, payload) = line.rsplit_once('-').ok_or(Error::InvalidSyntax)?;
        let (token, index) = match rest.rsplit_once('-') {
            Some((t, i)) => (Some(t.to_string()), i),
            None => (None, rest),
        };
        if index.is_empty() || payload.is_empty() {
            return Err(Error::InvalidSyntax);
        }
        Ok(Share {
            token,
            index: index.to_string(),
            payload_hex: payload.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_share_has_no_token() {
        let s = Share::parse("03-deadbeef").unwrap();
        assert_eq!(s.token, None);
        assert_eq!(s.index, "03");
        assert_eq!(s.payload_hex, "deadbeef");
    }

    #[test]
    fn token_may_itself_contain_dashes() {
        let s = Share::parse("my-secret-03-deadbeef").unwrap();
        assert_eq!(s.token.as_deref(), Some("my-secret"));
        assert_eq!(s.index, "03");
        assert_eq!(s.payload_hex, "deadbeef");
    }

    #[test]
    fn missing_index_is_invalid() {
        assert!(Share::parse("deadbeef").is_err());
    }

    #[test]
    fn empty_payload_is_invalid() {
        assert!(Share::parse("03-").is_err());
    }
}
