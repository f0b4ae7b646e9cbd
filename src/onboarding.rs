//! Which tutorial sequences have been shown.
//!
//! The record is a short cookie-like string, e.g. `intro,simulation` or
//! `intro;expires=session`. It lives in memory only; the session marker
//! tells the host not to carry it past the current session.

use crate::constants::SESSION_EXPIRY_MARKER;
use std::collections::BTreeSet;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TutorialLog {
    seen: BTreeSet<String>,
    session_only: bool,
}

impl TutorialLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A log that expires with the current session.
    pub fn for_session() -> Self {
        Self {
            seen: BTreeSet::new(),
            session_only: true,
        }
    }

    /// Parse an encoded log. Empty tags and unknown attributes are ignored.
    pub fn parse(encoded: &str) -> Self {
        let mut parts = encoded.split(';').map(str::trim);
        let seen = parts
            .next()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect();
        let session_only = parts.any(|attr| attr.eq_ignore_ascii_case(SESSION_EXPIRY_MARKER));
        Self { seen, session_only }
    }

    pub fn encoded(&self) -> String {
        let tags = self.seen.iter().map(String::as_str).collect::<Vec<_>>().join(",");
        if self.session_only {
            format!("{tags};{SESSION_EXPIRY_MARKER}")
        } else {
            tags
        }
    }

    pub fn has_seen(&self, tag: &str) -> bool {
        self.seen.contains(tag)
    }

    /// Record `tag`; returns false if it was already recorded.
    pub fn mark_seen(&mut self, tag: &str) -> bool {
        self.seen.insert(tag.trim().to_string())
    }

    pub fn is_session_only(&self) -> bool {
        self.session_only
    }

    pub fn set_session_only(&mut self, session_only: bool) {
        self.session_only = session_only;
    }
}
