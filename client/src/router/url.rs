//! URL path and fragment parsing for auth links.
//!
//! The platform appends link state to the fragment in query-string form, for
//! example `#access_token=..&refresh_token=..&type=recovery`. Keys other than
//! `access_token`, `refresh_token` and `type` are carried but ignored.

#[cfg(test)]
#[path = "url_test.rs"]
mod url_test;

use crate::net::types::TokenPair;

/// Paths the router distinguishes. Anything else behaves like `/`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoutePath {
    Root,
    AuthCallback,
    ResetPassword,
}

impl RoutePath {
    pub fn parse(path: &str) -> Self {
        let trimmed = path.split(['?', '#']).next().unwrap_or_default();
        match trimmed.trim_end_matches('/') {
            "/auth/callback" => Self::AuthCallback,
            "/reset-password" => Self::ResetPassword,
            _ => Self::Root,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Root => "/",
            Self::AuthCallback => "/auth/callback",
            Self::ResetPassword => "/reset-password",
        }
    }
}

/// Link kind announced by the fragment's `type` key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkType {
    Recovery,
    Signup,
}

/// Parsed URL fragment as ordered key/value pairs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Fragment {
    raw: String,
    pairs: Vec<(String, String)>,
}

impl Fragment {
    /// Parse a fragment with or without its leading `#`.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('#').unwrap_or(raw);
        let pairs = url::form_urlencoded::parse(raw.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Self { raw: raw.to_owned(), pairs }
    }

    /// First value for `key`; `None` when the key is absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Raw fragment text without the leading `#`.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn link_type(&self) -> Option<LinkType> {
        match self.get("type")? {
            "recovery" => Some(LinkType::Recovery),
            "signup" => Some(LinkType::Signup),
            _ => None,
        }
    }

    /// Token pair when both tokens are present and non-empty.
    pub fn token_pair(&self) -> Option<TokenPair> {
        let access = self.get("access_token").filter(|v| !v.is_empty())?;
        let refresh = self.get("refresh_token").filter(|v| !v.is_empty())?;
        Some(TokenPair::new(access, refresh))
    }
}
