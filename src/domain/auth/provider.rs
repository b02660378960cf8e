//! Sign-in provider descriptors.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a provider authenticates users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Oauth,
    Oidc,
    Email,
    Credentials,
}

impl Default for ProviderKind {
    fn default() -> Self {
        ProviderKind::Oauth
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProviderKind::Oauth => "oauth",
            ProviderKind::Oidc => "oidc",
            ProviderKind::Email => "email",
            ProviderKind::Credentials => "credentials",
        };
        write!(f, "{}", s)
    }
}

/// A configured sign-in provider such as `google` or `github`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub id: String,

    /// Display name; falls back to the id.
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default, rename = "type")]
    pub kind: ProviderKind,
}

impl Provider {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            kind: ProviderKind::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_kind(mut self, kind: ProviderKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}
