//! Response bodies for `/auth` routes.

use serde::Serialize;

use crate::adapters::http::middleware::CurrentSession;
use crate::adapters::http::mount::Mount;
use crate::domain::auth::{Provider, ProviderKind};
use crate::domain::foundation::User;

/// One entry of `GET /auth/providers`.
///
/// `signin_url` and `callback_url` are reserved for a host-supplied sign-in
/// flow. The hook itself answers both with 404, so a host that implements
/// sign-in must route these paths before they reach the hook.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProviderResponse {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ProviderKind,
    pub signin_url: String,
    pub callback_url: String,
}

impl From<&Provider> for ProviderResponse {
    fn from(provider: &Provider) -> Self {
        let base = Mount::Auth.prefix();
        Self {
            id: provider.id.clone(),
            name: provider.display_name().to_string(),
            kind: provider.kind,
            signin_url: format!("{}/signin/{}", base, provider.id),
            callback_url: format!("{}/callback/{}", base, provider.id),
        }
    }
}

/// Body of `GET /auth/session`; serializes to `{}` when anonymous.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<SessionUserResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUserResponse {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub subscription_id: Option<String>,
}

impl From<&User> for SessionUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            name: user.name.clone(),
            subscription_id: user.subscription_id.clone(),
        }
    }
}

impl From<Option<CurrentSession>> for SessionResponse {
    fn from(current: Option<CurrentSession>) -> Self {
        match current {
            Some(current) => Self {
                user: Some(SessionUserResponse::from(&current.user)),
                expires: Some(current.session.expires.to_rfc3339()),
            },
            None => Self::default(),
        }
    }
}
