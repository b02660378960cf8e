//! Path prefixes owned by the hook.

/// A path prefix served by the hook instead of the host application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mount {
    Auth,
    Billing,
}

impl Mount {
    pub const ALL: [Mount; 2] = [Mount::Auth, Mount::Billing];

    pub fn prefix(&self) -> &'static str {
        match self {
            Mount::Auth => "/auth",
            Mount::Billing => "/billing",
        }
    }

    /// The mount owning `path`, if any.
    ///
    /// A path belongs to a mount when it equals the prefix or continues it
    /// with `/`; `/authors` is not under `/auth`.
    pub fn from_path(path: &str) -> Option<Mount> {
        Self::ALL.into_iter().find(|mount| mount.matches(path))
    }

    pub fn matches(&self, path: &str) -> bool {
        match path.strip_prefix(self.prefix()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}
