//! Auth domain - sign-in provider descriptors.

mod provider;

pub use provider::{Provider, ProviderKind};
