//! Auth command handlers.

mod sign_out;

pub use sign_out::{SignOutCommand, SignOutHandler};
