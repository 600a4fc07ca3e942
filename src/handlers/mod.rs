//! HTTP handlers for the root greeting, users and posts.

pub mod index;
pub mod posts;
pub mod users;
pub use index::*;
pub use posts::*;
pub use users::*;
