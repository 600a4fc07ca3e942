//! Persisted records. Each model defines its table, its queries and its `to_dict` serialization.

mod post;
mod user;
pub use post::{NewPost, Post};
pub use user::{NewUser, User};

use crate::error::ConfigError;
use crate::sql::Schema;

/// Every table the service stores, in dependency order.
pub fn schema() -> Result<Schema, ConfigError> {
    Schema::new().register::<User>()?.register::<Post>()
}
