//! Table definitions and dialect-specific DDL. Identifiers come from entity definitions only, values are always bound.

mod dialect;
mod schema;
pub use dialect::*;
pub use schema::*;
