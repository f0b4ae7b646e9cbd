//! Process-wide configuration.
//!
//! A single [`Config`] record is owned by the [`ConfigStore`] and replaced
//! wholesale on every update. Consumers read [`ConfigStore::current`] or
//! subscribe to [`ConfigStore::stream`] and mirror the fields they render.
//!
//! ## Seeding
//!
//! The initial record may be read from a camelCase JSON settings file
//! (missing fields keep their defaults). Nothing is ever written back.

mod error;
mod record;
mod store;

pub use error::*;
pub use record::*;
pub use store::*;
