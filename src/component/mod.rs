//! Component model.
//!
//! A `Component` is the platform-independent identity of a group of files
//! that share a name, engine and path remainder. Files discovered for it are
//! grouped into `Platform` entries, and open components are tracked in a
//! `ComponentSet` keyed by that identity.

pub mod model;
pub mod set;

pub use model::{Component, Platform};
pub use set::ComponentSet;
