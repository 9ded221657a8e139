//! Candidate pool: item schema, validation, and name matching.
//!
//! External input arrives as duck-typed [`RawItem`] records; one
//! validation pass per request turns them into the immutable [`Pool`]
//! that both engines consume. Anchor and exclude names are resolved
//! against the pool with the forgiving matching rules in [`matching`].

pub mod matching;
mod prepare;
mod types;

pub use matching::{anchor_groups, apply_excludes, AnchorGroup};
pub use prepare::Pool;
pub use types::{Item, Position, RawItem};
